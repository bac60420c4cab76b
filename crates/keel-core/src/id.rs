use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CoreError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId([u8; 20]);

impl ObjectId {
    /// The all-zero id, marking "no object" (e.g. the value a reference
    /// held before it existed).
    pub const ZERO: ObjectId = ObjectId([0; 20]);

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        if s.len() != 40 {
            return Err(CoreError::InvalidObjectId(format!(
                "expected 40 hex digits, got {}",
                s.len()
            )));
        }
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidObjectId(e.to_string()))?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidObjectId("expected 20 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}
