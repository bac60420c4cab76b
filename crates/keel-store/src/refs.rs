use keel_core::ObjectId;

use crate::layout::RepoLayout;
use crate::lockfile::LockFile;
use crate::StoreError;

pub fn write_ref(layout: &RepoLayout, name: &str, target: &ObjectId) -> Result<(), StoreError> {
    let path = layout.refs_dir().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut lock = LockFile::acquire(&path)?;
    lock.write_all(target.to_hex().as_bytes())?;
    lock.write_all(b"\n")?;
    lock.commit()
}

pub fn read_ref(layout: &RepoLayout, name: &str) -> Result<Option<ObjectId>, StoreError> {
    let path = layout.refs_dir().join(name);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let id = ObjectId::from_hex(content.trim())?;
    Ok(Some(id))
}

pub fn ref_exists(layout: &RepoLayout, name: &str) -> bool {
    layout.refs_dir().join(name).is_file()
}
