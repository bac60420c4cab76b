use crate::CoreError;

/// Parse a `[sign]HHMM` timezone field into offset seconds plus a flag for
/// the `-0000` spelling, which is distinct from `+0000` on the wire.
pub fn parse_timezone(text: &str) -> Result<(i32, bool), CoreError> {
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidTimezone(text.to_string()));
    }
    let hours: i32 = digits[..2]
        .parse()
        .map_err(|_| CoreError::InvalidTimezone(text.to_string()))?;
    let minutes: i32 = digits[2..]
        .parse()
        .map_err(|_| CoreError::InvalidTimezone(text.to_string()))?;
    let offset = sign * (hours * 3600 + minutes * 60);
    Ok((offset, sign < 0 && offset == 0))
}

/// Inverse of [`parse_timezone`]. Offsets that do not land on a whole
/// minute cannot be encoded in the 4-digit field.
pub fn format_timezone(offset: i32, negative_zero: bool) -> Result<String, CoreError> {
    if offset % 60 != 0 {
        return Err(CoreError::InvalidTimezone(format!("{offset} seconds")));
    }
    let sign = if offset < 0 || negative_zero { '-' } else { '+' };
    let abs = offset.abs();
    Ok(format!("{}{:02}{:02}", sign, abs / 3600, (abs % 3600) / 60))
}
