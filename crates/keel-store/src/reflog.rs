use std::path::PathBuf;

use keel_core::{format_timezone, parse_timezone, ObjectId, RefLog, RefLogEntry};

use crate::layout::RepoLayout;
use crate::lockfile::LockFile;
use crate::StoreError;

const SHA_HEX_LEN: usize = 40;

/// Parse the persisted reflog text. Lines are visited from the end of the
/// file (the most recent entry) toward the start; the first malformed line
/// stops the parse and everything older is dropped, so a corrupt log still
/// yields its usable recent history instead of an error. The truncation is
/// silent apart from a warning.
///
/// The accepted grammar is canonical: lowercase hex ids, unpadded decimal
/// timestamps. Looser historical spellings (uppercase hex, leading-zero
/// timestamps) count as malformed and take the truncation path, which keeps
/// every accepted line re-serializable byte for byte.
pub fn parse_reflog(text: &str) -> RefLog {
    let mut entries = Vec::new();
    for line in text.lines().rev() {
        // Only the line terminator is trimmed; an empty message leaves the
        // line ending in a bare tab, which must survive
        match parse_line(line.trim_end_matches('\r')) {
            Some(entry) => entries.push(entry),
            None => {
                tracing::warn!(line, "corrupt reflog line, truncating older history");
                break;
            }
        }
    }
    RefLog::from_entries(entries)
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn parse_line(line: &str) -> Option<RefLogEntry> {
    let (head, message) = line.split_once('\t')?;

    // Two fixed-width hex fields, space separated
    let old_hex = head.get(..SHA_HEX_LEN)?;
    if head.as_bytes().get(SHA_HEX_LEN) != Some(&b' ') {
        return None;
    }
    let new_hex = head.get(SHA_HEX_LEN + 1..2 * SHA_HEX_LEN + 1)?;
    if head.as_bytes().get(2 * SHA_HEX_LEN + 1) != Some(&b' ') {
        return None;
    }
    if !is_lower_hex(old_hex) || !is_lower_hex(new_hex) {
        return None;
    }
    let old = ObjectId::from_hex(old_hex).ok()?;
    let new = ObjectId::from_hex(new_hex).ok()?;

    // The user field may itself contain spaces; time and zone are the last
    // two space-separated fields before the tab
    let rest = head.get(2 * SHA_HEX_LEN + 2..)?;
    let (rest, tz_text) = rest.rsplit_once(' ')?;
    let (user, time_text) = rest.rsplit_once(' ')?;

    let lt = user.find('<')?;
    if !user[lt..].contains('>') {
        return None;
    }

    // Canonical decimal: digits only, no leading zeros
    if time_text.is_empty()
        || !time_text.bytes().all(|b| b.is_ascii_digit())
        || (time_text.len() > 1 && time_text.starts_with('0'))
    {
        return None;
    }
    let time: u64 = time_text.parse().ok()?;

    let (tz_offset, tz_negative_zero) = parse_timezone(tz_text).ok()?;

    Some(RefLogEntry {
        old,
        new,
        user: user.to_string(),
        time,
        tz_offset,
        tz_negative_zero,
        message: message.to_string(),
    })
}

/// Render a log back to its on-disk form, oldest entry first. An empty log
/// renders as empty text.
pub fn serialize_reflog(log: &RefLog) -> Result<String, StoreError> {
    let mut out = String::new();
    for entry in log.iter().rev() {
        let tz = format_timezone(entry.tz_offset, entry.tz_negative_zero)?;
        out.push_str(&format!(
            "{} {} {} {} {}\t{}\n",
            entry.old.to_hex(),
            entry.new.to_hex(),
            entry.user,
            entry.time,
            tz,
            entry.message
        ));
    }
    Ok(out)
}

pub fn reflog_path(layout: &RepoLayout, ref_name: &str) -> PathBuf {
    layout.logs_dir().join(ref_name)
}

/// A reference with no log file has empty history.
pub fn read_reflog_file(layout: &RepoLayout, ref_name: &str) -> Result<RefLog, StoreError> {
    let path = reflog_path(layout, ref_name);
    if !path.exists() {
        return Ok(RefLog::new());
    }
    let text = std::fs::read_to_string(&path)?;
    Ok(parse_reflog(&text))
}

pub fn write_reflog_file(
    layout: &RepoLayout,
    ref_name: &str,
    log: &RefLog,
) -> Result<(), StoreError> {
    let path = reflog_path(layout, ref_name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let text = serialize_reflog(log)?;
    let mut lock = LockFile::acquire(&path)?;
    lock.write_all(text.as_bytes())?;
    lock.commit()
}
