use crate::error::{EngineError, Result};
use crate::extract::ParsedTimestamp;
use chrono::{Local, NaiveDateTime, TimeDelta, TimeZone};
use filetime::FileTime;
use std::path::Path;

/// Seconds since the Unix epoch for a parsed timestamp.
///
/// Zoned values map to their exact instant. Naive values are read as local
/// wall-clock time; on a DST overlap the earlier instant wins, and a time that
/// falls into a DST gap is read with the offset in force just before the gap.
#[must_use]
pub fn unix_seconds(ts: &ParsedTimestamp) -> Option<i64> {
    match ts {
        ParsedTimestamp::Zoned(dt) => Some(dt.timestamp()),
        ParsedTimestamp::Naive(naive) => local_seconds(&Local, naive),
    }
}

fn local_seconds<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<i64> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return Some(dt.timestamp());
    }
    // Gaps are at most a few hours wide.
    (1..=3).find_map(|hours| {
        let shift = TimeDelta::hours(hours);
        let before = tz
            .from_local_datetime(&naive.checked_sub_signed(shift)?)
            .earliest()?;
        Some(before.timestamp() + shift.num_seconds())
    })
}

/// Set the modification time of `path` to `ts` with one-second resolution.
///
/// The access time is left untouched.
///
/// # Errors
///
/// Returns `NonexistentLocalTime` for a naive time that does not exist locally,
/// or `SetTime` if the filesystem rejects the update.
pub fn set_mtime(path: &Path, ts: &ParsedTimestamp) -> Result<FileTime> {
    let secs = unix_seconds(ts).ok_or_else(|| EngineError::NonexistentLocalTime {
        path: path.to_path_buf(),
        value: ts.to_string(),
    })?;
    let mtime = FileTime::from_unix_time(secs, 0);
    filetime::set_file_mtime(path, mtime).map_err(|source| EngineError::SetTime {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(mtime)
}
