use time::{
    format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime, UtcOffset,
};
use tracing::warn;

use super::parse_utc_offset;
use crate::OffsetParseError;

/// `2024-01-15T09:30:00+0200`
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
);

pub fn format_timestamp(instant: OffsetDateTime) -> String {
    instant
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| instant.to_string())
}

fn fixed_offset(raw: &str) -> Result<UtcOffset, OffsetParseError> {
    let seconds = parse_utc_offset(raw)?;
    UtcOffset::from_whole_seconds(seconds).map_err(|_| OffsetParseError::out_of_range(raw))
}

/// Render `base` once per offset string, skipping entries that do not parse.
///
/// Offsets are fixed: no daylight saving, no timezone database.
pub fn localized_timestamps<S: AsRef<str>>(base: OffsetDateTime, offsets: &[S]) -> Vec<String> {
    offsets
        .iter()
        .filter_map(|raw| match fixed_offset(raw.as_ref()) {
            Ok(offset) => Some(format_timestamp(base.to_offset(offset))),
            Err(e) => {
                warn!("Skipping timezone: {}", e);
                None
            }
        })
        .collect()
}
