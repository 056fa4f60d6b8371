use crate::{OffsetComponent, OffsetParseError};

const PREFIX: &str = "UTC";
const MAX_HOURS: i32 = 23;
const MAX_MINUTES: i32 = 59;

/// Parse `UTC`, `UTC±H:MM` or `UTC±HH:MM` into a signed offset in seconds
pub fn parse_utc_offset(input: &str) -> Result<i32, OffsetParseError> {
    let trimmed = input.trim();
    let rest = trimmed
        .strip_prefix(PREFIX)
        .ok_or_else(|| OffsetParseError::malformed(input, OffsetComponent::Prefix))?;

    if rest.is_empty() {
        return Ok(0);
    }

    let (sign, body) = if let Some(body) = rest.strip_prefix('+') {
        (1, body)
    } else if let Some(body) = rest.strip_prefix('-') {
        (-1, body)
    } else {
        return Err(OffsetParseError::malformed(input, OffsetComponent::Sign));
    };

    let (hours, minutes) = body
        .split_once(':')
        .ok_or_else(|| OffsetParseError::malformed(input, OffsetComponent::Separator))?;

    let hours = digits(hours, 1..=2)
        .ok_or_else(|| OffsetParseError::malformed(input, OffsetComponent::Hours))?;
    let minutes = digits(minutes, 2..=2)
        .ok_or_else(|| OffsetParseError::malformed(input, OffsetComponent::Minutes))?;

    if hours > MAX_HOURS || minutes > MAX_MINUTES {
        return Err(OffsetParseError::out_of_range(input));
    }

    Ok(sign * (hours * 3600 + minutes * 60))
}

fn digits(field: &str, width: std::ops::RangeInclusive<usize>) -> Option<i32> {
    if !width.contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
