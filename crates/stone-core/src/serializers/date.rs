use crate::error::StoneError;
use crate::wire::WireNode;
use chrono::format::{parse, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Timestamp layout used by most API routes
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Serializer for timestamps rendered with an explicit strftime pattern.
///
/// The pattern is supplied per call and must be the same on both sides;
/// nothing is remembered between calls.
pub struct DateSerializer;

impl DateSerializer {
    /// Render `value` as a wire string using `format`.
    ///
    /// # Panics
    ///
    /// Panics if `format` is not a valid strftime pattern. Formats come from
    /// generated code, so an invalid one is a programming error.
    pub fn serialize(value: &DateTime<Utc>, format: &str) -> WireNode {
        let mut rendered = String::new();
        if write!(rendered, "{}", value.format(format)).is_err() {
            panic!("invalid date format pattern {:?}", format);
        }
        WireNode::String(rendered)
    }

    /// Parse a wire string using `format`.
    ///
    /// Patterns carrying an offset (`%z`) are converted to UTC, patterns
    /// without one are read as UTC, and date-only patterns yield midnight.
    /// Every time field the pattern names is kept; an hour without minutes
    /// is read as the full hour.
    pub fn deserialize(node: &WireNode, format: &str) -> Result<DateTime<Utc>, StoneError> {
        let text = match node {
            WireNode::String(text) => text,
            other => return Err(StoneError::unexpected_kind("timestamp string", other)),
        };

        parse_utc(text, format).map_err(|err| {
            tracing::debug!("Timestamp '{}' does not match '{}': {}", text, format, err);
            StoneError::malformed(format!(
                "'{}' does not match timestamp format '{}': {}",
                text, format, err
            ))
        })
    }
}

fn parse_utc(text: &str, format: &str) -> ParseResult<DateTime<Utc>> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, text, StrftimeItems::new(format))?;

    // Zero only the time fields the pattern left out.
    let has_hour = parsed.hour_div_12().is_some() || parsed.hour_mod_12().is_some();
    let has_time = has_hour
        || parsed.minute().is_some()
        || parsed.second().is_some()
        || parsed.nanosecond().is_some()
        || parsed.timestamp().is_some();
    if !has_time {
        parsed.set_hour(0)?;
        parsed.set_minute(0)?;
    } else if has_hour && parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.offset().is_none() {
        parsed.set_offset(0)?;
    }

    Ok(parsed.to_datetime()?.with_timezone(&Utc))
}
