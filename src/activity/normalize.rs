use serde_json::Value;
use thiserror::Error;

use super::models::{ActivityItem, RawEvent};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed response: expected a list of events")]
    NotASequence,
    #[error("Malformed response: {0}")]
    InvalidEvent(#[from] serde_json::Error),
}

/// Parse a feed body into raw events. The body must be a JSON array.
pub fn parse_events(body: &str) -> Result<Vec<RawEvent>, ParseError> {
    let value: Value = serde_json::from_str(body)?;
    parse_event_value(value)
}

pub fn parse_event_value(value: Value) -> Result<Vec<RawEvent>, ParseError> {
    if !value.is_array() {
        return Err(ParseError::NotASequence);
    }
    Ok(serde_json::from_value(value)?)
}

/// Keep pushes and pull requests, map them to display items and cap the
/// result at `limit`. Upstream order is preserved.
pub fn normalize(events: &[RawEvent], limit: usize) -> Vec<ActivityItem> {
    events
        .iter()
        .filter_map(ActivityItem::from_raw)
        .take(limit)
        .collect()
}
