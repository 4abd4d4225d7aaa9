//! Last-seen tweet ID tracking.
//!
//! The watermark lives in memory only; on restart it resets to 0 and the
//! bridge re-delivers history.

use serde_json::Value;
use twitter_client::status_id;

/// Advance the watermark over one batch: the maximum of the current value
/// and every parseable tweet ID in the batch. Never decreases; an empty
/// batch (or one with no parseable IDs) leaves it unchanged.
pub fn advance(current: u64, statuses: &[Value]) -> u64 {
    statuses.iter().filter_map(status_id).fold(current, u64::max)
}
