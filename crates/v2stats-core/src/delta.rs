//! Delta computation over cumulative counters.

use crate::types::{TrafficDelta, TrafficRecord};

/// Increase of `current` over `last`, never negative.
///
/// `current <= last` means either no traffic or a backend counter reset;
/// both yield zero.
pub fn compute_delta(current: i64, last: i64) -> i64 {
    if current > last {
        current.saturating_sub(last)
    } else {
        0
    }
}

/// Compute both deltas for a record, then move its watermarks to the
/// current totals. The watermark always advances, so traffic lost to a
/// reset is never recovered.
pub fn advance(record: &mut TrafficRecord) -> TrafficDelta {
    let delta = TrafficDelta {
        up: compute_delta(record.up_total, record.last_up),
        down: compute_delta(record.down_total, record.last_down),
    };
    record.last_up = record.up_total;
    record.last_down = record.down_total;
    delta
}
