//! Bounded views over a time-ordered series of readings.
//!
//! All functions borrow sub-slices of the caller's series: nothing is
//! copied or mutated, and the result can be iterated any number of times.
//! The series must already be sorted ascending by timestamp, which is the
//! order readings are recorded in.

use chrono::{DateTime, Utc};
use pipemon_common::types::Reading;

/// Context-window length used by alert cards and KPI tiles.
pub const SPARKLINE_LEN: usize = 12;

/// The last `count` readings, in ascending timestamp order. Returns the
/// whole series when it is shorter than `count`.
pub fn tail(series: &[Reading], count: usize) -> &[Reading] {
    let start = series.len().saturating_sub(count);
    &series[start..]
}

/// All readings with `from <= timestamp <= to`, in ascending order.
///
/// Binary-searches the sorted series; an empty slice is valid output, not
/// an error.
pub fn range(series: &[Reading], from: DateTime<Utc>, to: DateTime<Utc>) -> &[Reading] {
    if from > to {
        return &[];
    }
    let start = series.partition_point(|r| r.timestamp < from);
    let end = series.partition_point(|r| r.timestamp <= to);
    &series[start..end]
}

/// Short trailing window of recent readings, for sparkline context rather
/// than full history.
pub fn sparkline(series: &[Reading]) -> &[Reading] {
    tail(series, SPARKLINE_LEN)
}
