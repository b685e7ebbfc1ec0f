//! Read-only queries over alert records.
//!
//! Everything here filters or counts; nothing mutates. Input order is
//! preserved (callers typically pass records newest-first by `opened_at`,
//! as [`crate::ledger::AlertLedger::records`] returns them).

use pipemon_common::types::{AlertRecord, StatusLevel};
use serde::Serialize;
use std::collections::HashMap;

/// Records whose current level is one of `statuses`.
///
/// An open record reports its peak level; a closed one reports `Normal`,
/// so filtering on `Normal` selects recovered history.
pub fn by_status<'a>(
    records: &'a [AlertRecord],
    statuses: &'a [StatusLevel],
) -> impl Iterator<Item = &'a AlertRecord> + 'a {
    records
        .iter()
        .filter(|r| statuses.contains(&r.current_level()))
}

/// Only records still open (breach in progress).
pub fn active_only(records: &[AlertRecord]) -> impl Iterator<Item = &AlertRecord> {
    records.iter().filter(|r| r.is_open())
}

/// Aggregate counts for dashboard tiles.
#[derive(Debug, Clone, Serialize)]
pub struct AlertSummary {
    pub total: u64,
    pub open: u64,
    pub by_level: HashMap<StatusLevel, u64>,
}

/// Count records in total, still open, and by current level.
pub fn summarize(records: &[AlertRecord]) -> AlertSummary {
    let mut by_level: HashMap<StatusLevel, u64> = HashMap::new();
    let mut open = 0;
    for record in records {
        *by_level.entry(record.current_level()).or_insert(0) += 1;
        if record.is_open() {
            open += 1;
        }
    }
    AlertSummary {
        total: records.len() as u64,
        open,
        by_level,
    }
}
