use crate::classifier;
use crate::error::{AlertError, Result};
use crate::policy::ThresholdPolicy;
use chrono::{DateTime, Utc};
use pipemon_common::id;
use pipemon_common::types::{AlertRecord, AlertTransition, Reading, StatusLevel};
use std::collections::{BTreeSet, HashMap};
use tracing;

/// Key: (asset_id, metric_id)
type LedgerKey = (String, String);

#[derive(Debug, Clone)]
struct LedgerEntry {
    last_level: StatusLevel,
    last_value: f64,
    last_timestamp: DateTime<Utc>,
    open_alert_id: Option<String>,
}

/// Per-key state machine turning classified readings into alert records.
///
/// Single writer per key: ingestion assumes strictly increasing timestamps
/// for each `(asset_id, metric_id)` pair, matching streaming arrival. At
/// most one record per key is open at any time; closed records are retained
/// as history and never deleted here.
#[derive(Debug, Default)]
pub struct AlertLedger {
    entries: HashMap<LedgerKey, LedgerEntry>,
    open_records: HashMap<LedgerKey, AlertRecord>,
    closed_records: Vec<AlertRecord>,
}

impl AlertLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one reading through classification and the transition rules.
    ///
    /// `recipients_for_metric` is consulted exactly once, at the moment a
    /// new record opens; the resolved set is frozen on the record.
    ///
    /// Returns `Ok(None)` when nothing changed (`Normal -> Normal`, or an
    /// exact duplicate of the key's last reading, which is absorbed).
    ///
    /// # Errors
    ///
    /// `InvalidPolicy` if the policy violates its invariants,
    /// `UnknownMetric` if the policy does not govern the reading's metric,
    /// `OutOfOrderReading` if the timestamp does not advance. The ledger is
    /// untouched in every error case.
    pub fn ingest<F>(
        &mut self,
        reading: &Reading,
        policy: &ThresholdPolicy,
        recipients_for_metric: F,
    ) -> Result<Option<AlertTransition>>
    where
        F: FnOnce(&str) -> BTreeSet<String>,
    {
        policy.validate()?;
        if reading.metric_id != policy.metric_id {
            return Err(AlertError::UnknownMetric(reading.metric_id.clone()));
        }

        let key = (reading.asset_id.clone(), reading.metric_id.clone());

        if let Some(entry) = self.entries.get(&key) {
            if reading.timestamp == entry.last_timestamp && reading.value == entry.last_value {
                tracing::debug!(
                    asset_id = %reading.asset_id,
                    metric_id = %reading.metric_id,
                    "Duplicate reading absorbed"
                );
                return Ok(None);
            }
            if reading.timestamp <= entry.last_timestamp {
                return Err(AlertError::OutOfOrderReading {
                    asset_id: reading.asset_id.clone(),
                    metric_id: reading.metric_id.clone(),
                    timestamp: reading.timestamp,
                    last_timestamp: entry.last_timestamp,
                });
            }
        }

        let new_level = classifier::eval(reading.value, policy);
        let previous_value = self.entries.get(&key).map(|e| e.last_value);

        let has_open = self
            .entries
            .get(&key)
            .is_some_and(|e| e.open_alert_id.is_some());

        let transition = match (has_open, new_level.is_breach()) {
            // Normal -> Normal: nothing to do.
            (false, false) => None,

            // Normal -> Warning|Critical: open a fresh record.
            (false, true) => {
                let record = AlertRecord {
                    id: id::mint(),
                    asset_id: reading.asset_id.clone(),
                    metric_id: reading.metric_id.clone(),
                    opened_at: reading.timestamp,
                    closed_at: None,
                    peak_value: reading.value,
                    peak_level: new_level,
                    previous_value,
                    current_value: reading.value,
                    threshold_snapshot: policy.snapshot(),
                    recipients: recipients_for_metric(&reading.metric_id),
                };
                tracing::info!(
                    alert_id = %record.id,
                    asset_id = %reading.asset_id,
                    metric_id = %reading.metric_id,
                    level = %new_level,
                    value = reading.value,
                    "Alert opened"
                );
                self.open_records.insert(key.clone(), record.clone());
                Some(AlertTransition::Opened(record))
            }

            // Breach continues: fold the reading into the open record.
            (true, true) => self.open_records.get_mut(&key).map(|record| {
                record.current_value = reading.value;
                if new_level >= record.peak_level {
                    record.peak_level = new_level;
                    record.peak_value = reading.value;
                }
                AlertTransition::Updated(record.clone())
            }),

            // Back to Normal: close the record, keep it as history.
            (true, false) => self.open_records.remove(&key).map(|mut record| {
                record.closed_at = Some(reading.timestamp);
                record.current_value = reading.value;
                tracing::info!(
                    alert_id = %record.id,
                    asset_id = %reading.asset_id,
                    metric_id = %reading.metric_id,
                    "Alert closed"
                );
                self.closed_records.push(record.clone());
                AlertTransition::Closed(record)
            }),
        };

        let open_alert_id = self
            .open_records
            .get(&key)
            .map(|record| record.id.clone());
        self.entries.insert(
            key,
            LedgerEntry {
                last_level: new_level,
                last_value: reading.value,
                last_timestamp: reading.timestamp,
                open_alert_id,
            },
        );

        Ok(transition)
    }

    /// The open record for a key, if a breach is in progress.
    pub fn open_record(&self, asset_id: &str, metric_id: &str) -> Option<&AlertRecord> {
        self.open_records
            .get(&(asset_id.to_string(), metric_id.to_string()))
    }

    /// Last classified level for a key, if it has ever been ingested.
    pub fn last_level(&self, asset_id: &str, metric_id: &str) -> Option<StatusLevel> {
        self.entries
            .get(&(asset_id.to_string(), metric_id.to_string()))
            .map(|e| e.last_level)
    }

    /// All records, open and closed, newest first by `opened_at`.
    pub fn records(&self) -> Vec<AlertRecord> {
        let mut all: Vec<AlertRecord> = self
            .open_records
            .values()
            .chain(self.closed_records.iter())
            .cloned()
            .collect();
        all.sort_by(|a, b| b.opened_at.cmp(&a.opened_at));
        all
    }

    pub fn open_count(&self) -> usize {
        self.open_records.len()
    }

    /// Number of breaches currently open for one asset.
    pub fn open_count_for(&self, asset_id: &str) -> usize {
        self.open_records
            .keys()
            .filter(|(asset, _)| asset == asset_id)
            .count()
    }
}
