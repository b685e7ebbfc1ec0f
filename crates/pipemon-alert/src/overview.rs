//! Per-asset KPI snapshot for dashboard tiles.

use crate::classifier;
use crate::error::Result;
use crate::ledger::AlertLedger;
use crate::registry::PolicyRegistry;
use chrono::{DateTime, Utc};
use pipemon_common::types::{Reading, StatusLevel};
use serde::Serialize;

/// One KPI tile: latest value of a metric with its classification.
#[derive(Debug, Clone, Serialize)]
pub struct KpiStatus {
    pub metric_id: String,
    pub value: f64,
    pub level: StatusLevel,
    /// Advisory only: inside bounds but within the near margin.
    pub approaching: bool,
}

/// Snapshot of one asset's health across all its monitored metrics.
#[derive(Debug, Clone, Serialize)]
pub struct AssetOverview {
    pub asset_id: String,
    /// Timestamp of the newest reading that contributed.
    pub as_of: Option<DateTime<Utc>>,
    pub kpis: Vec<KpiStatus>,
    /// Worst level across all KPIs.
    pub condition: StatusLevel,
    pub open_alerts: usize,
}

/// Build the KPI snapshot for one asset from its latest reading per metric.
///
/// `latest` must hold at most one reading per metric; readings for other
/// assets are ignored. Every covered metric needs a registered policy: a
/// missing one surfaces as `UnknownMetric` rather than a silently green
/// tile.
pub fn asset_overview(
    asset_id: &str,
    latest: &[Reading],
    registry: &PolicyRegistry,
    ledger: &AlertLedger,
) -> Result<AssetOverview> {
    let mut kpis = Vec::new();
    let mut condition = StatusLevel::Normal;
    let mut as_of: Option<DateTime<Utc>> = None;

    for reading in latest.iter().filter(|r| r.asset_id == asset_id) {
        let policy = registry.policy_for(&reading.metric_id)?;
        let level = classifier::classify(reading.value, policy)?;
        let approaching = classifier::is_approaching(reading.value, policy)?;

        condition = condition.max(level);
        as_of = match as_of {
            Some(ts) => Some(ts.max(reading.timestamp)),
            None => Some(reading.timestamp),
        };
        kpis.push(KpiStatus {
            metric_id: reading.metric_id.clone(),
            value: reading.value,
            level,
            approaching,
        });
    }

    Ok(AssetOverview {
        asset_id: asset_id.to_string(),
        as_of,
        kpis,
        condition,
        open_alerts: ledger.open_count_for(asset_id),
    })
}
