use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Discrete status of a metric reading, ordered from best to worst.
///
/// # Examples
///
/// ```
/// use pipemon_common::types::StatusLevel;
///
/// let level: StatusLevel = "warning".parse().unwrap();
/// assert_eq!(level, StatusLevel::Warning);
/// assert_eq!(level.to_string(), "warning");
/// assert!(StatusLevel::Critical > StatusLevel::Normal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Normal,
    Warning,
    Critical,
}

impl StatusLevel {
    /// A breach is any non-normal status.
    pub fn is_breach(self) -> bool {
        self != StatusLevel::Normal
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusLevel::Normal => write!(f, "normal"),
            StatusLevel::Warning => write!(f, "warning"),
            StatusLevel::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for StatusLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(StatusLevel::Normal),
            "warning" => Ok(StatusLevel::Warning),
            "critical" => Ok(StatusLevel::Critical),
            _ => Err(format!("unknown status level: {s}")),
        }
    }
}

/// One timestamped measurement for an asset/metric pair.
///
/// Readings are immutable once recorded. `timestamp` is the only relevant
/// ordering key; within a single key the ledger requires timestamps to be
/// strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub asset_id: String,
    pub metric_id: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Frozen copy of the threshold bounds in effect when an alert opened.
///
/// Policies may be edited later; the record keeps the numbers that actually
/// triggered it. Which bounds are present encodes the policy kind: upper
/// only, lower only, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSnapshot {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub near_margin: f64,
}

/// A threshold-breach alert for one asset/metric pair.
///
/// Created when a key transitions out of `Normal`, mutated in place while
/// the breach persists, closed (and immutable from then on) when the key
/// returns to `Normal`. Closed records are retained as history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub asset_id: String,
    pub metric_id: String,
    pub opened_at: DateTime<Utc>,
    /// Absent while the alert is open.
    pub closed_at: Option<DateTime<Utc>>,
    /// Value carried by the worst-level reading observed so far.
    pub peak_value: f64,
    pub peak_level: StatusLevel,
    /// Last value seen for the key before the breach opened, if any.
    pub previous_value: Option<f64>,
    /// Value of the latest reading folded into this record.
    pub current_value: f64,
    pub threshold_snapshot: ThresholdSnapshot,
    /// Resolved once when the alert opened.
    pub recipients: BTreeSet<String>,
}

impl AlertRecord {
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    /// Level the record reports right now: the peak while open, `Normal`
    /// once the key has recovered and the record is closed.
    pub fn current_level(&self) -> StatusLevel {
        if self.is_open() {
            self.peak_level
        } else {
            StatusLevel::Normal
        }
    }

    /// Signed distance of `current_value` past the violated bound, or
    /// `None` while the value sits inside the snapshot bounds.
    ///
    /// Positive for an upper-bound breach, negative for a lower-bound one.
    pub fn excess(&self) -> Option<f64> {
        if let Some(upper) = self.threshold_snapshot.upper {
            if self.current_value >= upper {
                return Some(self.current_value - upper);
            }
        }
        if let Some(lower) = self.threshold_snapshot.lower {
            if self.current_value <= lower {
                return Some(self.current_value - lower);
            }
        }
        None
    }
}

/// Outcome of one ledger ingestion that changed alert state.
///
/// `Opened` and `Closed` are the transitions a notification collaborator
/// acts on; `Updated` carries peak bookkeeping only and requires no new
/// notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AlertTransition {
    Opened(AlertRecord),
    Updated(AlertRecord),
    Closed(AlertRecord),
}

impl AlertTransition {
    pub fn record(&self) -> &AlertRecord {
        match self {
            AlertTransition::Opened(r)
            | AlertTransition::Updated(r)
            | AlertTransition::Closed(r) => r,
        }
    }

    pub fn into_record(self) -> AlertRecord {
        match self {
            AlertTransition::Opened(r)
            | AlertTransition::Updated(r)
            | AlertTransition::Closed(r) => r,
        }
    }
}
