use chrono::{DateTime, Utc};

/// Errors surfaced by the evaluation core.
///
/// All three kinds are synchronous local validation failures. None are
/// retried internally; re-fetching a dropped reading or fixing a policy is
/// the caller's concern.
///
/// # Examples
///
/// ```rust
/// use pipemon_alert::error::AlertError;
///
/// let err = AlertError::UnknownMetric("pressure_psi".to_string());
/// assert!(err.to_string().contains("pressure_psi"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// Bounds are missing for the declared policy kind, the bounds are
    /// inverted, or the near margin is outside [0, 1).
    #[error("Alert: invalid policy for metric '{metric_id}': {reason}")]
    InvalidPolicy { metric_id: String, reason: String },

    /// The ledger received a timestamp not after the key's last processed
    /// one, and it was not an exact duplicate of the last-seen reading.
    #[error(
        "Alert: out-of-order reading for ({asset_id}, {metric_id}): \
         {timestamp} is not after {last_timestamp}"
    )]
    OutOfOrderReading {
        asset_id: String,
        metric_id: String,
        timestamp: DateTime<Utc>,
        last_timestamp: DateTime<Utc>,
    },

    /// No policy governs the reading's metric.
    #[error("Alert: no policy registered for metric '{0}'")]
    UnknownMetric(String),
}

/// Convenience `Result` alias for evaluation-core operations.
pub type Result<T> = std::result::Result<T, AlertError>;
