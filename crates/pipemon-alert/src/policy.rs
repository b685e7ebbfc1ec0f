use crate::error::{AlertError, Result};
use pipemon_common::types::ThresholdSnapshot;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which side(s) of the value range a policy alerts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Alert when the value is at or above `upper`.
    UpperBound,
    /// Alert when the value is at or below `lower`.
    LowerBound,
    /// Alert when the value leaves `[lower, upper]`.
    DualBound,
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "upper_bound" | "upper" => Ok(Self::UpperBound),
            "lower_bound" | "lower" => Ok(Self::LowerBound),
            "dual_bound" | "dual" | "range" => Ok(Self::DualBound),
            _ => Err(format!("unknown policy kind: {s}")),
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpperBound => write!(f, "upper_bound"),
            Self::LowerBound => write!(f, "lower_bound"),
            Self::DualBound => write!(f, "dual_bound"),
        }
    }
}

/// Threshold rule governing one metric's alerting behavior.
///
/// `near_margin` is a fraction of the bound itself: with `upper = 1400` and
/// `near_margin = 0.1` the critical cutoff sits at `1540`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    pub metric_id: String,
    pub kind: PolicyKind,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub near_margin: f64,
}

impl ThresholdPolicy {
    pub fn upper_bound(metric_id: impl Into<String>, upper: f64, near_margin: f64) -> Self {
        Self {
            metric_id: metric_id.into(),
            kind: PolicyKind::UpperBound,
            lower: None,
            upper: Some(upper),
            near_margin,
        }
    }

    pub fn lower_bound(metric_id: impl Into<String>, lower: f64, near_margin: f64) -> Self {
        Self {
            metric_id: metric_id.into(),
            kind: PolicyKind::LowerBound,
            lower: Some(lower),
            upper: None,
            near_margin,
        }
    }

    pub fn dual_bound(
        metric_id: impl Into<String>,
        lower: f64,
        upper: f64,
        near_margin: f64,
    ) -> Self {
        Self {
            metric_id: metric_id.into(),
            kind: PolicyKind::DualBound,
            lower: Some(lower),
            upper: Some(upper),
            near_margin,
        }
    }

    /// Check the policy invariants: bounds present for the declared kind,
    /// `lower < upper` when both apply, `near_margin` in `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: &str| {
            Err(AlertError::InvalidPolicy {
                metric_id: self.metric_id.clone(),
                reason: reason.to_string(),
            })
        };

        if !self.near_margin.is_finite() || !(0.0..1.0).contains(&self.near_margin) {
            return fail("near_margin must be a fraction in [0, 1)");
        }

        let lower = match (self.kind, self.lower) {
            (PolicyKind::UpperBound, _) => None,
            (_, Some(l)) if l.is_finite() => Some(l),
            (_, Some(_)) => return fail("lower bound must be finite"),
            (_, None) => return fail("lower bound required for this policy kind"),
        };
        let upper = match (self.kind, self.upper) {
            (PolicyKind::LowerBound, _) => None,
            (_, Some(u)) if u.is_finite() => Some(u),
            (_, Some(_)) => return fail("upper bound must be finite"),
            (_, None) => return fail("upper bound required for this policy kind"),
        };

        if let (Some(l), Some(u)) = (lower, upper) {
            if l >= u {
                return fail("lower bound must be strictly below upper bound");
            }
        }

        Ok(())
    }

    /// Freeze the bounds in effect right now, for storage on an opened
    /// alert record. Only the bounds the kind actually uses are kept.
    pub fn snapshot(&self) -> ThresholdSnapshot {
        let (lower, upper) = match self.kind {
            PolicyKind::UpperBound => (None, self.upper),
            PolicyKind::LowerBound => (self.lower, None),
            PolicyKind::DualBound => (self.lower, self.upper),
        };
        ThresholdSnapshot {
            lower,
            upper,
            near_margin: self.near_margin,
        }
    }
}
