use crate::error::Result;
use crate::policy::{PolicyKind, ThresholdPolicy};
use pipemon_common::types::StatusLevel;

/// Classify a reading value against a threshold policy.
///
/// Pure and deterministic. The boundary is inclusive on the alerting side:
/// a value exactly on a bound is `Warning`. The critical cutoff sits a
/// multiplicative `near_margin` past the bound; with `near_margin == 0` the
/// two cutoffs coincide and the result stays `Warning`.
///
/// Returns `InvalidPolicy` if the policy violates its invariants.
pub fn classify(value: f64, policy: &ThresholdPolicy) -> Result<StatusLevel> {
    policy.validate()?;
    Ok(eval(value, policy))
}

/// Advisory "approaching threshold" predicate: the value still classifies
/// as `Normal` but sits within `near_margin` of a bound.
///
/// Kept separate from [`classify`] so that approaching status can never
/// open an alert; it is display-only.
pub fn is_approaching(value: f64, policy: &ThresholdPolicy) -> Result<bool> {
    policy.validate()?;
    if policy.near_margin <= 0.0 || eval(value, policy).is_breach() {
        return Ok(false);
    }

    let m = policy.near_margin;
    let near_upper = matches!(policy.kind, PolicyKind::UpperBound | PolicyKind::DualBound)
        && policy.upper.is_some_and(|u| value >= u * (1.0 - m));
    let near_lower = matches!(policy.kind, PolicyKind::LowerBound | PolicyKind::DualBound)
        && policy.lower.is_some_and(|l| value <= l * (1.0 + m));

    Ok(near_upper || near_lower)
}

/// Classification core, assuming a validated policy.
///
/// Dual-bound policies evaluate each side independently and keep the worse
/// of the two levels.
pub(crate) fn eval(value: f64, policy: &ThresholdPolicy) -> StatusLevel {
    let margin = policy.near_margin;
    let upper_side = policy
        .upper
        .map(|u| against_upper(value, u, margin))
        .unwrap_or(StatusLevel::Normal);
    let lower_side = policy
        .lower
        .map(|l| against_lower(value, l, margin))
        .unwrap_or(StatusLevel::Normal);

    match policy.kind {
        PolicyKind::UpperBound => upper_side,
        PolicyKind::LowerBound => lower_side,
        PolicyKind::DualBound => upper_side.max(lower_side),
    }
}

fn against_upper(value: f64, upper: f64, margin: f64) -> StatusLevel {
    if margin > 0.0 && value >= upper * (1.0 + margin) {
        StatusLevel::Critical
    } else if value >= upper {
        StatusLevel::Warning
    } else {
        StatusLevel::Normal
    }
}

fn against_lower(value: f64, lower: f64, margin: f64) -> StatusLevel {
    if margin > 0.0 && value <= lower * (1.0 - margin) {
        StatusLevel::Critical
    } else if value <= lower {
        StatusLevel::Warning
    } else {
        StatusLevel::Normal
    }
}
