use crate::error::{AlertError, Result};
use crate::policy::ThresholdPolicy;
use std::collections::HashMap;

/// Explicit per-metric policy configuration, passed into evaluation calls.
///
/// One policy per `metric_id`; inserting again replaces the previous rule.
/// There is deliberately no global registry instance.
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    policies: HashMap<String, ThresholdPolicy>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a policy, replacing any existing one for the same metric.
    pub fn insert(&mut self, policy: ThresholdPolicy) -> Result<()> {
        policy.validate()?;
        self.policies.insert(policy.metric_id.clone(), policy);
        Ok(())
    }

    /// Remove a metric's policy. Returns true if one was registered.
    pub fn remove(&mut self, metric_id: &str) -> bool {
        self.policies.remove(metric_id).is_some()
    }

    /// Replace the whole configuration. Nothing changes unless every new
    /// policy validates.
    pub fn replace_all(&mut self, policies: Vec<ThresholdPolicy>) -> Result<()> {
        for policy in &policies {
            policy.validate()?;
        }
        self.policies = policies
            .into_iter()
            .map(|p| (p.metric_id.clone(), p))
            .collect();
        Ok(())
    }

    /// Look up the policy governing a metric.
    pub fn policy_for(&self, metric_id: &str) -> Result<&ThresholdPolicy> {
        self.policies
            .get(metric_id)
            .ok_or_else(|| AlertError::UnknownMetric(metric_id.to_string()))
    }

    pub fn metric_ids(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
