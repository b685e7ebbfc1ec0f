use std::collections::{BTreeSet, HashMap};

/// Per-metric notification recipients with a default fallback set.
///
/// The ledger resolves recipients exactly once when an alert opens; pass
/// `|metric| directory.recipients_for(metric)` as the resolver closure.
#[derive(Debug, Clone, Default)]
pub struct RecipientDirectory {
    by_metric: HashMap<String, BTreeSet<String>>,
    fallback: BTreeSet<String>,
}

impl RecipientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recipients used for metrics with no explicit assignment.
    pub fn set_fallback<I, S>(&mut self, recipients: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback = recipients.into_iter().map(Into::into).collect();
    }

    /// Assign the recipient set for one metric, replacing any previous one.
    pub fn assign<I, S>(&mut self, metric_id: impl Into<String>, recipients: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_metric.insert(
            metric_id.into(),
            recipients.into_iter().map(Into::into).collect(),
        );
    }

    /// Remove a metric's explicit assignment; it falls back afterwards.
    pub fn unassign(&mut self, metric_id: &str) -> bool {
        self.by_metric.remove(metric_id).is_some()
    }

    /// Resolve the recipient set for a metric.
    pub fn recipients_for(&self, metric_id: &str) -> BTreeSet<String> {
        self.by_metric
            .get(metric_id)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
