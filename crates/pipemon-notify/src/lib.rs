//! Notification boundary for alert transitions.
//!
//! The evaluation core decides *that* an alert exists; delivery belongs to
//! collaborators implementing [`TransitionSink`]. This crate carries the
//! pieces in between: per-metric recipient resolution, severity routing,
//! and the dispatcher that fans transitions out to sinks while keeping a
//! delivery log. No transport is implemented here.

pub mod dispatcher;
pub mod recipients;
pub mod routing;


use anyhow::Result;
use async_trait::async_trait;
use pipemon_common::types::AlertTransition;

/// A delivery collaborator that sends alert transitions somewhere external
/// (mail gateway, webhook, pager).
///
/// Implementations are registered with the
/// [`dispatcher::TransitionDispatcher`] and selected per transition by the
/// routing table.
#[async_trait]
pub trait TransitionSink: Send + Sync {
    /// Delivers the transition through this sink.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails; the dispatcher records the
    /// failure and moves on, it never retries.
    async fn deliver(&self, transition: &AlertTransition) -> Result<()>;

    /// Returns the sink name used in logs and delivery records
    /// (e.g., `"email"`).
    fn sink_name(&self) -> &str;
}

pub use dispatcher::{DeliveryRecord, TransitionDispatcher};
pub use recipients::RecipientDirectory;
pub use routing::SinkRoute;
