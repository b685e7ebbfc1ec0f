use crate::routing::SinkRoute;
use crate::TransitionSink;
use chrono::{DateTime, Utc};
use pipemon_common::types::AlertTransition;
use serde::Serialize;
use std::collections::BTreeSet;
use tokio::sync::Mutex;
use tracing;

/// One delivery attempt, kept for bookkeeping (the "email sent" badge on
/// an alert card reads from this).
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryRecord {
    pub alert_id: String,
    pub sink: String,
    pub recipients: BTreeSet<String>,
    pub delivered: bool,
    pub at: DateTime<Utc>,
}

/// Fans `Opened` and `Closed` transitions out to routed sinks.
///
/// `Updated` transitions carry peak bookkeeping only and are never
/// dispatched. Every attempt, failed or not, is appended to the delivery
/// log; failures are logged and left to the collaborator to retry.
pub struct TransitionDispatcher {
    sinks: Vec<Box<dyn TransitionSink>>,
    routes: Vec<SinkRoute>,
    log: Mutex<Vec<DeliveryRecord>>,
}

impl TransitionDispatcher {
    pub fn new(sinks: Vec<Box<dyn TransitionSink>>, routes: Vec<SinkRoute>) -> Self {
        Self {
            sinks,
            routes,
            log: Mutex::new(Vec::new()),
        }
    }

    pub async fn dispatch(&self, transition: &AlertTransition) {
        let record = transition.record();

        if matches!(transition, AlertTransition::Updated(_)) {
            tracing::debug!(
                alert_id = %record.id,
                "Update transition recorded, no notification required"
            );
            return;
        }

        for route in &self.routes {
            if !route.should_send(record.peak_level) {
                continue;
            }
            let Some(sink) = self.sinks.get(route.sink_index) else {
                continue;
            };

            let delivered = match sink.deliver(transition).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(
                        sink = sink.sink_name(),
                        alert_id = %record.id,
                        error = %e,
                        "Failed to deliver alert transition"
                    );
                    false
                }
            };

            self.log.lock().await.push(DeliveryRecord {
                alert_id: record.id.clone(),
                sink: sink.sink_name().to_string(),
                recipients: record.recipients.clone(),
                delivered,
                at: Utc::now(),
            });
        }
    }

    /// Snapshot of all delivery attempts so far, oldest first.
    pub async fn delivery_log(&self) -> Vec<DeliveryRecord> {
        self.log.lock().await.clone()
    }

    pub fn sinks(&self) -> &[Box<dyn TransitionSink>] {
        &self.sinks
    }
}
