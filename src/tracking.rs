//! Analytics events produced by the experiment service.
//!
//! The service is a producer only: transport, batching, and storage of
//! events belong to the app's analytics dispatch layer. One event kind
//! exists today; new kinds get their own constructor and property bag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Events emitted toward the analytics dispatch layer.
///
/// Serialized adjacently tagged so the JSON matches the analytics wire
/// shape: `{"type": "ExperimentExposed", "properties": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "properties")]
pub enum TrackingEvent {
    /// An assigned variant was observed by a caller for the first time this
    /// process lifetime.
    ExperimentExposed(ExposureProperties),
}

/// Property bag for [`TrackingEvent::ExperimentExposed`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExposureProperties {
    /// Name of the exposed experiment.
    pub experiment_name: String,
    /// The variant the caller observed.
    pub variant: String,
    /// When the exposure was recorded.
    pub exposed_at: DateTime<Utc>,
}

/// Downstream consumer of tracking events.
///
/// Implementations must not block the caller; hand the event to a queue or
/// channel if delivery is slow.
pub trait TrackingSink: Send + Sync {
    /// Deliver one event.
    fn emit(&self, event: TrackingEvent);
}

/// Sink that drops every event, logging it at debug level.
///
/// For tests and for embedders that haven't wired analytics yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TrackingSink for NullSink {
    fn emit(&self, event: TrackingEvent) {
        debug!(?event, "dropping tracking event, no analytics wired");
    }
}
