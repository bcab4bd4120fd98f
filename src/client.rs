//! Get-or-assign orchestration with exposure deduplication.
//!
//! One [`ExperimentClient`] is constructed at app start and passed by
//! handle to call sites; it owns the session exposure set and the RNG, so
//! there is no module-level singleton state anywhere in the crate.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use dashmap::DashSet;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{error, info};

use crate::assignment::{Assignment, AssignmentStore, DEFAULT_STORAGE_KEY};
use crate::bucketing::assign_variant;
use crate::error::Error;
use crate::kv::KvStore;
use crate::registry::ExperimentRegistry;
use crate::tracking::{ExposureProperties, TrackingEvent, TrackingSink};

/// Variant label returned when an experiment cannot be resolved at all:
/// the name is not registered, or its config carries no variants.
///
/// Callers cannot distinguish this degraded default from a real assignment;
/// the error log line is the only signal. Deliberate: a misconfigured
/// experiment must never break rendering.
pub const FALLBACK_VARIANT: &str = "control";

/// The experiment assignment service.
///
/// Resolves sticky variants (`get-or-assign`), persists first assignments
/// through an [`AssignmentStore`], and emits one deduplicated
/// `ExperimentExposed` event per (experiment, variant) pair per process
/// lifetime.
///
/// # Example
///
/// ```rust,no_run
/// use forkspot_experiments::kv::MemoryKvStore;
/// use forkspot_experiments::tracking::NullSink;
/// use forkspot_experiments::{ExperimentClient, ExperimentConfig, ExperimentRegistry};
///
/// # async fn example() {
/// let registry = ExperimentRegistry::builder()
///     .register(ExperimentConfig::new("schedule_display", ["inline", "modal"]))
///     .build();
///
/// let client = ExperimentClient::builder(registry, MemoryKvStore::new(), NullSink).build();
/// let variant = client.variant("schedule_display").await;
/// # let _ = variant;
/// # }
/// ```
pub struct ExperimentClient<S, T> {
    registry: ExperimentRegistry,
    store: AssignmentStore<S>,
    sink: T,
    exposed: DashSet<String>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl<S: KvStore, T: TrackingSink> ExperimentClient<S, T> {
    /// Create a builder for the client.
    #[must_use]
    pub fn builder(registry: ExperimentRegistry, kv: S, sink: T) -> ExperimentClientBuilder<S, T> {
        ExperimentClientBuilder::new(registry, kv, sink)
    }

    /// Resolve the variant for `name`, assigning and persisting one on
    /// first call.
    ///
    /// Never fails to the caller: an unknown or variant-less experiment is
    /// logged at error level and resolves to [`FALLBACK_VARIANT`], without
    /// persisting anything or emitting an exposure. Every successful
    /// resolution emits an exposure event, deduplicated per (experiment,
    /// variant) pair for the life of the process.
    pub async fn variant(&self, name: &str) -> String {
        if let Some(existing) = self.store.get(name).await {
            self.expose(name, existing.variant());
            return existing.variant().to_string();
        }

        let Some(config) = self.registry.get(name) else {
            let e = Error::UnknownExperiment(name.to_string());
            error!(error = %e, "resolving to fallback variant");
            return FALLBACK_VARIANT.to_string();
        };

        let chosen = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            assign_variant(config, rng.as_mut()).map(str::to_string)
        };
        let Some(variant) = chosen else {
            error!(
                experiment = name,
                "experiment has no variants configured, resolving to fallback variant"
            );
            return FALLBACK_VARIANT.to_string();
        };

        self.store.save(&Assignment::new(name, &variant)).await;
        self.expose(name, &variant);
        variant
    }

    /// Force the assignment for `name` to `variant`, replacing any existing
    /// record and refreshing its timestamp.
    ///
    /// Debug/testing surface: the label is not validated against the
    /// experiment's configured variant set, no exposure is emitted, and the
    /// exposure dedup state is left untouched.
    pub async fn force_variant(&self, name: &str, variant: &str) {
        info!(experiment = name, variant, "forcing experiment variant");
        self.store.save(&Assignment::new(name, variant)).await;
    }

    /// Read-only snapshot of every persisted assignment.
    pub async fn assignments(&self) -> HashMap<String, Assignment> {
        self.store.load_all().await
    }

    /// Wipe all persisted assignments.
    ///
    /// The next resolution of each experiment re-runs the bucketing draw.
    /// The session exposure set is not touched; only a process restart
    /// clears it.
    pub async fn clear_assignments(&self) {
        self.store.clear_all().await;
    }

    fn expose(&self, name: &str, variant: &str) {
        let key = format!("{name}:{variant}");
        if self.exposed.insert(key) {
            self.sink.emit(TrackingEvent::ExperimentExposed(ExposureProperties {
                experiment_name: name.to_string(),
                variant: variant.to_string(),
                exposed_at: Utc::now(),
            }));
        }
    }
}

/// Builder for [`ExperimentClient`].
pub struct ExperimentClientBuilder<S, T> {
    registry: ExperimentRegistry,
    kv: S,
    sink: T,
    storage_key: String,
    rng: Option<Box<dyn RngCore + Send>>,
}

impl<S: KvStore, T: TrackingSink> ExperimentClientBuilder<S, T> {
    /// Create a new builder with required collaborators.
    #[must_use]
    pub fn new(registry: ExperimentRegistry, kv: S, sink: T) -> Self {
        Self {
            registry,
            kv,
            sink,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            rng: None,
        }
    }

    /// Override the storage key the assignments document lives under.
    #[must_use]
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Inject the random source used for bucketing draws (seeded in tests;
    /// entropy-seeded by default).
    #[must_use]
    pub fn rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Build the [`ExperimentClient`].
    #[must_use]
    pub fn build(self) -> ExperimentClient<S, T> {
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(StdRng::from_entropy()));
        ExperimentClient {
            registry: self.registry,
            store: AssignmentStore::with_key(self.kv, self.storage_key),
            sink: self.sink,
            exposed: DashSet::new(),
            rng: Mutex::new(rng),
        }
    }
}
