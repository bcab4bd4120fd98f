//! Static experiment configuration.
//!
//! Experiments are compiled into the app: the registry is built once at
//! startup and never mutated afterwards. Adding an experiment is a code
//! change, not a runtime operation.

use std::collections::HashMap;

/// Configuration for a single named experiment.
///
/// `variants` is an ordered list of labels; `weights`, when present, gives
/// the probability mass for the variant at the same index and is intended to
/// sum to 1.0. Neither the length correspondence nor the sum is validated:
/// malformed weights silently degrade at bucketing time (length mismatch
/// falls back to a uniform draw, an under-summing walk falls back to the
/// first variant).
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    name: String,
    variants: Vec<String>,
    weights: Option<Vec<f64>>,
}

impl ExperimentConfig {
    /// Create a config with uniformly-drawn variants.
    #[must_use]
    pub fn new<I, V>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
            weights: None,
        }
    }

    /// Attach per-variant probability masses, index-aligned with `variants`.
    #[must_use]
    pub fn weights(mut self, weights: impl IntoIterator<Item = f64>) -> Self {
        self.weights = Some(weights.into_iter().collect());
        self
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the ordered variant labels.
    #[must_use]
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Get the per-variant weights, if configured.
    #[must_use]
    pub fn weight_table(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}

/// Immutable mapping from experiment name to [`ExperimentConfig`].
///
/// # Example
///
/// ```rust
/// use forkspot_experiments::{ExperimentConfig, ExperimentRegistry};
///
/// let registry = ExperimentRegistry::builder()
///     .register(ExperimentConfig::new("search_ranking", ["distance", "rating"]))
///     .register(
///         ExperimentConfig::new("onboarding_flow", ["short", "long"]).weights([0.8, 0.2]),
///     )
///     .build();
///
/// assert!(registry.get("search_ranking").is_some());
/// assert!(registry.get("typo").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExperimentRegistry {
    experiments: HashMap<String, ExperimentConfig>,
}

impl ExperimentRegistry {
    /// Create a builder for the registry.
    #[must_use]
    pub fn builder() -> ExperimentRegistryBuilder {
        ExperimentRegistryBuilder::default()
    }

    /// Look up an experiment's configuration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ExperimentConfig> {
        self.experiments.get(name)
    }

    /// Number of registered experiments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// Check whether no experiments are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}

/// Builder for [`ExperimentRegistry`].
#[derive(Debug, Default)]
pub struct ExperimentRegistryBuilder {
    experiments: HashMap<String, ExperimentConfig>,
}

impl ExperimentRegistryBuilder {
    /// Register an experiment. A later registration under the same name
    /// replaces the earlier one.
    #[must_use]
    pub fn register(mut self, config: ExperimentConfig) -> Self {
        self.experiments.insert(config.name().to_string(), config);
        self
    }

    /// Build the registry.
    #[must_use]
    pub fn build(self) -> ExperimentRegistry {
        ExperimentRegistry {
            experiments: self.experiments,
        }
    }
}
