//! Versioned persistence for experiment assignments.
//!
//! The store is best-effort by contract: every public operation degrades to
//! an empty result or a no-op on failure, logging instead of propagating.
//! Losing an assignment only causes a re-draw on the next resolution, so
//! resilience wins over strictness here. The internal `try_*` methods keep
//! the failure taxonomy explicit; the public surface is the adapter that
//! collapses it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Assignment;
use crate::kv::KvStore;
use crate::{Error, Result};

/// Schema version written into every persisted document.
///
/// A loaded document with any other version is discarded, not migrated.
pub const STORAGE_SCHEMA_VERSION: &str = "1.0.0";

/// Storage key the assignments document lives under by default.
pub const DEFAULT_STORAGE_KEY: &str = "experiments";

/// The persisted envelope: the full assignment set plus its schema version.
#[derive(Debug, Serialize, Deserialize)]
struct AssignmentsDocument {
    assignments: HashMap<String, Assignment>,
    version: String,
}

/// Durable mapping from experiment name to [`Assignment`], stored as a
/// single versioned JSON document behind a [`KvStore`].
///
/// Writes are whole-document read-modify-write with no compare-and-swap:
/// two in-flight saves can clobber one another, last write wins. Accepted
/// for this subsystem; see the lost-update test in `tests/store_test.rs`.
pub struct AssignmentStore<S> {
    kv: S,
    key: String,
}

impl<S: KvStore> AssignmentStore<S> {
    /// Create a store over `kv` using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, DEFAULT_STORAGE_KEY)
    }

    /// Create a store over `kv` with a custom storage key.
    #[must_use]
    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Load the full assignment mapping.
    ///
    /// Never fails observably: a missing document yields an empty map, a
    /// document with a stale schema version is lazily deleted and yields an
    /// empty map, and any read or parse failure is logged and yields an
    /// empty map.
    pub async fn load_all(&self) -> HashMap<String, Assignment> {
        match self.try_load_all().await {
            Ok(assignments) => assignments,
            Err(Error::SchemaVersionMismatch { found, expected }) => {
                warn!(
                    found = %found,
                    expected = %expected,
                    "discarding assignments document with stale schema version"
                );
                if let Err(e) = self.kv.remove(&self.key).await {
                    warn!(error = %e, "failed to discard stale assignments document");
                }
                HashMap::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to load assignments, treating as empty");
                HashMap::new()
            }
        }
    }

    /// Persist `assignment`, overwriting any existing entry for the same
    /// experiment. Failure is logged and swallowed.
    pub async fn save(&self, assignment: &Assignment) {
        if let Err(e) = self.try_save(assignment).await {
            warn!(
                experiment = assignment.name(),
                error = %e,
                "failed to persist assignment"
            );
        }
    }

    /// Remove the persisted document entirely. Failure is logged, not
    /// surfaced.
    pub async fn clear_all(&self) {
        if let Err(e) = self.kv.remove(&self.key).await {
            warn!(error = %e, "failed to clear assignments");
        }
    }

    /// Get the assignment for one experiment, if any.
    pub async fn get(&self, name: &str) -> Option<Assignment> {
        self.load_all().await.remove(name)
    }

    async fn try_load_all(&self) -> Result<HashMap<String, Assignment>> {
        let Some(raw) = self.kv.get(&self.key).await? else {
            return Ok(HashMap::new());
        };
        let document: AssignmentsDocument =
            serde_json::from_str(&raw).map_err(|e| Error::StorageRead(e.to_string()))?;
        if document.version != STORAGE_SCHEMA_VERSION {
            return Err(Error::SchemaVersionMismatch {
                found: document.version,
                expected: STORAGE_SCHEMA_VERSION.to_string(),
            });
        }
        Ok(document.assignments)
    }

    async fn try_save(&self, assignment: &Assignment) -> Result<()> {
        // Whole-document read-modify-write over the forgiving load, so a
        // broken document is replaced rather than wedging writes forever.
        let mut assignments = self.load_all().await;
        assignments.insert(assignment.name().to_string(), assignment.clone());
        let document = AssignmentsDocument {
            assignments,
            version: STORAGE_SCHEMA_VERSION.to_string(),
        };
        let raw =
            serde_json::to_string(&document).map_err(|e| Error::StorageWrite(e.to_string()))?;
        self.kv.set(&self.key, raw).await
    }
}
