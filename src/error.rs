//! Error types for the experiment assignment service.
//!
//! Nothing here reaches `ExperimentClient` callers: the store and client
//! collapse every kind into a logged, degraded default (an empty assignment
//! map, a skipped write, a fallback variant). The enum exists so that the
//! degradation contract is explicit and testable, and so that [`crate::kv::KvStore`]
//! implementations have a concrete error to return.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Experiment assignment error types
#[derive(Error, Debug)]
pub enum Error {
    /// Reading from the persistence capability failed (I/O error, malformed
    /// document, quota problems on the host platform).
    #[error("storage read failed: {0}")]
    StorageRead(String),

    /// Writing to the persistence capability failed.
    #[error("storage write failed: {0}")]
    StorageWrite(String),

    /// The persisted document carries a different schema version. The
    /// document is discarded wholesale, never migrated.
    #[error("assignments schema version {found} does not match expected {expected}")]
    SchemaVersionMismatch {
        /// Version found in the persisted document
        found: String,
        /// Version this build writes and expects
        expected: String,
    },

    /// The requested experiment is not in the static registry.
    #[error("unknown experiment: {0}")]
    UnknownExperiment(String),
}
