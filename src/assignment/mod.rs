//! Persisted experiment assignments.
//!
//! One [`Assignment`] binds an experiment to the variant an installation was
//! bucketed into. All assignments live inside a single versioned JSON
//! document under one storage key:
//!
//! ```text
//! {
//!   "assignments": { "<experiment>": { "name", "variant", "assignedAt" } },
//!   "version": "1.0.0"
//! }
//! ```
//!
//! A document with any other `version` is discarded wholesale on load; the
//! assignment set is cheap to regenerate, so there is no migration path.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use forkspot_experiments::assignment::{Assignment, AssignmentStore};
//! use forkspot_experiments::kv::MemoryKvStore;
//!
//! # async fn example() {
//! let store = AssignmentStore::new(MemoryKvStore::new());
//!
//! store.save(&Assignment::new("search_ranking", "distance")).await;
//! let current = store.get("search_ranking").await;
//! # let _ = current;
//! # }
//! ```

mod record;
mod store;

pub use record::{Assignment, AssignmentBuilder};
pub use store::{AssignmentStore, DEFAULT_STORAGE_KEY, STORAGE_SCHEMA_VERSION};
