//! # Forkspot Experiments: Client-Side A/B Assignment
//!
//! Experiment assignment service for the Forkspot apps: variant bucketing,
//! persisted assignment state, and session-scoped exposure tracking.
//!
//! ## Design
//!
//! - **Sticky assignments**: a variant is drawn once per installation and
//!   persisted through an abstract key-value capability ([`kv::KvStore`]);
//!   every later lookup returns the stored variant unchanged.
//! - **Graceful degradation**: storage failures, stale schema versions, and
//!   unknown experiment names never surface to callers. The worst case is a
//!   fallback variant, not a crash or a blocked UI.
//! - **Exposure dedup**: at most one `ExperimentExposed` event per
//!   (experiment, variant) pair per process lifetime.
//!
//! ## Example
//!
//! ```rust,no_run
//! use forkspot_experiments::kv::MemoryKvStore;
//! use forkspot_experiments::tracking::NullSink;
//! use forkspot_experiments::{ExperimentClient, ExperimentConfig, ExperimentRegistry};
//!
//! # async fn example() {
//! let registry = ExperimentRegistry::builder()
//!     .register(ExperimentConfig::new(
//!         "restaurant_card_layout",
//!         ["compact", "extended"],
//!     ))
//!     .build();
//!
//! let client = ExperimentClient::builder(registry, MemoryKvStore::new(), NullSink).build();
//!
//! // First call assigns and persists; later calls return the sticky variant.
//! let variant = client.variant("restaurant_card_layout").await;
//! # let _ = variant;
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod assignment;
pub mod bucketing;
pub mod client;
pub mod error;
pub mod kv;
pub mod registry;
pub mod tracking;

pub use assignment::{Assignment, AssignmentStore};
pub use client::{ExperimentClient, FALLBACK_VARIANT};
pub use error::{Error, Result};
pub use registry::{ExperimentConfig, ExperimentRegistry};
