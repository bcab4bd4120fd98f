//! Assignment record - one experiment bound to one variant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted experiment→variant binding for this installation.
///
/// Created once on first resolution and immutable afterwards, except for an
/// explicit forced override (which replaces the record, refreshing
/// `assigned_at`). Field names serialize in camelCase to match the document
/// format the apps already have on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    name: String,
    variant: String,
    assigned_at: DateTime<Utc>,
}

impl Assignment {
    /// Create an assignment stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `name` - The experiment this assignment belongs to
    /// * `variant` - The chosen variant label
    #[must_use]
    pub fn new(name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
            assigned_at: Utc::now(),
        }
    }

    /// Create a builder for constructing an assignment with an explicit
    /// timestamp.
    #[must_use]
    pub fn builder(name: impl Into<String>, variant: impl Into<String>) -> AssignmentBuilder {
        AssignmentBuilder::new(name, variant)
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the assigned variant label.
    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Get the assignment timestamp.
    #[must_use]
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }
}

/// Builder for [`Assignment`].
#[derive(Debug)]
pub struct AssignmentBuilder {
    name: String,
    variant: String,
    assigned_at: DateTime<Utc>,
}

impl AssignmentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
            assigned_at: Utc::now(),
        }
    }

    /// Set a custom assignment timestamp (useful for tests).
    #[must_use]
    pub const fn assigned_at(mut self, assigned_at: DateTime<Utc>) -> Self {
        self.assigned_at = assigned_at;
        self
    }

    /// Build the [`Assignment`].
    #[must_use]
    pub fn build(self) -> Assignment {
        Assignment {
            name: self.name,
            variant: self.variant,
            assigned_at: self.assigned_at,
        }
    }
}
