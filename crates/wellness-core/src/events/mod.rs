//! Structured events emitted by repositories.
//!
//! Events are delivered to the [`RepositoryObserver`] injected into each
//! repository, which logs them by default and records them in tests.
//!
//! [`RepositoryObserver`]: crate::traits::RepositoryObserver

use serde::Serialize;
use uuid::Uuid;

/// Something a repository did against the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RepositoryEvent {
    /// A page was read.
    QueryExecuted {
        /// Entity name.
        entity: &'static str,
        /// Rows on the page.
        rows: usize,
        /// Filtered total, when requested.
        total_count: Option<u64>,
        /// Whether the soft-delete default was added to the filter.
        soft_delete_applied: bool,
    },
    /// Rows were counted.
    Counted {
        /// Entity name.
        entity: &'static str,
        /// Matching rows.
        total: u64,
        /// Whether the soft-delete default was added to the filter.
        soft_delete_applied: bool,
    },
    /// A row was inserted.
    Created {
        /// Entity name.
        entity: &'static str,
        /// Id of the new row.
        id: Uuid,
    },
    /// A row was patched.
    Updated {
        /// Entity name.
        entity: &'static str,
        /// Target row.
        id: Uuid,
        /// Whether a live row was found.
        found: bool,
    },
    /// A row was deleted.
    Deleted {
        /// Entity name.
        entity: &'static str,
        /// Target row.
        id: Uuid,
        /// Soft (marker set) or hard (row removed).
        soft: bool,
        /// Whether a row changed.
        affected: bool,
    },
    /// A generated slug collided with an existing one.
    SlugConflict {
        /// Entity name.
        entity: &'static str,
        /// The colliding slug.
        slug: String,
        /// Attempt number, starting at 1.
        attempt: u32,
    },
}

impl RepositoryEvent {
    /// Entity the event concerns.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::QueryExecuted { entity, .. }
            | Self::Counted { entity, .. }
            | Self::Created { entity, .. }
            | Self::Updated { entity, .. }
            | Self::Deleted { entity, .. }
            | Self::SlugConflict { entity, .. } => entity,
        }
    }
}
