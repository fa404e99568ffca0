//! Persistence handle trait.
//!
//! A [`Store`] is the storage collaborator the repositories run against. It
//! receives already-validated filters and projections and never applies the
//! soft-delete default itself: that is the repository's job.

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::{Document, EntityDescriptor, Filter, Projection, SortField};

/// Arguments of [`Store::find_many`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindMany {
    /// Rows must match this filter.
    pub filter: Option<Filter>,
    /// Shape of the returned rows.
    pub projection: Option<Projection>,
    /// Sort keys.
    pub order_by: Vec<SortField>,
    /// Rows to skip.
    pub skip: Option<u64>,
    /// Maximum rows; `None` or `Some(0)` means all.
    pub take: Option<u64>,
}

/// Identifies a single row by a unique field, optionally guarded by an
/// extra filter the row must also satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueKey {
    /// Unique field name.
    pub field: String,
    /// Field value.
    pub value: Value,
    /// Additional condition on the row.
    pub guard: Option<Filter>,
}

impl UniqueKey {
    /// Key on the `id` field.
    pub fn id(id: impl Into<Value>) -> Self {
        Self {
            field: "id".to_string(),
            value: id.into(),
            guard: None,
        }
    }

    /// Key on another unique field.
    pub fn field(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            guard: None,
        }
    }

    /// Add a guard filter.
    pub fn guarded(mut self, guard: Option<Filter>) -> Self {
        self.guard = guard;
        self
    }
}

/// Storage backend trait, one handle shared by every repository.
///
/// Failures (connectivity, constraint violations) are reported as
/// `Persistence` or `Conflict` errors and must reach the caller unchanged.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug + 'static {
    /// Read the rows matching `args`, sorted, paginated and projected.
    async fn find_many(
        &self,
        entity: &'static EntityDescriptor,
        args: &FindMany,
    ) -> AppResult<Vec<Document>>;

    /// Read one row by unique key.
    async fn find_unique(
        &self,
        entity: &'static EntityDescriptor,
        key: &UniqueKey,
        projection: Option<&Projection>,
    ) -> AppResult<Option<Document>>;

    /// Count the rows matching `filter` (all rows when `None`).
    async fn count(
        &self,
        entity: &'static EntityDescriptor,
        filter: Option<&Filter>,
    ) -> AppResult<u64>;

    /// Insert a row and return it as stored.
    ///
    /// Fails with `Conflict` when a unique field already holds the value.
    async fn create(&self, entity: &'static EntityDescriptor, data: Document)
    -> AppResult<Document>;

    /// Merge `data` into the row identified by `key`. Returns `None` when no
    /// row matches.
    async fn update(
        &self,
        entity: &'static EntityDescriptor,
        key: &UniqueKey,
        data: Document,
    ) -> AppResult<Option<Document>>;

    /// Remove the row identified by `key`. Returns whether a row was removed.
    async fn delete(&self, entity: &'static EntityDescriptor, key: &UniqueKey) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
