//! Repository capability traits.
//!
//! [`Repository`] is the typed contract every entity repository
//! implements. [`DynRepository`] is its object-safe, JSON-level twin used by
//! the entity registry to dispatch on an entity name at runtime; every
//! `Repository` gets it for free.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::{Document, EntityDescriptor, QueryDescriptor, QueryResult};

/// Typed repository contract.
///
/// Reads exclude soft-deleted rows unless a method says otherwise. Absent
/// rows are `None`, never a not-found error.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Record type returned by typed reads.
    type Record: Serialize + DeserializeOwned + Send + Sync + 'static;
    /// Identifier type.
    type Id: Copy + Into<Uuid> + From<Uuid> + Send + Sync + 'static;

    /// Static description of the entity.
    fn entity(&self) -> &'static EntityDescriptor;

    /// Every live row, with the default eager loads.
    async fn find_all(&self) -> AppResult<Vec<Self::Record>>;

    /// One live row by id.
    async fn find_by_id(&self, id: Self::Id) -> AppResult<Option<Self::Record>>;

    /// One live row by exact slug.
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Self::Record>>;

    /// Filtered, projected, sorted, paginated read. Projections reshape
    /// rows, so results are documents.
    async fn find_with_query(&self, query: &QueryDescriptor) -> AppResult<QueryResult<Document>>;

    /// Number of rows matching `query` (all live rows when `None`).
    async fn count(&self, query: Option<&QueryDescriptor>) -> AppResult<u64>;

    /// Merge `patch` into a live row.
    async fn update(&self, id: Self::Id, patch: Document) -> AppResult<Option<Self::Record>>;

    /// Delete a row according to the entity's delete policy.
    async fn delete(&self, id: Self::Id) -> AppResult<bool>;
}

/// Object-safe repository used for dispatch by entity name.
#[async_trait]
pub trait DynRepository: Send + Sync + std::fmt::Debug {
    /// Static description of the entity.
    fn entity(&self) -> &'static EntityDescriptor;

    /// See [`Repository::find_all`].
    async fn find_all(&self) -> AppResult<Vec<Document>>;

    /// See [`Repository::find_by_id`].
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>>;

    /// See [`Repository::find_by_slug`].
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Document>>;

    /// See [`Repository::find_with_query`].
    async fn find_with_query(&self, query: &QueryDescriptor) -> AppResult<QueryResult<Document>>;

    /// See [`Repository::count`].
    async fn count(&self, query: Option<&QueryDescriptor>) -> AppResult<u64>;

    /// See [`Repository::update`].
    async fn update(&self, id: Uuid, patch: Document) -> AppResult<Option<Document>>;

    /// See [`Repository::delete`].
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl<R> DynRepository for R
where
    R: Repository + std::fmt::Debug,
{
    fn entity(&self) -> &'static EntityDescriptor {
        Repository::entity(self)
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        Repository::find_all(self)
            .await?
            .iter()
            .map(to_document)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        Repository::find_by_id(self, R::Id::from(id))
            .await?
            .as_ref()
            .map(to_document)
            .transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Document>> {
        Repository::find_by_slug(self, slug)
            .await?
            .as_ref()
            .map(to_document)
            .transpose()
    }

    async fn find_with_query(&self, query: &QueryDescriptor) -> AppResult<QueryResult<Document>> {
        Repository::find_with_query(self, query).await
    }

    async fn count(&self, query: Option<&QueryDescriptor>) -> AppResult<u64> {
        Repository::count(self, query).await
    }

    async fn update(&self, id: Uuid, patch: Document) -> AppResult<Option<Document>> {
        Repository::update(self, R::Id::from(id), patch)
            .await?
            .as_ref()
            .map(to_document)
            .transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Repository::delete(self, R::Id::from(id)).await
    }
}

/// Serialize a record into a document.
pub fn to_document<T: Serialize>(record: &T) -> AppResult<Document> {
    match serde_json::to_value(record)? {
        serde_json::Value::Object(document) => Ok(document),
        other => Err(AppError::internal(format!(
            "Record did not serialize to an object: {other}"
        ))),
    }
}
