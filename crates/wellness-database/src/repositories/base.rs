//! Generic repository base shared by every entity repository.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use wellness_core::AppError;
use wellness_core::config::SlugConfig;
use wellness_core::error::ErrorKind;
use wellness_core::events::RepositoryEvent;
use wellness_core::result::AppResult;
use wellness_core::traits::{FindMany, RepositoryObserver, Store, TracingObserver, UniqueKey};
use wellness_core::types::{
    Document, EntityDescriptor, Filter, QueryDescriptor, QueryResult, SortField,
};

use crate::slug::make_slug;

/// Query execution, soft-delete enforcement, counting, slug lookup and
/// slug-aware creation for one entity, decoding rows into `T`.
#[derive(Debug)]
pub struct GenericRepository<T> {
    store: Arc<dyn Store>,
    entity: &'static EntityDescriptor,
    observer: Arc<dyn RepositoryObserver>,
    slug: SlugConfig,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for GenericRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            entity: self.entity,
            observer: Arc::clone(&self.observer),
            slug: self.slug,
            _record: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> GenericRepository<T> {
    /// Create a repository for `entity` logging through `tracing`.
    pub fn new(store: Arc<dyn Store>, entity: &'static EntityDescriptor) -> Self {
        Self {
            store,
            entity,
            observer: Arc::new(TracingObserver),
            slug: SlugConfig::default(),
            _record: PhantomData,
        }
    }

    /// Replace the event observer.
    pub fn with_observer(mut self, observer: Arc<dyn RepositoryObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replace the slug settings.
    pub fn with_slug_config(mut self, slug: SlugConfig) -> Self {
        self.slug = slug;
        self
    }

    /// The entity this repository serves.
    pub fn entity(&self) -> &'static EntityDescriptor {
        self.entity
    }

    /// The shared store handle.
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Filter, paginate, project and optionally count.
    ///
    /// Names are validated against the entity, the soft-delete default is
    /// applied, and the entity's default eager loads are used when the
    /// query has no projection. With `get_count` the total is read with
    /// the same effective filter in a second, separate store call.
    pub async fn find_with_query(&self, query: &QueryDescriptor) -> AppResult<QueryResult<Document>> {
        self.validate(query)?;
        let soft_delete_applied = query.needs_soft_delete(self.entity.delete_policy);
        let args = FindMany {
            filter: query.effective_filter(self.entity.delete_policy),
            projection: query
                .projection
                .clone()
                .or_else(|| self.entity.default_projection()),
            order_by: query.order_by.clone(),
            skip: query.skip,
            take: query.take,
        };

        let records = self.store.find_many(self.entity, &args).await?;
        let total_count = if query.get_count {
            Some(self.store.count(self.entity, args.filter.as_ref()).await?)
        } else {
            None
        };

        self.emit(RepositoryEvent::QueryExecuted {
            entity: self.entity.name,
            rows: records.len(),
            total_count,
            soft_delete_applied,
        });

        Ok(match total_count {
            Some(total_count) => QueryResult::Counted {
                records,
                total_count,
            },
            None => QueryResult::Records(records),
        })
    }

    /// Count rows matching `query`; every live row when `None`.
    pub async fn count(&self, query: Option<&QueryDescriptor>) -> AppResult<u64> {
        let default = QueryDescriptor::new();
        let query = query.unwrap_or(&default);
        if let Some(filter) = &query.filter {
            filter.validate(self.entity)?;
        }
        let filter = query.effective_filter(self.entity.delete_policy);
        let total = self.store.count(self.entity, filter.as_ref()).await?;

        self.emit(RepositoryEvent::Counted {
            entity: self.entity.name,
            total,
            soft_delete_applied: query.needs_soft_delete(self.entity.delete_policy),
        });
        Ok(total)
    }

    /// Run `query` and decode the page into records.
    pub async fn find_records(&self, query: &QueryDescriptor) -> AppResult<Vec<T>> {
        self.find_with_query(query)
            .await?
            .into_records()
            .into_iter()
            .map(|doc| self.decode(doc))
            .collect()
    }

    /// Every live row with the default eager loads.
    pub async fn find_all(&self) -> AppResult<Vec<T>> {
        self.find_records(&QueryDescriptor::new()).await
    }

    /// Live rows matching `filter`, sorted by `order_by`.
    pub async fn find_many_by(&self, filter: Filter, order_by: &[SortField]) -> AppResult<Vec<T>> {
        let mut query = QueryDescriptor::new().with_filter(filter);
        query.order_by = order_by.to_vec();
        self.find_records(&query).await
    }

    /// First live row matching `filter`.
    pub async fn find_first(&self, filter: Filter) -> AppResult<Option<T>> {
        let query = QueryDescriptor::new().with_filter(filter).with_take(1);
        Ok(self.find_records(&query).await?.into_iter().next())
    }

    /// One live row by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<T>> {
        let key = UniqueKey::id(id.to_string()).guarded(self.live_guard());
        let projection = self.entity.default_projection();
        self.store
            .find_unique(self.entity, &key, projection.as_ref())
            .await?
            .map(|doc| self.decode(doc))
            .transpose()
    }

    /// One live row whose slug equals `slug` exactly.
    pub async fn find_by_slug(&self, slug: &str) -> AppResult<Option<T>> {
        let field = self.slug_field()?;
        self.find_first(Filter::eq(field, slug)).await
    }

    /// One row by slug, soft-deleted or not.
    pub async fn find_by_slug_including_deleted(&self, slug: &str) -> AppResult<Option<T>> {
        let field = self.slug_field()?;
        let projection = self.entity.default_projection();
        self.store
            .find_unique(self.entity, &UniqueKey::field(field, slug), projection.as_ref())
            .await?
            .map(|doc| self.decode(doc))
            .transpose()
    }

    /// Insert a row, assigning `id` and timestamps.
    ///
    /// Every key must be a column of the entity and the completed row must
    /// decode into `T`; otherwise nothing is written.
    pub async fn create(&self, mut data: Document) -> AppResult<T> {
        self.check_columns(&data)?;
        let id = Uuid::new_v4();
        let now = now_value();
        data.insert("id".to_string(), Value::String(id.to_string()));
        data.insert("createdAt".to_string(), now.clone());
        data.insert("updatedAt".to_string(), now);
        if let Some(marker) = self.entity.marker() {
            data.insert(marker.to_string(), Value::Null);
        }
        self.check_row(&data)?;

        let row = self.store.create(self.entity, data).await?;
        self.emit(RepositoryEvent::Created {
            entity: self.entity.name,
            id,
        });
        self.decode(row)
    }

    /// Insert a row with a slug generated from `source`.
    ///
    /// A slug collision surfaces as a `Conflict` from the store; a fresh
    /// suffix is tried up to `slug.max_attempts` times before the conflict
    /// is returned.
    pub async fn create_slugged(&self, source: &str, data: Document) -> AppResult<T> {
        let field = self.slug_field()?;
        let attempts = self.slug.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            let slug = make_slug(source);
            let mut row = data.clone();
            row.insert(field.to_string(), Value::String(slug.clone()));
            match self.create(row).await {
                Err(e) if e.is(ErrorKind::Conflict) && attempt < attempts => {
                    self.emit(RepositoryEvent::SlugConflict {
                        entity: self.entity.name,
                        slug,
                        attempt,
                    });
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Merge `patch` into a live row. `id` and `createdAt` are immutable
    /// and the delete marker is only set through [`Self::delete`].
    ///
    /// The merged row is decoded into `T` before it is written, so a patch
    /// of the wrong shape fails with `Validation` and leaves the row as it was.
    pub async fn update(&self, id: Uuid, mut patch: Document) -> AppResult<Option<T>> {
        patch.remove("id");
        patch.remove("createdAt");
        self.check_columns(&patch)?;
        if let Some(marker) = self.entity.marker().filter(|m| patch.contains_key(*m)) {
            return Err(AppError::validation(format!(
                "Field '{marker}' on '{}' is set by delete, not update",
                self.entity.name
            )));
        }
        patch.insert("updatedAt".to_string(), now_value());

        let key = UniqueKey::id(id.to_string()).guarded(self.live_guard());
        let row = match self.store.find_unique(self.entity, &key, None).await? {
            Some(mut merged) => {
                merged.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
                self.check_row(&merged)?;
                self.store.update(self.entity, &key, patch).await?
            }
            None => None,
        };
        self.emit(RepositoryEvent::Updated {
            entity: self.entity.name,
            id,
            found: row.is_some(),
        });
        // Re-read so the default eager loads are present.
        match row {
            Some(_) => self.find_by_id_any(id).await,
            None => Ok(None),
        }
    }

    /// Delete per the entity's policy: soft entities get their marker set
    /// (live rows only), hard entities lose the row.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let key = UniqueKey::id(id.to_string()).guarded(self.live_guard());
        let soft = self.entity.marker();
        let affected = match soft {
            Some(marker) => {
                let now = now_value();
                let mut patch = Document::new();
                patch.insert(marker.to_string(), now.clone());
                patch.insert("updatedAt".to_string(), now);
                self.store.update(self.entity, &key, patch).await?.is_some()
            }
            None => self.store.delete(self.entity, &key).await?,
        };

        self.emit(RepositoryEvent::Deleted {
            entity: self.entity.name,
            id,
            soft: soft.is_some(),
            affected,
        });
        Ok(affected)
    }

    fn validate(&self, query: &QueryDescriptor) -> AppResult<()> {
        if let Some(filter) = &query.filter {
            filter.validate(self.entity)?;
        }
        if let Some(projection) = &query.projection {
            projection.validate(self.entity)?;
        }
        query
            .order_by
            .iter()
            .try_for_each(|sort| sort.validate(self.entity))
    }

    async fn find_by_id_any(&self, id: Uuid) -> AppResult<Option<T>> {
        let projection = self.entity.default_projection();
        self.store
            .find_unique(self.entity, &UniqueKey::id(id.to_string()), projection.as_ref())
            .await?
            .map(|doc| self.decode(doc))
            .transpose()
    }

    fn check_columns(&self, data: &Document) -> AppResult<()> {
        match data.keys().find(|key| !self.entity.has_field(key)) {
            Some(key) => Err(AppError::validation(format!(
                "Unknown field '{key}' on '{}'",
                self.entity.name
            ))),
            None => Ok(()),
        }
    }

    /// Fails with `Validation` when `row` would not decode into `T`.
    fn check_row(&self, row: &Document) -> AppResult<()> {
        serde_json::from_value::<T>(Value::Object(row.clone()))
            .map(drop)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid '{}' row: {e}", self.entity.name),
                    e,
                )
            })
    }

    fn live_guard(&self) -> Option<Filter> {
        self.entity.marker().map(Filter::is_null)
    }

    fn slug_field(&self) -> AppResult<&'static str> {
        self.entity.slug_field.ok_or_else(|| {
            AppError::invalid_query(format!("Entity '{}' has no slug field", self.entity.name))
        })
    }

    fn decode(&self, doc: Document) -> AppResult<T> {
        serde_json::from_value(Value::Object(doc)).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Failed to decode '{}' row", self.entity.name),
                e,
            )
        })
    }

    fn emit(&self, event: RepositoryEvent) {
        self.observer.on_event(&event);
    }
}

fn now_value() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}
