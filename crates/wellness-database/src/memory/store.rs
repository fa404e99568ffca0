//! In-memory store backed by a `tokio::sync::RwLock`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use wellness_core::AppError;
use wellness_core::result::AppResult;
use wellness_core::traits::{FindMany, Store, UniqueKey};
use wellness_core::types::{Document, EntityDescriptor, Filter, Projection};

use super::matcher::{Tables, matches, values_equal};
use super::projection::project;
use super::seed::{SeedTable, read_seed_file};
use super::sorting::sort_rows;

/// In-process store. Cloning shares the same tables.
///
/// Enforces uniqueness of `id` and of every field listed in the entity's
/// `unique` set, soft-deleted rows included.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the rows of a seed file.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = Self::new();
        store.load(read_seed_file(path).await?).await?;
        Ok(store)
    }

    /// Insert parsed seed tables, enforcing unique constraints.
    pub async fn load(&self, seed: Vec<SeedTable>) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        for SeedTable { entity, rows } in seed {
            let count = rows.len();
            for row in rows {
                insert_row(&mut tables, entity, row)?;
            }
            info!(entity = entity.name, rows = count, "Seeded table");
        }
        Ok(())
    }

    /// Insert a row as given, bypassing the repository layer. Used to set
    /// up fixtures such as already soft-deleted rows.
    pub async fn insert_raw(
        &self,
        entity: &'static EntityDescriptor,
        row: Document,
    ) -> AppResult<Document> {
        let mut tables = self.tables.write().await;
        insert_row(&mut tables, entity, row)
    }

    /// Number of stored rows of `entity`, soft-deleted rows included.
    pub async fn len(&self, entity: &'static EntityDescriptor) -> usize {
        self.tables
            .read()
            .await
            .get(entity.name)
            .map_or(0, Vec::len)
    }
}

fn insert_row(
    tables: &mut Tables,
    entity: &'static EntityDescriptor,
    row: Document,
) -> AppResult<Document> {
    if row.get("id").is_none_or(Value::is_null) {
        return Err(AppError::validation(format!(
            "Rows of '{}' need an id",
            entity.name
        )));
    }
    let table = tables.entry(entity.name).or_default();
    check_unique(entity, table, &row, None)?;
    table.push(row.clone());
    Ok(row)
}

/// Reject `row` when another row (other than index `skip`) already holds
/// one of its unique values.
fn check_unique(
    entity: &'static EntityDescriptor,
    table: &[Document],
    row: &Document,
    skip: Option<usize>,
) -> AppResult<()> {
    for field in std::iter::once(&"id").chain(entity.unique) {
        let Some(value) = row.get(*field).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = table
            .iter()
            .enumerate()
            .any(|(i, other)| Some(i) != skip && other.get(*field) == Some(value));
        if taken {
            return Err(AppError::conflict(format!(
                "Unique constraint failed on '{}.{field}' for value {value}",
                entity.name
            )));
        }
    }
    Ok(())
}

fn position(
    tables: &Tables,
    entity: &'static EntityDescriptor,
    key: &UniqueKey,
) -> Option<usize> {
    tables.get(entity.name)?.iter().position(|row| {
        values_equal(row.get(&key.field).unwrap_or(&Value::Null), &key.value, false)
            && key
                .guard
                .as_ref()
                .is_none_or(|guard| matches(tables, entity, row, guard))
    })
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_many(
        &self,
        entity: &'static EntityDescriptor,
        args: &FindMany,
    ) -> AppResult<Vec<Document>> {
        let tables = self.tables.read().await;
        let Some(table) = tables.get(entity.name) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<&Document> = table
            .iter()
            .filter(|row| {
                args.filter
                    .as_ref()
                    .is_none_or(|f| matches(&tables, entity, row, f))
            })
            .collect();
        sort_rows(&mut rows, &args.order_by);

        let skip = args.skip.unwrap_or(0) as usize;
        let take = match args.take {
            None | Some(0) => usize::MAX,
            Some(n) => n as usize,
        };
        let page: Vec<Document> = rows
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|row| project(&tables, entity, row, args.projection.as_ref()))
            .collect();

        debug!(entity = entity.name, rows = page.len(), "find_many");
        Ok(page)
    }

    async fn find_unique(
        &self,
        entity: &'static EntityDescriptor,
        key: &UniqueKey,
        projection: Option<&Projection>,
    ) -> AppResult<Option<Document>> {
        let tables = self.tables.read().await;
        Ok(position(&tables, entity, key).and_then(|i| {
            tables
                .get(entity.name)
                .and_then(|table| table.get(i))
                .map(|row| project(&tables, entity, row, projection))
        }))
    }

    async fn count(
        &self,
        entity: &'static EntityDescriptor,
        filter: Option<&Filter>,
    ) -> AppResult<u64> {
        let tables = self.tables.read().await;
        let total = tables.get(entity.name).map_or(0, |table| {
            table
                .iter()
                .filter(|row| filter.is_none_or(|f| matches(&tables, entity, row, f)))
                .count()
        });
        Ok(total as u64)
    }

    async fn create(
        &self,
        entity: &'static EntityDescriptor,
        data: Document,
    ) -> AppResult<Document> {
        let mut tables = self.tables.write().await;
        insert_row(&mut tables, entity, data)
    }

    async fn update(
        &self,
        entity: &'static EntityDescriptor,
        key: &UniqueKey,
        data: Document,
    ) -> AppResult<Option<Document>> {
        let mut tables = self.tables.write().await;
        let Some(index) = position(&tables, entity, key) else {
            return Ok(None);
        };
        let table = tables.entry(entity.name).or_default();

        let mut updated = table[index].clone();
        for (field, value) in data {
            if field != "id" {
                updated.insert(field, value);
            }
        }
        check_unique(entity, table, &updated, Some(index))?;
        table[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, entity: &'static EntityDescriptor, key: &UniqueKey) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(index) = position(&tables, entity, key) else {
            return Ok(false);
        };
        tables.entry(entity.name).or_default().remove(index);
        Ok(true)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use wellness_core::error::ErrorKind;
    use wellness_core::types::{Projection, SortField};
    use wellness_entity::learning::{COURSE, MODULE};

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_raw(
                &COURSE,
                doc(json!({ "id": "c1", "title": "Intro", "slug": "intro", "deletedAt": null })),
            )
            .await
            .unwrap();
        for (id, order) in [("m1", 2), ("m2", 1)] {
            store
                .insert_raw(
                    &MODULE,
                    doc(json!({ "id": id, "courseId": "c1", "order": order, "slug": id })),
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_unique_slug_conflicts() {
        let store = seeded().await;
        let err = store
            .create(&COURSE, doc(json!({ "id": "c2", "slug": "intro" })))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(store.len(&COURSE).await, 1);
    }

    #[tokio::test]
    async fn test_include_and_order() {
        let store = seeded().await;
        let rows = store
            .find_many(
                &MODULE,
                &FindMany {
                    order_by: vec![SortField::asc("order")],
                    ..FindMany::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(rows[0]["id"], json!("m2"));

        let include = Projection::include_from_json(&json!({ "modules": true })).unwrap();
        let course = store
            .find_unique(&COURSE, &UniqueKey::id("c1"), Some(&include))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(course["modules"].as_array().map(Vec::len), Some(2));
        assert_eq!(course["title"], json!("Intro"));
    }

    #[tokio::test]
    async fn test_select_keeps_only_listed_fields() {
        let store = seeded().await;
        let select = Projection::select_from_json(&json!({ "id": true, "course": true })).unwrap();
        let rows = store
            .find_many(
                &MODULE,
                &FindMany {
                    projection: Some(select),
                    take: Some(1),
                    ..FindMany::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0]["course"]["slug"], json!("intro"));
    }

    #[tokio::test]
    async fn test_guarded_update_and_delete() {
        let store = seeded().await;
        let guard = Some(Filter::is_null("deletedAt"));
        let patch = doc(json!({ "deletedAt": "2024-05-01T00:00:00Z", "id": "ignored" }));

        let updated = store
            .update(&COURSE, &UniqueKey::id("c1").guarded(guard.clone()), patch.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["id"], json!("c1"));

        // Already deleted: the guard no longer matches.
        let again = store
            .update(&COURSE, &UniqueKey::id("c1").guarded(guard), patch)
            .await
            .unwrap();
        assert!(again.is_none());

        assert!(store.delete(&MODULE, &UniqueKey::id("m1")).await.unwrap());
        assert!(!store.delete(&MODULE, &UniqueKey::id("m1")).await.unwrap());
        assert_eq!(store.count(&MODULE, None).await.unwrap(), 1);
    }
}
