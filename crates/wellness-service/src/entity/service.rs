//! Generic entity service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use wellness_core::error::AppError;
use wellness_core::result::AppResult;
use wellness_core::types::{Document, QueryResult, RawQuery};
use wellness_database::EntityRegistry;

/// String-driven access to any registered entity.
#[derive(Debug, Clone)]
pub struct GenericService {
    /// Entity registry.
    registry: Arc<EntityRegistry>,
}

impl GenericService {
    /// Creates a new generic service.
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Counts live rows of `entity`, optionally narrowed by `raw`.
    pub async fn count(&self, entity: &str, raw: Option<&RawQuery>) -> AppResult<u64> {
        let total = self.registry.count(entity, raw).await?;
        info!(entity, total, "Counted entity");
        Ok(total)
    }

    /// Runs a raw query against `entity`.
    pub async fn find(&self, entity: &str, raw: &RawQuery) -> AppResult<QueryResult<Document>> {
        let result = self.registry.find(entity, raw).await?;
        info!(
            entity,
            rows = result.records().len(),
            total = result.total_count(),
            "Queried entity"
        );
        Ok(result)
    }

    /// Fetches one live row by id.
    pub async fn get_by_id(&self, entity: &str, id: Uuid) -> AppResult<Document> {
        let repo = self.registry.resolve(entity)?;
        repo.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found(format!("{} '{id}' not found", repo.entity().name))
        })
    }

    /// Fetches one live row by exact slug.
    pub async fn get_by_slug(&self, entity: &str, slug: &str) -> AppResult<Document> {
        let repo = self.registry.resolve(entity)?;
        repo.find_by_slug(slug).await?.ok_or_else(|| {
            AppError::not_found(format!(
                "{} with slug '{slug}' not found",
                repo.entity().name
            ))
        })
    }

    /// Every accepted entity name and alias.
    pub fn list_entities(&self) -> Vec<&'static str> {
        self.registry.list_entities()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use wellness_core::error::ErrorKind;
    use wellness_core::traits::Repository;
    use wellness_database::{MemoryStore, Repositories};
    use wellness_entity::learning::NewCourse;

    use super::*;

    async fn setup() -> (GenericService, Repositories) {
        let repos = Repositories::new(Arc::new(MemoryStore::new()));
        let registry = Arc::new(EntityRegistry::from_repositories(&repos));
        (GenericService::new(registry), repos)
    }

    fn new_course(title: &str) -> NewCourse {
        NewCourse {
            trail_id: None,
            title: title.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_and_slug() {
        let (service, repos) = setup().await;
        let course = repos.courses.create(new_course("Mindful Mornings")).await.unwrap();

        let by_id = service
            .get_by_id("courses", course.id.into_uuid())
            .await
            .unwrap();
        assert_eq!(by_id["title"], json!("Mindful Mornings"));

        let by_slug = service.get_by_slug("course", &course.slug).await.unwrap();
        assert_eq!(by_slug["id"], json!(course.id.to_string()));
    }

    #[tokio::test]
    async fn test_absent_and_deleted_rows_are_not_found() {
        let (service, repos) = setup().await;
        let err = service.get_by_id("course", Uuid::new_v4()).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));

        let course = repos.courses.create(new_course("Breathing")).await.unwrap();
        assert!(repos.courses.delete(course.id).await.unwrap());

        let err = service
            .get_by_id("course", course.id.into_uuid())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert!(err.message.starts_with("course '"));

        let err = service.get_by_slug("course", &course.slug).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let (service, _) = setup().await;
        let err = service.count("payroll", None).await.unwrap_err();
        assert!(err.is(ErrorKind::UnknownEntity));

        let err = service.get_by_slug("profile", "anyone").await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidQuery));
    }

    #[tokio::test]
    async fn test_count_and_find() {
        let (service, repos) = setup().await;
        for title in ["One", "Two", "Three"] {
            repos.courses.create(new_course(title)).await.unwrap();
        }

        assert_eq!(service.count("courses", None).await.unwrap(), 3);

        let raw = RawQuery::from_pairs([("take", "2"), ("getCount", "true")]).unwrap();
        let result = service.find("course", &raw).await.unwrap();
        assert_eq!(result.records().len(), 2);
        assert_eq!(result.total_count(), Some(3));

        assert_eq!(service.list_entities().len(), 26);
    }
}
