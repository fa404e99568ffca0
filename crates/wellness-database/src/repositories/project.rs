//! Project repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{Filter, OrganizationId, ProjectId, SortField};
use wellness_entity::project::{NewProject, PROJECT, Project};

use super::base::GenericRepository;

/// Repository for projects.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    base: GenericRepository<Project>,
}

impl ProjectRepository {
    /// Create a project repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &PROJECT))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Project>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Project> {
        &self.base
    }

    /// Create a project with a slug derived from its name.
    pub async fn create(&self, new: NewProject) -> AppResult<Project> {
        let data = to_document(&new)?;
        self.base.create_slugged(&new.name, data).await
    }

    /// Live projects of an organization.
    pub async fn find_by_organization_id(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<Project>> {
        self.base
            .find_many_by(
                Filter::eq("organizationId", organization_id),
                &[SortField::asc("name")],
            )
            .await
    }
}

impl_repository!(ProjectRepository, Project, ProjectId);
