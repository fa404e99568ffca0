//! Organization repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{Filter, OrganizationId, ProfileId, SortField};
use wellness_entity::organization::{NewOrganization, ORGANIZATION, Organization};

use super::base::GenericRepository;

/// Repository for organizations. Departments are eager-loaded.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    base: GenericRepository<Organization>,
}

impl OrganizationRepository {
    /// Create an organization repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &ORGANIZATION))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Organization>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Organization> {
        &self.base
    }

    /// Create an organization with a slug derived from its name.
    pub async fn create(&self, new: NewOrganization) -> AppResult<Organization> {
        let data = to_document(&new)?;
        self.base.create_slugged(&new.name, data).await
    }

    /// Live organizations owned by a profile.
    pub async fn find_by_owner_id(&self, owner_id: ProfileId) -> AppResult<Vec<Organization>> {
        self.base
            .find_many_by(Filter::eq("ownerId", owner_id), &[SortField::asc("name")])
            .await
    }
}

impl_repository!(OrganizationRepository, Organization, OrganizationId);
