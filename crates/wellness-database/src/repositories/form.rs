//! Form repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{Filter, FormId, OrganizationId, SortField};
use wellness_entity::form::{FORM, Form, NewForm};

use super::base::GenericRepository;

/// Repository for forms. Questions are eager-loaded.
#[derive(Debug, Clone)]
pub struct FormRepository {
    base: GenericRepository<Form>,
}

impl FormRepository {
    /// Create a form repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &FORM))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Form>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Form> {
        &self.base
    }

    /// Create a form with a slug derived from its title.
    pub async fn create(&self, new: NewForm) -> AppResult<Form> {
        let data = to_document(&new)?;
        self.base.create_slugged(&new.title, data).await
    }

    /// Live forms of an organization, newest first.
    pub async fn find_by_organization_id(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<Form>> {
        self.base
            .find_many_by(
                Filter::eq("organizationId", organization_id),
                &[SortField::desc("createdAt")],
            )
            .await
    }
}

impl_repository!(FormRepository, Form, FormId);
