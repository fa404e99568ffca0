//! Department repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{DepartmentId, Filter, OrganizationId, SortField};
use wellness_entity::organization::{DEPARTMENT, Department, NewDepartment};

use super::base::GenericRepository;

/// Repository for departments.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    base: GenericRepository<Department>,
}

impl DepartmentRepository {
    /// Create a department repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &DEPARTMENT))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Department>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Department> {
        &self.base
    }

    /// Create a department.
    pub async fn create(&self, new: NewDepartment) -> AppResult<Department> {
        self.base.create(to_document(&new)?).await
    }

    /// Live departments of an organization, by name.
    pub async fn find_by_organization_id(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<Department>> {
        self.base
            .find_many_by(
                Filter::eq("organizationId", organization_id),
                &[SortField::asc("name")],
            )
            .await
    }
}

impl_repository!(DepartmentRepository, Department, DepartmentId);
