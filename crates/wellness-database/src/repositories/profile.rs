//! Profile repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{
    Condition, DepartmentId, Filter, FilterOp, OrganizationId, ProfileId, Quantifier, SortField,
};
use wellness_entity::profile::{NewProfile, PROFILE, Profile, ProfileRole};

use super::base::GenericRepository;

/// Repository for profiles.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    base: GenericRepository<Profile>,
}

impl ProfileRepository {
    /// Create a profile repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &PROFILE))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Profile>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Profile> {
        &self.base
    }

    /// Create a profile. E-mails are unique across live and deleted
    /// profiles; a duplicate is a `Conflict`.
    pub async fn create(&self, new: NewProfile) -> AppResult<Profile> {
        self.base.create(to_document(&new)?).await
    }

    /// Find a live profile by e-mail (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        let mut condition = Condition::new(FilterOp::Equals, email);
        condition.insensitive = true;
        self.base
            .find_first(Filter::Field {
                field: "email".to_string(),
                condition,
            })
            .await
    }

    /// Live profiles with a platform role.
    pub async fn find_by_role(&self, role: ProfileRole) -> AppResult<Vec<Profile>> {
        self.base
            .find_many_by(Filter::eq("role", role.as_str()), &by_name())
            .await
    }

    /// Live profiles of a department.
    pub async fn find_by_department_id(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<Profile>> {
        self.base
            .find_many_by(Filter::eq("departmentId", department_id), &by_name())
            .await
    }

    /// Live profiles holding a membership in an organization.
    pub async fn find_by_organization_id(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<Profile>> {
        let membership = Filter::relation(
            "memberships",
            Quantifier::Some,
            Filter::eq("organizationId", organization_id),
        );
        self.base.find_many_by(membership, &by_name()).await
    }
}

fn by_name() -> [SortField; 1] {
    [SortField::asc("name")]
}

impl_repository!(ProfileRepository, Profile, ProfileId);
