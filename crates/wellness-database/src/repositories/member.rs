//! Organization membership repository.
//!
//! Memberships are hard-deleted, so no soft-delete filter applies here.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{Filter, OrganizationId, OrganizationMemberId, ProfileId, SortField};
use wellness_entity::organization::{
    NewOrganizationMember, ORGANIZATION_MEMBER, OrganizationMember,
};

use super::base::GenericRepository;

/// Repository for organization memberships.
#[derive(Debug, Clone)]
pub struct OrganizationMemberRepository {
    base: GenericRepository<OrganizationMember>,
}

impl OrganizationMemberRepository {
    /// Create a membership repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &ORGANIZATION_MEMBER))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<OrganizationMember>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<OrganizationMember> {
        &self.base
    }

    /// Add a profile to an organization.
    pub async fn create(&self, new: NewOrganizationMember) -> AppResult<OrganizationMember> {
        self.base.create(to_document(&new)?).await
    }

    /// Members of an organization, with their profiles.
    pub async fn find_by_organization_id(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<OrganizationMember>> {
        self.base
            .find_many_by(
                Filter::eq("organizationId", organization_id),
                &[SortField::asc("createdAt")],
            )
            .await
    }

    /// Memberships of a profile.
    pub async fn find_by_profile_id(
        &self,
        profile_id: ProfileId,
    ) -> AppResult<Vec<OrganizationMember>> {
        self.base
            .find_many_by(
                Filter::eq("profileId", profile_id),
                &[SortField::asc("createdAt")],
            )
            .await
    }
}

impl_repository!(
    OrganizationMemberRepository,
    OrganizationMember,
    OrganizationMemberId
);
