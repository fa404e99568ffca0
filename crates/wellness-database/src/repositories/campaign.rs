//! Campaign repository.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{CampaignId, Filter, FilterOp, OrganizationId, SortField};
use wellness_entity::campaign::{CAMPAIGN, Campaign, NewCampaign};

use super::base::GenericRepository;

/// Repository for campaigns. The campaign form is eager-loaded.
#[derive(Debug, Clone)]
pub struct CampaignRepository {
    base: GenericRepository<Campaign>,
}

impl CampaignRepository {
    /// Create a campaign repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &CAMPAIGN))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Campaign>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Campaign> {
        &self.base
    }

    /// Create a campaign with a slug derived from its title.
    pub async fn create(&self, new: NewCampaign) -> AppResult<Campaign> {
        let data = to_document(&new)?;
        self.base.create_slugged(&new.title, data).await
    }

    /// Live campaigns running now.
    pub async fn find_active(&self) -> AppResult<Vec<Campaign>> {
        self.find_active_at(Utc::now()).await
    }

    /// Live campaigns whose window `[startsAt, endsAt)` contains `at`.
    pub async fn find_active_at(&self, at: DateTime<Utc>) -> AppResult<Vec<Campaign>> {
        let at = at.to_rfc3339_opts(SecondsFormat::Micros, true);
        let filter = Filter::cond("startsAt", FilterOp::Lte, at.clone())
            .and(Filter::cond("endsAt", FilterOp::Gt, at));
        self.base
            .find_many_by(filter, &[SortField::asc("endsAt")])
            .await
    }

    /// Live campaigns of an organization, latest start first.
    pub async fn find_by_organization_id(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<Campaign>> {
        self.base
            .find_many_by(
                Filter::eq("organizationId", organization_id),
                &[SortField::desc("startsAt")],
            )
            .await
    }
}

impl_repository!(CampaignRepository, Campaign, CampaignId);
