//! Trail repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::TrailId;
use wellness_entity::learning::{NewTrail, TRAIL, Trail};

use super::base::GenericRepository;

/// Repository for trails.
#[derive(Debug, Clone)]
pub struct TrailRepository {
    base: GenericRepository<Trail>,
}

impl TrailRepository {
    /// Create a trail repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &TRAIL))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Trail>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Trail> {
        &self.base
    }

    /// Create a trail with a slug derived from its title.
    pub async fn create(&self, new: NewTrail) -> AppResult<Trail> {
        let data = to_document(&new)?;
        self.base.create_slugged(&new.title, data).await
    }
}

impl_repository!(TrailRepository, Trail, TrailId);
