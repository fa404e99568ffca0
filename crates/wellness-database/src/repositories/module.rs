//! Course module repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{CourseId, Filter, ModuleId, SortField};
use wellness_entity::learning::{MODULE, Module, NewModule};

use super::base::GenericRepository;

/// Repository for course modules.
#[derive(Debug, Clone)]
pub struct ModuleRepository {
    base: GenericRepository<Module>,
}

impl ModuleRepository {
    /// Create a module repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &MODULE))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Module>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Module> {
        &self.base
    }

    /// Create a module with a slug derived from its title.
    pub async fn create(&self, new: NewModule) -> AppResult<Module> {
        let data = to_document(&new)?;
        self.base.create_slugged(&new.title, data).await
    }

    /// Live modules of a course in course order.
    pub async fn find_by_course_id(&self, course_id: CourseId) -> AppResult<Vec<Module>> {
        self.base
            .find_many_by(Filter::eq("courseId", course_id), &[SortField::asc("order")])
            .await
    }
}

impl_repository!(ModuleRepository, Module, ModuleId);
