//! Lesson repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{Filter, LessonId, ModuleId, SortField};
use wellness_entity::learning::{LESSON, Lesson, NewLesson};

use super::base::GenericRepository;

/// Repository for lessons.
#[derive(Debug, Clone)]
pub struct LessonRepository {
    base: GenericRepository<Lesson>,
}

impl LessonRepository {
    /// Create a lesson repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &LESSON))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Lesson>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Lesson> {
        &self.base
    }

    /// Create a lesson with a slug derived from its title.
    pub async fn create(&self, new: NewLesson) -> AppResult<Lesson> {
        let data = to_document(&new)?;
        self.base.create_slugged(&new.title, data).await
    }

    /// Live lessons of a module in module order.
    pub async fn find_by_module_id(&self, module_id: ModuleId) -> AppResult<Vec<Lesson>> {
        self.base
            .find_many_by(Filter::eq("moduleId", module_id), &[SortField::asc("order")])
            .await
    }
}

impl_repository!(LessonRepository, Lesson, LessonId);
