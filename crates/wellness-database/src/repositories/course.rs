//! Course repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{CourseId, Filter, SortField, TrailId};
use wellness_entity::learning::{COURSE, Course, NewCourse};

use super::base::GenericRepository;

/// Repository for courses. Courses eager-load their trail and modules.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    base: GenericRepository<Course>,
}

impl CourseRepository {
    /// Create a course repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &COURSE))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Course>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Course> {
        &self.base
    }

    /// Create a course with a slug derived from its title.
    pub async fn create(&self, new: NewCourse) -> AppResult<Course> {
        let data = to_document(&new)?;
        self.base.create_slugged(&new.title, data).await
    }

    /// Live courses of a trail, oldest first.
    pub async fn find_by_trail_id(&self, trail_id: TrailId) -> AppResult<Vec<Course>> {
        self.base
            .find_many_by(
                Filter::eq("trailId", trail_id),
                &[SortField::asc("createdAt")],
            )
            .await
    }
}

impl_repository!(CourseRepository, Course, CourseId);
