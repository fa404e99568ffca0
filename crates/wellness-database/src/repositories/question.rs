//! Question repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{Filter, FormId, QuestionId, SortField};
use wellness_entity::form::{NewQuestion, QUESTION, Question};

use super::base::GenericRepository;

/// Repository for questions.
#[derive(Debug, Clone)]
pub struct QuestionRepository {
    base: GenericRepository<Question>,
}

impl QuestionRepository {
    /// Create a question repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &QUESTION))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Question>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Question> {
        &self.base
    }

    /// Create a question.
    pub async fn create(&self, new: NewQuestion) -> AppResult<Question> {
        self.base.create(to_document(&new)?).await
    }

    /// Live questions of a form in form order.
    pub async fn find_by_form_id(&self, form_id: FormId) -> AppResult<Vec<Question>> {
        self.base
            .find_many_by(Filter::eq("formId", form_id), &form_order())
            .await
    }

    /// Live questions carrying a group label, in form order.
    pub async fn find_by_group(&self, group: &str) -> AppResult<Vec<Question>> {
        self.base
            .find_many_by(Filter::eq("group", group), &form_order())
            .await
    }
}

/// Form order: position, then creation time.
fn form_order() -> [SortField; 2] {
    [SortField::asc("order"), SortField::asc("createdAt")]
}

impl_repository!(QuestionRepository, Question, QuestionId);
