//! Answer repository.

use std::sync::Arc;

use wellness_core::result::AppResult;
use wellness_core::traits::{Store, to_document};
use wellness_core::types::{AnswerId, Filter, FormId, ProfileId, QuestionId, SortField};
use wellness_entity::form::{ANSWER, Answer, NewAnswer};

use super::base::GenericRepository;

/// Repository for answers. Answers eager-load their question and are
/// hard-deleted.
#[derive(Debug, Clone)]
pub struct AnswerRepository {
    base: GenericRepository<Answer>,
}

impl AnswerRepository {
    /// Create an answer repository over `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_base(GenericRepository::new(store, &ANSWER))
    }

    /// Wrap a configured generic repository.
    pub fn from_base(base: GenericRepository<Answer>) -> Self {
        Self { base }
    }

    /// The underlying generic repository.
    pub fn base(&self) -> &GenericRepository<Answer> {
        &self.base
    }

    /// Submit an answer.
    pub async fn create(&self, new: NewAnswer) -> AppResult<Answer> {
        self.base.create(to_document(&new)?).await
    }

    /// Answers submitted for a form.
    pub async fn find_by_form_id(&self, form_id: FormId) -> AppResult<Vec<Answer>> {
        self.base
            .find_many_by(Filter::eq("formId", form_id), &submitted())
            .await
    }

    /// Answers to one question.
    pub async fn find_by_question_id(&self, question_id: QuestionId) -> AppResult<Vec<Answer>> {
        self.base
            .find_many_by(Filter::eq("questionId", question_id), &submitted())
            .await
    }

    /// Answers submitted by a profile.
    pub async fn find_by_profile_id(&self, profile_id: ProfileId) -> AppResult<Vec<Answer>> {
        self.base
            .find_many_by(Filter::eq("profileId", profile_id), &submitted())
            .await
    }
}

fn submitted() -> [SortField; 1] {
    [SortField::asc("createdAt")]
}

impl_repository!(AnswerRepository, Answer, AnswerId);
