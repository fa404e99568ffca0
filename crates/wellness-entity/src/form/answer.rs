//! Answer entity model.
//!
//! Answers are hard-deleted; there is no `deletedAt` column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wellness_core::types::{
    AnswerId, Cardinality, DeletePolicy, EntityDescriptor, FormId, ProfileId, QuestionId,
    RelationDef,
};

use super::model::FORM;
use super::question::{QUESTION, Question};
use crate::profile::PROFILE;

/// One profile's answer to one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Unique answer identifier.
    pub id: AnswerId,
    /// Form the answer was submitted for.
    pub form_id: FormId,
    /// Question answered.
    pub question_id: QuestionId,
    /// Respondent.
    pub profile_id: ProfileId,
    /// Answer payload; shape depends on the question kind.
    pub value: Value,
    /// When the answer was submitted.
    pub created_at: DateTime<Utc>,
    /// When the answer was last updated.
    pub updated_at: DateTime<Utc>,
    /// Question, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<Box<Question>>,
}

/// Data required to submit an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnswer {
    /// Form.
    pub form_id: FormId,
    /// Question.
    pub question_id: QuestionId,
    /// Respondent.
    pub profile_id: ProfileId,
    /// Answer payload.
    pub value: Value,
}

/// Descriptor of the `answer` table.
pub static ANSWER: EntityDescriptor = EntityDescriptor {
    name: "answer",
    fields: &[
        "id",
        "formId",
        "questionId",
        "profileId",
        "value",
        "createdAt",
        "updatedAt",
    ],
    relations: &[
        RelationDef {
            name: "form",
            target: &FORM,
            cardinality: Cardinality::One,
            local_key: "formId",
            foreign_key: "id",
        },
        RelationDef {
            name: "question",
            target: &QUESTION,
            cardinality: Cardinality::One,
            local_key: "questionId",
            foreign_key: "id",
        },
        RelationDef {
            name: "profile",
            target: &PROFILE,
            cardinality: Cardinality::One,
            local_key: "profileId",
            foreign_key: "id",
        },
    ],
    slug_field: None,
    unique: &[],
    delete_policy: DeletePolicy::Hard,
    default_include: &["question"],
};
