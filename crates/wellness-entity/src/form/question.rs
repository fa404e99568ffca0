//! Question entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, DeletePolicy, EntityDescriptor, FormId, QuestionId, RelationDef,
};

use super::answer::ANSWER;
use super::kind::QuestionKind;
use super::model::FORM;

/// A question of a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique question identifier.
    pub id: QuestionId,
    /// Parent form.
    pub form_id: FormId,
    /// Question text.
    pub text: String,
    /// Input kind.
    pub kind: QuestionKind,
    /// Label grouping related questions in reports.
    pub group: Option<String>,
    /// Allowed options for choice questions.
    #[serde(default)]
    pub options: Vec<String>,
    /// Position inside the form.
    pub order: i32,
    /// When the question was created.
    pub created_at: DateTime<Utc>,
    /// When the question was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    /// Parent form.
    pub form_id: FormId,
    /// Question text.
    pub text: String,
    /// Input kind.
    pub kind: QuestionKind,
    /// Report group label.
    pub group: Option<String>,
    /// Allowed options.
    #[serde(default)]
    pub options: Vec<String>,
    /// Position inside the form.
    pub order: i32,
}

/// Descriptor of the `question` table.
pub static QUESTION: EntityDescriptor = EntityDescriptor {
    name: "question",
    fields: &[
        "id",
        "formId",
        "text",
        "kind",
        "group",
        "options",
        "order",
        "createdAt",
        "updatedAt",
        "deletedAt",
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
            name: "answers",
            target: &ANSWER,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "questionId",
        },
    ],
    slug_field: None,
    unique: &[],
    delete_policy: DeletePolicy::SOFT,
    default_include: &[],
};
