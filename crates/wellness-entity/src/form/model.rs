//! Form entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, DeletePolicy, EntityDescriptor, FormId, OrganizationId, RelationDef,
};

use super::answer::ANSWER;
use super::question::{QUESTION, Question};
use crate::organization::ORGANIZATION;

/// A questionnaire owned by an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    /// Unique form identifier.
    pub id: FormId,
    /// Owning organization; `None` for platform-wide templates.
    pub organization_id: Option<OrganizationId>,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the form was created.
    pub created_at: DateTime<Utc>,
    /// When the form was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Questions, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

/// Data required to create a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewForm {
    /// Owning organization.
    pub organization_id: Option<OrganizationId>,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
}

/// Descriptor of the `form` table.
pub static FORM: EntityDescriptor = EntityDescriptor {
    name: "form",
    fields: &[
        "id",
        "organizationId",
        "title",
        "slug",
        "description",
        "createdAt",
        "updatedAt",
        "deletedAt",
    ],
    relations: &[
        RelationDef {
            name: "organization",
            target: &ORGANIZATION,
            cardinality: Cardinality::One,
            local_key: "organizationId",
            foreign_key: "id",
        },
        RelationDef {
            name: "questions",
            target: &QUESTION,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "formId",
        },
        RelationDef {
            name: "answers",
            target: &ANSWER,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "formId",
        },
    ],
    slug_field: Some("slug"),
    unique: &["slug"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &["questions"],
};
