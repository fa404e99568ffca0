//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, DeletePolicy, EntityDescriptor, OrganizationId, ProjectId, RelationDef,
};

use super::status::ProjectStatus;
use crate::organization::ORGANIZATION;

/// A wellness project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ProjectStatus,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Initial status.
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Descriptor of the `project` table.
pub static PROJECT: EntityDescriptor = EntityDescriptor {
    name: "project",
    fields: &[
        "id",
        "organizationId",
        "name",
        "slug",
        "description",
        "status",
        "createdAt",
        "updatedAt",
        "deletedAt",
    ],
    relations: &[RelationDef {
        name: "organization",
        target: &ORGANIZATION,
        cardinality: Cardinality::One,
        local_key: "organizationId",
        foreign_key: "id",
    }],
    slug_field: Some("slug"),
    unique: &["slug"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &[],
};
