//! Organization entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, DeletePolicy, EntityDescriptor, OrganizationId, ProfileId, RelationDef,
};

use super::department::{DEPARTMENT, Department};
use super::member::ORGANIZATION_MEMBER;
use crate::campaign::CAMPAIGN;
use crate::form::FORM;
use crate::profile::PROFILE;
use crate::project::PROJECT;

/// A customer organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique organization identifier.
    pub id: OrganizationId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Profile that owns the organization.
    pub owner_id: Option<ProfileId>,
    /// When the organization was created.
    pub created_at: DateTime<Utc>,
    /// When the organization was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Departments, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departments: Option<Vec<Department>>,
}

/// Data required to create an organization. The slug is generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganization {
    /// Display name.
    pub name: String,
    /// Owning profile.
    pub owner_id: Option<ProfileId>,
}

/// Descriptor of the `organization` table.
pub static ORGANIZATION: EntityDescriptor = EntityDescriptor {
    name: "organization",
    fields: &["id", "name", "slug", "ownerId", "createdAt", "updatedAt", "deletedAt"],
    relations: &[
        RelationDef {
            name: "owner",
            target: &PROFILE,
            cardinality: Cardinality::One,
            local_key: "ownerId",
            foreign_key: "id",
        },
        RelationDef {
            name: "departments",
            target: &DEPARTMENT,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "organizationId",
        },
        RelationDef {
            name: "members",
            target: &ORGANIZATION_MEMBER,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "organizationId",
        },
        RelationDef {
            name: "forms",
            target: &FORM,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "organizationId",
        },
        RelationDef {
            name: "campaigns",
            target: &CAMPAIGN,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "organizationId",
        },
        RelationDef {
            name: "projects",
            target: &PROJECT,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "organizationId",
        },
    ],
    slug_field: Some("slug"),
    unique: &["slug"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &["departments"],
};
