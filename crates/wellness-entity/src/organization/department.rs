//! Department entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, DeletePolicy, DepartmentId, EntityDescriptor, OrganizationId, RelationDef,
};

use super::model::ORGANIZATION;
use crate::profile::PROFILE;

/// A department inside an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Unique department identifier.
    pub id: DepartmentId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
    /// When the department was created.
    pub created_at: DateTime<Utc>,
    /// When the department was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Display name.
    pub name: String,
}

/// Descriptor of the `department` table.
pub static DEPARTMENT: EntityDescriptor = EntityDescriptor {
    name: "department",
    fields: &["id", "organizationId", "name", "createdAt", "updatedAt", "deletedAt"],
    relations: &[
        RelationDef {
            name: "organization",
            target: &ORGANIZATION,
            cardinality: Cardinality::One,
            local_key: "organizationId",
            foreign_key: "id",
        },
        RelationDef {
            name: "profiles",
            target: &PROFILE,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "departmentId",
        },
    ],
    slug_field: None,
    unique: &[],
    delete_policy: DeletePolicy::SOFT,
    default_include: &[],
};
