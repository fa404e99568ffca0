//! Profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, DeletePolicy, DepartmentId, EntityDescriptor, ProfileId, RelationDef,
};

use super::role::ProfileRole;
use crate::form::ANSWER;
use crate::organization::{DEPARTMENT, ORGANIZATION_MEMBER};

/// A person on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique profile identifier.
    pub id: ProfileId,
    /// Login e-mail, unique.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Platform role.
    pub role: ProfileRole,
    /// Department the profile belongs to.
    pub department_id: Option<DepartmentId>,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    /// Login e-mail.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Platform role.
    pub role: ProfileRole,
    /// Department.
    pub department_id: Option<DepartmentId>,
}

/// Descriptor of the `profile` table.
pub static PROFILE: EntityDescriptor = EntityDescriptor {
    name: "profile",
    fields: &[
        "id",
        "email",
        "name",
        "role",
        "departmentId",
        "createdAt",
        "updatedAt",
        "deletedAt",
    ],
    relations: &[
        RelationDef {
            name: "department",
            target: &DEPARTMENT,
            cardinality: Cardinality::One,
            local_key: "departmentId",
            foreign_key: "id",
        },
        RelationDef {
            name: "memberships",
            target: &ORGANIZATION_MEMBER,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "profileId",
        },
        RelationDef {
            name: "answers",
            target: &ANSWER,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "profileId",
        },
    ],
    slug_field: None,
    unique: &["email"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &[],
};
