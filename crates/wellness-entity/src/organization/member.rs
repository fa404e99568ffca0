//! Organization membership entity model.
//!
//! Memberships are join rows and are hard-deleted: removing a member
//! removes the row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, DeletePolicy, EntityDescriptor, OrganizationId, OrganizationMemberId, ProfileId,
    RelationDef,
};

use super::model::ORGANIZATION;
use super::role::MemberRole;
use crate::profile::{PROFILE, Profile};

/// Links a profile to an organization with a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMember {
    /// Unique membership identifier.
    pub id: OrganizationMemberId,
    /// The organization.
    pub organization_id: OrganizationId,
    /// The member profile.
    pub profile_id: ProfileId,
    /// Role inside the organization.
    pub role: MemberRole,
    /// When the membership was created.
    pub created_at: DateTime<Utc>,
    /// When the membership was last updated.
    pub updated_at: DateTime<Utc>,
    /// The member profile, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Box<Profile>>,
}

/// Data required to add a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganizationMember {
    /// The organization.
    pub organization_id: OrganizationId,
    /// The member profile.
    pub profile_id: ProfileId,
    /// Role inside the organization.
    pub role: MemberRole,
}

/// Descriptor of the `organizationMember` table.
pub static ORGANIZATION_MEMBER: EntityDescriptor = EntityDescriptor {
    name: "organizationMember",
    fields: &["id", "organizationId", "profileId", "role", "createdAt", "updatedAt"],
    relations: &[
        RelationDef {
            name: "organization",
            target: &ORGANIZATION,
            cardinality: Cardinality::One,
            local_key: "organizationId",
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
    default_include: &["profile"],
};
