//! Trail entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{Cardinality, DeletePolicy, EntityDescriptor, RelationDef, TrailId};

use super::course::{COURSE, Course};

/// A learning trail: an ordered path of courses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    /// Unique trail identifier.
    pub id: TrailId,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the trail was created.
    pub created_at: DateTime<Utc>,
    /// When the trail was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Courses, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<Course>>,
}

/// Data required to create a trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrail {
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
}

/// Descriptor of the `trail` table.
pub static TRAIL: EntityDescriptor = EntityDescriptor {
    name: "trail",
    fields: &[
        "id",
        "title",
        "slug",
        "description",
        "createdAt",
        "updatedAt",
        "deletedAt",
    ],
    relations: &[RelationDef {
        name: "courses",
        target: &COURSE,
        cardinality: Cardinality::Many,
        local_key: "id",
        foreign_key: "trailId",
    }],
    slug_field: Some("slug"),
    unique: &["slug"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &["courses"],
};
