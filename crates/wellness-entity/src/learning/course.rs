//! Course entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, CourseId, DeletePolicy, EntityDescriptor, RelationDef, TrailId,
};

use super::module::{MODULE, Module};
use super::trail::{TRAIL, Trail};

/// A course, optionally part of a trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Parent trail.
    pub trail_id: Option<TrailId>,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the course was created.
    pub created_at: DateTime<Utc>,
    /// When the course was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Parent trail, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail: Option<Box<Trail>>,
    /// Modules, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<Module>>,
}

/// Data required to create a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    /// Parent trail.
    pub trail_id: Option<TrailId>,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
}

/// Descriptor of the `course` table.
pub static COURSE: EntityDescriptor = EntityDescriptor {
    name: "course",
    fields: &[
        "id",
        "trailId",
        "title",
        "slug",
        "description",
        "createdAt",
        "updatedAt",
        "deletedAt",
    ],
    relations: &[
        RelationDef {
            name: "trail",
            target: &TRAIL,
            cardinality: Cardinality::One,
            local_key: "trailId",
            foreign_key: "id",
        },
        RelationDef {
            name: "modules",
            target: &MODULE,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "courseId",
        },
    ],
    slug_field: Some("slug"),
    unique: &["slug"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &["trail", "modules"],
};
