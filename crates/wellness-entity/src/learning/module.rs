//! Course module entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, CourseId, DeletePolicy, EntityDescriptor, ModuleId, RelationDef,
};

use super::course::COURSE;
use super::lesson::{LESSON, Lesson};

/// A module of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Unique module identifier.
    pub id: ModuleId,
    /// Parent course.
    pub course_id: CourseId,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Position inside the course.
    pub order: i32,
    /// When the module was created.
    pub created_at: DateTime<Utc>,
    /// When the module was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Lessons, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<Lesson>>,
}

/// Data required to create a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModule {
    /// Parent course.
    pub course_id: CourseId,
    /// Display title.
    pub title: String,
    /// Position inside the course.
    pub order: i32,
}

/// Descriptor of the `module` table.
pub static MODULE: EntityDescriptor = EntityDescriptor {
    name: "module",
    fields: &[
        "id",
        "courseId",
        "title",
        "slug",
        "order",
        "createdAt",
        "updatedAt",
        "deletedAt",
    ],
    relations: &[
        RelationDef {
            name: "course",
            target: &COURSE,
            cardinality: Cardinality::One,
            local_key: "courseId",
            foreign_key: "id",
        },
        RelationDef {
            name: "lessons",
            target: &LESSON,
            cardinality: Cardinality::Many,
            local_key: "id",
            foreign_key: "moduleId",
        },
    ],
    slug_field: Some("slug"),
    unique: &["slug"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &["lessons"],
};
