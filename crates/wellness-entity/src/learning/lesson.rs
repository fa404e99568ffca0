//! Lesson entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    Cardinality, DeletePolicy, EntityDescriptor, LessonId, ModuleId, RelationDef,
};

use super::module::MODULE;

/// A single lesson inside a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Unique lesson identifier.
    pub id: LessonId,
    /// Parent module.
    pub module_id: ModuleId,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Lesson body.
    pub content: Option<String>,
    /// Video link, when the lesson is a video.
    pub video_url: Option<String>,
    /// Position inside the module.
    pub order: i32,
    /// When the lesson was created.
    pub created_at: DateTime<Utc>,
    /// When the lesson was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    /// Parent module.
    pub module_id: ModuleId,
    /// Display title.
    pub title: String,
    /// Lesson body.
    pub content: Option<String>,
    /// Video link.
    pub video_url: Option<String>,
    /// Position inside the module.
    pub order: i32,
}

/// Descriptor of the `lesson` table.
pub static LESSON: EntityDescriptor = EntityDescriptor {
    name: "lesson",
    fields: &[
        "id",
        "moduleId",
        "title",
        "slug",
        "content",
        "videoUrl",
        "order",
        "createdAt",
        "updatedAt",
        "deletedAt",
    ],
    relations: &[RelationDef {
        name: "module",
        target: &MODULE,
        cardinality: Cardinality::One,
        local_key: "moduleId",
        foreign_key: "id",
    }],
    slug_field: Some("slug"),
    unique: &["slug"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &[],
};
