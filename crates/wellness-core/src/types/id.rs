//! Newtype wrappers around [`uuid::Uuid`] for all domain entity identifiers.
//!
//! Using distinct types prevents accidentally passing a `ProfileId` where a
//! `CourseId` is expected. The wrappers serialize transparently, so stored
//! documents keep plain UUID strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype ID wrapper around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Return a reference to the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl From<$name> for serde_json::Value {
            fn from(id: $name) -> serde_json::Value {
                serde_json::Value::String(id.0.to_string())
            }
        }
    };
}

define_id!(
    /// Unique identifier for an organization.
    OrganizationId
);

define_id!(
    /// Unique identifier for an organization membership.
    OrganizationMemberId
);

define_id!(
    /// Unique identifier for a department.
    DepartmentId
);

define_id!(
    /// Unique identifier for a user profile.
    ProfileId
);

define_id!(
    /// Unique identifier for a learning trail.
    TrailId
);

define_id!(
    /// Unique identifier for a course.
    CourseId
);

define_id!(
    /// Unique identifier for a course module.
    ModuleId
);

define_id!(
    /// Unique identifier for a lesson.
    LessonId
);

define_id!(
    /// Unique identifier for a form / questionnaire.
    FormId
);

define_id!(
    /// Unique identifier for a form question.
    QuestionId
);

define_id!(
    /// Unique identifier for a submitted answer.
    AnswerId
);

define_id!(
    /// Unique identifier for a campaign.
    CampaignId
);

define_id!(
    /// Unique identifier for a project.
    ProjectId
);
