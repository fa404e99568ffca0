//! Closed set of entity kinds known to the platform.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use wellness_core::AppError;
use wellness_core::types::{Document, EntityDescriptor};

use crate::campaign::{CAMPAIGN, Campaign};
use crate::form::{ANSWER, Answer, FORM, Form, QUESTION, Question};
use crate::learning::{COURSE, Course, LESSON, Lesson, MODULE, Module, TRAIL, Trail};
use crate::organization::{
    DEPARTMENT, Department, ORGANIZATION, ORGANIZATION_MEMBER, Organization, OrganizationMember,
};
use crate::profile::{PROFILE, Profile};
use crate::project::{PROJECT, Project};

/// One variant per entity. The order of [`EntityKind::ALL`] is the
/// registration order reported by entity listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Profiles.
    Profile,
    /// Organizations.
    Organization,
    /// Organization memberships.
    OrganizationMember,
    /// Departments.
    Department,
    /// Trails.
    Trail,
    /// Courses.
    Course,
    /// Course modules.
    Module,
    /// Lessons.
    Lesson,
    /// Forms.
    Form,
    /// Questions.
    Question,
    /// Answers.
    Answer,
    /// Campaigns.
    Campaign,
    /// Projects.
    Project,
}

impl EntityKind {
    /// Every kind, in registration order.
    pub const ALL: [EntityKind; 13] = [
        Self::Profile,
        Self::Organization,
        Self::OrganizationMember,
        Self::Department,
        Self::Trail,
        Self::Course,
        Self::Module,
        Self::Lesson,
        Self::Form,
        Self::Question,
        Self::Answer,
        Self::Campaign,
        Self::Project,
    ];

    /// Canonical name, identical to the descriptor's table name.
    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    /// Every accepted spelling: the canonical name first, then the
    /// kebab-case plural used in URLs.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Profile => &["profile", "profiles"],
            Self::Organization => &["organization", "organizations"],
            Self::OrganizationMember => &["organizationMember", "organization-members"],
            Self::Department => &["department", "departments"],
            Self::Trail => &["trail", "trails"],
            Self::Course => &["course", "courses"],
            Self::Module => &["module", "modules"],
            Self::Lesson => &["lesson", "lessons"],
            Self::Form => &["form", "forms"],
            Self::Question => &["question", "questions"],
            Self::Answer => &["answer", "answers"],
            Self::Campaign => &["campaign", "campaigns"],
            Self::Project => &["project", "projects"],
        }
    }

    /// Static descriptor of the entity.
    pub fn descriptor(&self) -> &'static EntityDescriptor {
        match self {
            Self::Profile => &PROFILE,
            Self::Organization => &ORGANIZATION,
            Self::OrganizationMember => &ORGANIZATION_MEMBER,
            Self::Department => &DEPARTMENT,
            Self::Trail => &TRAIL,
            Self::Course => &COURSE,
            Self::Module => &MODULE,
            Self::Lesson => &LESSON,
            Self::Form => &FORM,
            Self::Question => &QUESTION,
            Self::Answer => &ANSWER,
            Self::Campaign => &CAMPAIGN,
            Self::Project => &PROJECT,
        }
    }

    /// Check that `row` decodes into this kind's model type.
    pub fn check_row(&self, row: &Document) -> Result<(), serde_json::Error> {
        fn decodes<T: DeserializeOwned>(row: &Document) -> Result<(), serde_json::Error> {
            serde_json::from_value::<T>(Value::Object(row.clone())).map(drop)
        }

        match self {
            Self::Profile => decodes::<Profile>(row),
            Self::Organization => decodes::<Organization>(row),
            Self::OrganizationMember => decodes::<OrganizationMember>(row),
            Self::Department => decodes::<Department>(row),
            Self::Trail => decodes::<Trail>(row),
            Self::Course => decodes::<Course>(row),
            Self::Module => decodes::<Module>(row),
            Self::Lesson => decodes::<Lesson>(row),
            Self::Form => decodes::<Form>(row),
            Self::Question => decodes::<Question>(row),
            Self::Answer => decodes::<Answer>(row),
            Self::Campaign => decodes::<Campaign>(row),
            Self::Project => decodes::<Project>(row),
        }
    }

    /// Resolve a name or alias. Matching is exact and case-sensitive.
    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&alias))
    }

    /// Every accepted name and alias, in registration order.
    pub fn all_aliases() -> impl Iterator<Item = &'static str> {
        Self::ALL
            .into_iter()
            .flat_map(|kind| kind.aliases().iter().copied())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EntityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| AppError::unknown_entity(s, Self::all_aliases()))
    }
}
