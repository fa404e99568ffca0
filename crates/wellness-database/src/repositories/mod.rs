//! Repository implementations for all wellness entities.
//!
//! Every entity repository wraps a [`GenericRepository`] and adds the
//! entity's own finders; [`Repositories`] builds the full set over one
//! shared store.

use std::sync::Arc;

use wellness_core::config::SlugConfig;
use wellness_core::traits::{RepositoryObserver, Store, TracingObserver};
use wellness_entity::campaign::CAMPAIGN;
use wellness_entity::form::{ANSWER, FORM, QUESTION};
use wellness_entity::learning::{COURSE, LESSON, MODULE, TRAIL};
use wellness_entity::organization::{DEPARTMENT, ORGANIZATION, ORGANIZATION_MEMBER};
use wellness_entity::profile::PROFILE;
use wellness_entity::project::PROJECT;

/// Implement [`wellness_core::traits::Repository`] for a wrapper holding a
/// `base: GenericRepository<$record>` field.
macro_rules! impl_repository {
    ($repo:ty, $record:ty, $id:ty) => {
        #[async_trait::async_trait]
        impl wellness_core::traits::Repository for $repo {
            type Record = $record;
            type Id = $id;

            fn entity(&self) -> &'static wellness_core::types::EntityDescriptor {
                self.base.entity()
            }

            async fn find_all(&self) -> wellness_core::AppResult<Vec<$record>> {
                self.base.find_all().await
            }

            async fn find_by_id(&self, id: $id) -> wellness_core::AppResult<Option<$record>> {
                self.base.find_by_id(id.into_uuid()).await
            }

            async fn find_by_slug(&self, slug: &str) -> wellness_core::AppResult<Option<$record>> {
                self.base.find_by_slug(slug).await
            }

            async fn find_with_query(
                &self,
                query: &wellness_core::types::QueryDescriptor,
            ) -> wellness_core::AppResult<
                wellness_core::types::QueryResult<wellness_core::types::Document>,
            > {
                self.base.find_with_query(query).await
            }

            async fn count(
                &self,
                query: Option<&wellness_core::types::QueryDescriptor>,
            ) -> wellness_core::AppResult<u64> {
                self.base.count(query).await
            }

            async fn update(
                &self,
                id: $id,
                patch: wellness_core::types::Document,
            ) -> wellness_core::AppResult<Option<$record>> {
                self.base.update(id.into_uuid(), patch).await
            }

            async fn delete(&self, id: $id) -> wellness_core::AppResult<bool> {
                self.base.delete(id.into_uuid()).await
            }
        }
    };
}

pub mod answer;
pub mod base;
pub mod campaign;
pub mod course;
pub mod department;
pub mod form;
pub mod lesson;
pub mod member;
pub mod module;
pub mod organization;
pub mod profile;
pub mod project;
pub mod question;
pub mod trail;

pub use answer::AnswerRepository;
pub use base::GenericRepository;
pub use campaign::CampaignRepository;
pub use course::CourseRepository;
pub use department::DepartmentRepository;
pub use form::FormRepository;
pub use lesson::LessonRepository;
pub use member::OrganizationMemberRepository;
pub use module::ModuleRepository;
pub use organization::OrganizationRepository;
pub use profile::ProfileRepository;
pub use project::ProjectRepository;
pub use question::QuestionRepository;
pub use trail::TrailRepository;

/// One repository per entity, all sharing a store, an observer and slug
/// settings.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Profiles.
    pub profiles: Arc<ProfileRepository>,
    /// Organizations.
    pub organizations: Arc<OrganizationRepository>,
    /// Organization memberships.
    pub members: Arc<OrganizationMemberRepository>,
    /// Departments.
    pub departments: Arc<DepartmentRepository>,
    /// Trails.
    pub trails: Arc<TrailRepository>,
    /// Courses.
    pub courses: Arc<CourseRepository>,
    /// Course modules.
    pub modules: Arc<ModuleRepository>,
    /// Lessons.
    pub lessons: Arc<LessonRepository>,
    /// Forms.
    pub forms: Arc<FormRepository>,
    /// Questions.
    pub questions: Arc<QuestionRepository>,
    /// Answers.
    pub answers: Arc<AnswerRepository>,
    /// Campaigns.
    pub campaigns: Arc<CampaignRepository>,
    /// Projects.
    pub projects: Arc<ProjectRepository>,
}

impl Repositories {
    /// Build every repository over `store`, logging through `tracing`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::with_options(store, Arc::new(TracingObserver), SlugConfig::default())
    }

    /// Build every repository with an explicit observer and slug settings.
    pub fn with_options(
        store: Arc<dyn Store>,
        observer: Arc<dyn RepositoryObserver>,
        slug: SlugConfig,
    ) -> Self {
        macro_rules! build {
            ($repo:ident, $entity:expr) => {
                Arc::new($repo::from_base(
                    GenericRepository::new(Arc::clone(&store), $entity)
                        .with_observer(Arc::clone(&observer))
                        .with_slug_config(slug),
                ))
            };
        }

        Self {
            profiles: build!(ProfileRepository, &PROFILE),
            organizations: build!(OrganizationRepository, &ORGANIZATION),
            members: build!(OrganizationMemberRepository, &ORGANIZATION_MEMBER),
            departments: build!(DepartmentRepository, &DEPARTMENT),
            trails: build!(TrailRepository, &TRAIL),
            courses: build!(CourseRepository, &COURSE),
            modules: build!(ModuleRepository, &MODULE),
            lessons: build!(LessonRepository, &LESSON),
            forms: build!(FormRepository, &FORM),
            questions: build!(QuestionRepository, &QUESTION),
            answers: build!(AnswerRepository, &ANSWER),
            campaigns: build!(CampaignRepository, &CAMPAIGN),
            projects: build!(ProjectRepository, &PROJECT),
        }
    }
}
