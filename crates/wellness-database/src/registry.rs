//! Entity registry: dispatch by entity name.
//!
//! Maps every [`EntityKind`] (and through it every accepted alias) to the
//! repository serving it, behind the object-safe [`DynRepository`]. The
//! registry is immutable once built.

use std::sync::Arc;

use tracing::debug;

use wellness_core::result::AppResult;
use wellness_core::traits::{DynRepository, Store};
use wellness_core::types::{Document, QueryResult, RawQuery, normalize};
use wellness_entity::EntityKind;

use crate::repositories::Repositories;

/// Name-driven access to every entity repository.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entries: Vec<(EntityKind, Arc<dyn DynRepository>)>,
}

impl EntityRegistry {
    /// Build a registry over `store` with default repository settings.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self::from_repositories(&Repositories::new(store))
    }

    /// Register every repository of the set, in [`EntityKind::ALL`] order.
    pub fn from_repositories(repos: &Repositories) -> Self {
        let entries = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, repository_for(repos, kind)))
            .collect();
        Self { entries }
    }

    /// Resolve a name or alias. Unknown names are an `UnknownEntity` error
    /// listing every valid name.
    pub fn resolve(&self, name: &str) -> AppResult<Arc<dyn DynRepository>> {
        let kind = name.parse::<EntityKind>()?;
        debug!(requested = name, entity = kind.name(), "Resolved entity");
        Ok(self.resolve_kind(kind))
    }

    /// Repository registered for `kind`.
    pub fn resolve_kind(&self, kind: EntityKind) -> Arc<dyn DynRepository> {
        // Entries follow `EntityKind::ALL`, whose order is the discriminant order.
        Arc::clone(&self.entries[kind as usize].1)
    }

    /// Count rows of `entity` matching `query`; all live rows when `None`.
    pub async fn count(&self, entity: &str, query: Option<&RawQuery>) -> AppResult<u64> {
        let repo = self.resolve(entity)?;
        let descriptor = query
            .map(|raw| normalize(raw, repo.entity().delete_policy))
            .transpose()?;
        repo.count(descriptor.as_ref()).await
    }

    /// Run a raw query against `entity`.
    pub async fn find(&self, entity: &str, query: &RawQuery) -> AppResult<QueryResult<Document>> {
        let repo = self.resolve(entity)?;
        let descriptor = normalize(query, repo.entity().delete_policy)?;
        repo.find_with_query(&descriptor).await
    }

    /// Every registered name and alias, in registration order.
    pub fn list_entities(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .flat_map(|(kind, _)| kind.aliases().iter().copied())
            .collect()
    }

    /// Registered kinds, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = EntityKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }
}

fn repository_for(repos: &Repositories, kind: EntityKind) -> Arc<dyn DynRepository> {
    match kind {
        EntityKind::Profile => repos.profiles.clone(),
        EntityKind::Organization => repos.organizations.clone(),
        EntityKind::OrganizationMember => repos.members.clone(),
        EntityKind::Department => repos.departments.clone(),
        EntityKind::Trail => repos.trails.clone(),
        EntityKind::Course => repos.courses.clone(),
        EntityKind::Module => repos.modules.clone(),
        EntityKind::Lesson => repos.lessons.clone(),
        EntityKind::Form => repos.forms.clone(),
        EntityKind::Question => repos.questions.clone(),
        EntityKind::Answer => repos.answers.clone(),
        EntityKind::Campaign => repos.campaigns.clone(),
        EntityKind::Project => repos.projects.clone(),
    }
}

#[cfg(test)]
mod tests {
    use wellness_core::error::ErrorKind;

    use super::*;
    use crate::memory::MemoryStore;

    fn registry() -> EntityRegistry {
        EntityRegistry::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_aliases_resolve_to_same_repository() {
        let registry = registry();
        let a = registry.resolve("organizationMember").unwrap();
        let b = registry.resolve("organization-members").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.entity().name, "organizationMember");
    }

    #[test]
    fn test_unknown_entity_message() {
        let err = registry().resolve("payroll").unwrap_err();
        assert!(err.is(ErrorKind::UnknownEntity));
        assert!(err.message.starts_with("Unknown entity 'payroll'"));
        for name in registry().list_entities() {
            assert!(err.message.contains(name));
        }
    }

    #[test]
    fn test_resolve_kind_matches_entity() {
        let registry = registry();
        for kind in EntityKind::ALL {
            assert_eq!(registry.resolve_kind(kind).entity().name, kind.name());
        }
    }

    #[test]
    fn test_list_entities_in_registration_order() {
        let names = registry().list_entities();
        assert_eq!(names.len(), 26);
        assert_eq!(&names[..4], &["profile", "profiles", "organization", "organizations"]);
        assert_eq!(names.last(), Some(&"projects"));
    }
}
