//! Shared test helpers for repository integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use wellness_core::config::SlugConfig;
use wellness_core::traits::RecordingObserver;
use wellness_core::types::{Document, EntityDescriptor};
use wellness_database::{EntityRegistry, MemoryStore, Repositories};
use wellness_entity::learning::{COURSE, MODULE};

/// A store with every repository and the registry built over it.
pub struct TestApp {
    /// The shared in-memory store.
    pub store: MemoryStore,
    /// Typed repositories.
    pub repos: Repositories,
    /// Name-driven dispatcher over the same repositories.
    pub registry: EntityRegistry,
    /// Every event the repositories emitted.
    pub observer: Arc<RecordingObserver>,
}

impl TestApp {
    /// Create an empty application.
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let observer = Arc::new(RecordingObserver::new());
        let repos = Repositories::with_options(
            Arc::new(store.clone()),
            observer.clone(),
            SlugConfig::default(),
        );
        let registry = EntityRegistry::from_repositories(&repos);
        Self {
            store,
            repos,
            registry,
            observer,
        }
    }

    /// Insert a row as given.
    pub async fn insert(&self, entity: &'static EntityDescriptor, row: Value) -> Document {
        self.store
            .insert_raw(entity, document(row))
            .await
            .expect("Failed to insert fixture row")
    }

    /// Insert a course; `deleted` rows carry a `deletedAt` timestamp.
    /// `minutes_ago` spaces out creation times for ordering assertions.
    pub async fn insert_course(&self, title: &str, slug: &str, deleted: bool, minutes_ago: i64) -> Uuid {
        let id = Uuid::new_v4();
        let created = timestamp(minutes_ago);
        self.insert(
            &COURSE,
            json!({
                "id": id.to_string(),
                "trailId": null,
                "title": title,
                "slug": slug,
                "description": null,
                "createdAt": created,
                "updatedAt": created,
                "deletedAt": if deleted { Value::String(timestamp(0)) } else { Value::Null },
            }),
        )
        .await;
        id
    }

    /// Insert a module of `course_id`.
    pub async fn insert_module(&self, course_id: Uuid, title: &str, order: i32, deleted: bool) -> Uuid {
        let id = Uuid::new_v4();
        let now = timestamp(0);
        self.insert(
            &MODULE,
            json!({
                "id": id.to_string(),
                "courseId": course_id.to_string(),
                "title": title,
                "slug": format!("{}-{order}", title.to_lowercase()),
                "order": order,
                "createdAt": now,
                "updatedAt": now,
                "deletedAt": if deleted { Value::String(now.clone()) } else { Value::Null },
            }),
        )
        .await;
        id
    }

    /// Seed `live` live courses and `deleted` soft-deleted ones. Live
    /// course `n` is titled `Live n` and was created `n` minutes ago.
    pub async fn seed_courses(&self, live: usize, deleted: usize) {
        for n in 0..live {
            self.insert_course(&format!("Live {n}"), &format!("live-{n}"), false, n as i64)
                .await;
        }
        for n in 0..deleted {
            self.insert_course(&format!("Gone {n}"), &format!("gone-{n}"), true, 100 + n as i64)
                .await;
        }
    }
}

/// RFC 3339 timestamp `minutes_ago` minutes in the past.
pub fn timestamp(minutes_ago: i64) -> String {
    (Utc::now() - Duration::minutes(minutes_ago)).to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Unwrap a JSON object literal into a document.
pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected a JSON object, got {other}"),
    }
}
