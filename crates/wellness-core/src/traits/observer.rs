//! Injectable sink for repository events.

use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::events::RepositoryEvent;

/// Receives every [`RepositoryEvent`] a repository emits.
pub trait RepositoryObserver: Send + Sync + std::fmt::Debug + 'static {
    /// Handle one event.
    fn on_event(&self, event: &RepositoryEvent);
}

/// Default observer: forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RepositoryObserver for TracingObserver {
    fn on_event(&self, event: &RepositoryEvent) {
        match event {
            RepositoryEvent::QueryExecuted {
                entity,
                rows,
                total_count,
                soft_delete_applied,
            } => debug!(
                entity,
                rows,
                total_count = ?total_count,
                soft_delete_applied,
                "Query executed"
            ),
            RepositoryEvent::Counted {
                entity,
                total,
                soft_delete_applied,
            } => debug!(entity, total, soft_delete_applied, "Rows counted"),
            RepositoryEvent::Created { entity, id } => info!(entity, %id, "Record created"),
            RepositoryEvent::Updated { entity, id, found } => {
                info!(entity, %id, found, "Record updated")
            }
            RepositoryEvent::Deleted {
                entity,
                id,
                soft,
                affected,
            } => info!(entity, %id, soft, affected, "Record deleted"),
            RepositoryEvent::SlugConflict {
                entity,
                slug,
                attempt,
            } => warn!(entity, slug, attempt, "Slug collision, retrying"),
        }
    }
}

/// Observer that keeps every event in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<RepositoryEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first.
    pub fn events(&self) -> Vec<RepositoryEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Forget every recorded event.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl RepositoryObserver for RecordingObserver {
    fn on_event(&self, event: &RepositoryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_event(&RepositoryEvent::Counted {
            entity: "course",
            total: 3,
            soft_delete_applied: true,
        });
        observer.on_event(&RepositoryEvent::Counted {
            entity: "lesson",
            total: 1,
            soft_delete_applied: false,
        });
        let events = observer.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].entity(), "course");
        assert_eq!(events[1].entity(), "lesson");

        observer.clear();
        assert!(observer.events().is_empty());
    }
}
