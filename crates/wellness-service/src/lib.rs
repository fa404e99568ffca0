//! # wellness-service
//!
//! Service layer for the wellness platform. Services sit on top of the
//! repositories and the entity registry and turn absent records into
//! `NotFound` errors.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod entity;
pub mod report;

pub use entity::GenericService;
pub use report::{AnswerGroup, FormAnswerReport, GroupedAnswerReport, UNGROUPED};
