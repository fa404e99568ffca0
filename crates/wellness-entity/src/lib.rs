//! # wellness-entity
//!
//! Domain entity models for the wellness platform. Every record struct
//! represents one stored row, serialized with camelCase field names, and is
//! paired with a static [`EntityDescriptor`] describing its fields,
//! relations, slug, and delete policy to the generic repository.
//!
//! [`EntityDescriptor`]: wellness_core::types::EntityDescriptor

pub mod campaign;
pub mod form;
pub mod kind;
pub mod learning;
pub mod organization;
pub mod profile;
pub mod project;

pub use kind::EntityKind;
