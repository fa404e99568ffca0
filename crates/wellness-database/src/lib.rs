//! # wellness-database
//!
//! Persistence for the wellness platform: the in-memory [`MemoryStore`],
//! the [`GenericRepository`] every entity repository is built on, the
//! per-entity repositories, slug generation, and the [`EntityRegistry`]
//! that dispatches entity names to repositories.

pub mod memory;
pub mod registry;
pub mod repositories;
pub mod slug;

pub use memory::MemoryStore;
pub use registry::EntityRegistry;
pub use repositories::{GenericRepository, Repositories};
pub use slug::make_slug;
