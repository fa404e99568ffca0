//! In-process [`Store`](wellness_core::traits::Store) implementation.
//!
//! Tables are vectors of JSON documents behind a single `RwLock`; filters,
//! sorting and projections are evaluated in memory with the same semantics
//! the repositories expect from a relational backend.

mod matcher;
mod projection;
pub mod seed;
mod sorting;
pub mod store;

pub use store::MemoryStore;
