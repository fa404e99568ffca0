//! # wellness-core
//!
//! Core crate for the wellness platform. Contains the repository and store
//! traits, the canonical query descriptor and its normalizer, typed filter,
//! projection and sorting values, entity descriptors, repository events,
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other wellness crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
