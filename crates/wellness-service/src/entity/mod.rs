//! Name-driven entity access.

pub mod service;

pub use service::GenericService;
