//! Core traits defined in `wellness-core` and implemented by other crates.

pub mod observer;
pub mod repository;
pub mod store;

pub use observer::{RecordingObserver, RepositoryObserver, TracingObserver};
pub use repository::{DynRepository, Repository, to_document};
pub use store::{FindMany, Store, UniqueKey};
