//! Core type definitions used across the wellness workspace.

pub mod entity;
pub mod envelope;
pub mod filter;
pub mod id;
pub mod projection;
pub mod query;
pub mod sorting;

pub use entity::{Cardinality, DeletePolicy, EntityDescriptor, RelationDef, SOFT_DELETE_MARKER};
pub use envelope::QueryResult;
pub use filter::{Condition, Filter, FilterOp, Quantifier};
pub use id::*;
pub use projection::{Projection, ProjectionItem};
pub use query::{QueryDescriptor, RawQuery, normalize};
pub use sorting::{SortDirection, SortField};

/// A stored row: a JSON object keyed by field name.
pub type Document = serde_json::Map<String, serde_json::Value>;
