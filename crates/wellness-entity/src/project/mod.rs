//! Wellness projects run by an organization.

pub mod model;
pub mod status;

pub use model::{NewProject, PROJECT, Project};
pub use status::ProjectStatus;
