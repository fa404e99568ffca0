//! Profile entity: the people of the platform.

pub mod model;
pub mod role;

pub use model::{NewProfile, PROFILE, Profile};
pub use role::ProfileRole;
