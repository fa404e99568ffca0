//! Organization domain entities: organizations, their departments, and
//! their member profiles.

pub mod department;
pub mod member;
pub mod model;
pub mod role;

pub use department::{DEPARTMENT, Department, NewDepartment};
pub use member::{NewOrganizationMember, ORGANIZATION_MEMBER, OrganizationMember};
pub use model::{NewOrganization, ORGANIZATION, Organization};
pub use role::MemberRole;
