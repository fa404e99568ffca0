//! Campaigns: time-boxed runs of a form across an organization.

pub mod model;

pub use model::{CAMPAIGN, Campaign, NewCampaign};
