//! Campaign entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wellness_core::types::{
    CampaignId, Cardinality, DeletePolicy, EntityDescriptor, FormId, OrganizationId, RelationDef,
};

use crate::form::{FORM, Form};
use crate::organization::ORGANIZATION;

/// A form distributed to an organization during a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Unique campaign identifier.
    pub id: CampaignId,
    /// Target organization.
    pub organization_id: OrganizationId,
    /// Form answered during the campaign.
    pub form_id: FormId,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Start of the window, inclusive.
    pub starts_at: DateTime<Utc>,
    /// End of the window, exclusive.
    pub ends_at: DateTime<Utc>,
    /// When the campaign was created.
    pub created_at: DateTime<Utc>,
    /// When the campaign was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Form, when eager-loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<Box<Form>>,
}

impl Campaign {
    /// Whether `now` falls inside the campaign window.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.ends_at
    }
}

/// Data required to create a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    /// Target organization.
    pub organization_id: OrganizationId,
    /// Form.
    pub form_id: FormId,
    /// Display title.
    pub title: String,
    /// Window start.
    pub starts_at: DateTime<Utc>,
    /// Window end.
    pub ends_at: DateTime<Utc>,
}

/// Descriptor of the `campaign` table.
pub static CAMPAIGN: EntityDescriptor = EntityDescriptor {
    name: "campaign",
    fields: &[
        "id",
        "organizationId",
        "formId",
        "title",
        "slug",
        "startsAt",
        "endsAt",
        "createdAt",
        "updatedAt",
        "deletedAt",
    ],
    relations: &[
        RelationDef {
            name: "organization",
            target: &ORGANIZATION,
            cardinality: Cardinality::One,
            local_key: "organizationId",
            foreign_key: "id",
        },
        RelationDef {
            name: "form",
            target: &FORM,
            cardinality: Cardinality::One,
            local_key: "formId",
            foreign_key: "id",
        },
    ],
    slug_field: Some("slug"),
    unique: &["slug"],
    delete_policy: DeletePolicy::SOFT,
    default_include: &["form"],
};

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_window_is_half_open() {
        let start = Utc::now();
        let campaign = Campaign {
            id: CampaignId::new(),
            organization_id: OrganizationId::new(),
            form_id: FormId::new(),
            title: "Q3 pulse".into(),
            slug: "q3-pulse-000001".into(),
            starts_at: start,
            ends_at: start + Duration::days(7),
            created_at: start,
            updated_at: start,
            deleted_at: None,
            form: None,
        };
        assert!(campaign.is_active_at(start));
        assert!(campaign.is_active_at(start + Duration::days(3)));
        assert!(!campaign.is_active_at(start + Duration::days(7)));
        assert!(!campaign.is_active_at(start - Duration::seconds(1)));
    }
}
