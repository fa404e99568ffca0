//! Project lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Being planned.
    #[default]
    Draft,
    /// Running.
    Active,
    /// Finished.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl ProjectStatus {
    /// Whether the status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}
