//! Slug generation configuration.

use serde::{Deserialize, Serialize};

/// Controls how slugged records are created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlugConfig {
    /// How many fresh suffixes to try when the store reports a slug conflict.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}
