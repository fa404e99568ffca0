//! Persistence handle configuration.

use serde::{Deserialize, Serialize};

/// Configuration of the in-process store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file of `table -> [rows]` loaded into the store at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}
