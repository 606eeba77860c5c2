//! Storage configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::EnvLookup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Load the demo owners, pets and visits at startup
    /// Env: PC_SEED_DEMO_DATA
    pub seed_demo_data: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { seed_demo_data: true }
    }
}

impl StorageConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub(crate) fn apply_env(&mut self, lookup: EnvLookup<'_>) {
        if let Some(seed) = lookup("PC_SEED_DEMO_DATA") {
            if let Ok(s) = seed.parse() {
                self.seed_demo_data = s;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
