//! Migration plan model and YAML loading

use crate::error::{MigrateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One source-to-destination image migration task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationUnit {
    /// Registry reference to pull from (`repository[:tag|@digest]`).
    pub source_image: String,
    /// Registry reference to tag and push to.
    pub destination_image: String,
}

impl fmt::Display for MigrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source_image, self.destination_image)
    }
}

/// Ordered migration plan, immutable after load.
///
/// Units are processed in insertion order; there are no cross-unit
/// invariants and each unit is migrated independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlan {
    #[serde(default)]
    pub migration_units: Vec<MigrationUnit>,
}

impl MigrationPlan {
    /// Load a plan from a YAML file.
    ///
    /// An unreadable file or malformed document is fatal; no migration
    /// starts when the plan cannot be loaded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| MigrateError::config_load(path.display().to_string(), e.to_string()))?;

        serde_yaml::from_str(&data)
            .map_err(|e| MigrateError::config_load(path.display().to_string(), e.to_string()))
    }

    pub fn units(&self) -> &[MigrationUnit] {
        &self.migration_units
    }

    pub fn len(&self) -> usize {
        self.migration_units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migration_units.is_empty()
    }
}
