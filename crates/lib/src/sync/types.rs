//! The synchronized document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::SyncError;

/// One user's synchronized state, replaced wholesale on every push.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncData {
    /// Dotfile path → file content
    pub files: BTreeMap<String, String>,
    /// Package list, order preserved
    pub packages: Vec<Package>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub installed: bool,
}

impl SyncData {
    /// Check the parts of the document that serde cannot express.
    pub fn validate(&self) -> Result<(), SyncError> {
        if let Some(index) = self.packages.iter().position(|p| p.name.is_empty()) {
            return Err(SyncError::InvalidPayload {
                reason: format!("package {index} has an empty name"),
            });
        }
        Ok(())
    }
}
