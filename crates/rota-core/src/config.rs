use crate::error::{Result, RotaError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// StorageSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Base directory; each group gets its own subdirectory on first write.
    #[serde(default)]
    pub data_dir: PathBuf,
    /// Directory holding one `<group>.yaml` per group.
    #[serde(default)]
    pub conf_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// AvailabilitySettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySettings {
    #[serde(default)]
    pub inout_api_url_prefix: String,
    #[serde(default)]
    pub inout_unavailable_statuses: Vec<String>,
    #[serde(default = "default_status_field")]
    pub status_field: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_status_field() -> String {
    "inOutLocation".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for AvailabilitySettings {
    fn default() -> Self {
        Self {
            inout_api_url_prefix: String::new(),
            inout_unavailable_statuses: Vec::new(),
            status_field: default_status_field(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Process-wide configuration. Built once at startup and handed to every
/// operation by reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub availability: AvailabilitySettings,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let meta = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RotaError::SettingsNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        if !meta.is_file() {
            return Err(RotaError::InvalidSettings(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }
        let data = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&data)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(RotaError::InvalidSettings(
                "data_dir is required in storage configuration".to_string(),
            ));
        }
        if self.storage.conf_dir.as_os_str().is_empty() {
            return Err(RotaError::InvalidSettings(
                "conf_dir is required in storage configuration".to_string(),
            ));
        }
        if self.availability.inout_api_url_prefix.is_empty() {
            return Err(RotaError::InvalidSettings(
                "inout_api_url_prefix is required in availability configuration".to_string(),
            ));
        }
        if self.availability.inout_unavailable_statuses.is_empty() {
            return Err(RotaError::InvalidSettings(
                "inout_unavailable_statuses is required in availability configuration"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn group_config_path(&self, group: &str) -> PathBuf {
        paths::group_config_path(&self.storage.conf_dir, group)
    }

    pub fn group_data_dir(&self, group: &str) -> PathBuf {
        paths::group_data_dir(&self.storage.data_dir, group)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
