use crate::config::Settings;
use crate::error::{Result, RotaError};
use crate::paths;
use serde::{Deserialize, Serialize};

/// A group's declarative configuration, read fresh on every invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// One of `round_robin`, `random`, `least_assigned`.
    pub strategy: String,
    /// One of `inout`, `always_available`.
    pub availability_checker: String,
    /// Rotation order. Duplicates are kept and occupy separate slots.
    #[serde(default)]
    pub users: Vec<String>,
}

impl GroupConfig {
    pub fn load(settings: &Settings, group: &str) -> Result<Self> {
        paths::validate_group_name(group)?;
        let path = settings.group_config_path(group);
        let data = match std::fs::read_to_string(&path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RotaError::InvalidGroup {
                    group: group.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let conf: GroupConfig = serde_yaml::from_str(&data)?;
        Ok(conf)
    }
}

/// Names of every group with a `<name>.yaml` file in `conf_dir`, sorted.
pub fn list_groups(settings: &Settings) -> Result<Vec<String>> {
    let mut groups = Vec::new();
    for entry in std::fs::read_dir(&settings.storage.conf_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(paths::GROUP_CONFIG_EXT) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if paths::validate_group_name(stem).is_err() {
            tracing::warn!(file = %path.display(), "skipping group file with an unusable name");
            continue;
        }
        groups.push(stem.to_string());
    }
    groups.sort();
    Ok(groups)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
