use crate::error::{Result, RotaError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File name constants
// ---------------------------------------------------------------------------

pub const GROUP_CONFIG_EXT: &str = "yaml";
pub const INDEX_LOG_FILE: &str = "index.log";
pub const COUNTS_FILE: &str = "counts.json";
pub const ASSIGNMENTS_LOG_FILE: &str = "assignments.log";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn group_config_path(conf_dir: &Path, group: &str) -> PathBuf {
    conf_dir.join(format!("{group}.{GROUP_CONFIG_EXT}"))
}

pub fn group_data_dir(data_dir: &Path, group: &str) -> PathBuf {
    data_dir.join(group)
}

pub fn index_log_path(group_dir: &Path) -> PathBuf {
    group_dir.join(INDEX_LOG_FILE)
}

pub fn counts_path(group_dir: &Path) -> PathBuf {
    group_dir.join(COUNTS_FILE)
}

pub fn assignments_log_path(group_dir: &Path) -> PathBuf {
    group_dir.join(ASSIGNMENTS_LOG_FILE)
}

// ---------------------------------------------------------------------------
// Group name validation
// ---------------------------------------------------------------------------

static GROUP_RE: OnceLock<Regex> = OnceLock::new();

fn group_re() -> &'static Regex {
    GROUP_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._\-]*$").unwrap())
}

/// Group names double as file and directory names, so anything that could
/// escape `conf_dir` or `data_dir` is rejected.
pub fn validate_group_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 128 || name.contains("..") || !group_re().is_match(name) {
        return Err(RotaError::InvalidGroupName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
