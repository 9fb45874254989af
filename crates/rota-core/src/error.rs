use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotaError {
    #[error("config file does not exist: {}", .0.display())]
    SettingsNotFound(PathBuf),

    #[error("invalid config: {0}")]
    InvalidSettings(String),

    #[error("configuration error for group {group}: {message}")]
    Config { group: String, message: String },

    #[error("group {group} does not exist")]
    InvalidGroup { group: String },

    #[error("invalid group name '{0}': must be alphanumeric with '.', '_' or '-'")]
    InvalidGroupName(String),

    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown availability checker: {0}")]
    UnknownChecker(String),

    #[error("empty users list")]
    EmptyMembers,

    #[error("selection error for group {group}")]
    Selection {
        group: String,
        #[source]
        source: Box<RotaError>,
    },

    #[error("availability check error for user {user}: {message}")]
    Availability { user: String, message: String },

    #[error("no available assignee found for group {group}")]
    NoAvailableAssignee { group: String },

    #[error("no counts found for group {group}")]
    NoCounts { group: String },

    #[error("failed to record assignment for group {group}")]
    Commit {
        group: String,
        #[source]
        source: Box<RotaError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub(crate) const MISSING_GROUP: &str = "group config file not found";

impl RotaError {
    /// The named group has no config file at all.
    pub fn is_missing_group(&self) -> bool {
        match self {
            RotaError::InvalidGroup { .. } => true,
            RotaError::Config { message, .. } => message == MISSING_GROUP,
            _ => false,
        }
    }

    pub(crate) fn config(group: &str, message: impl Into<String>) -> Self {
        RotaError::Config {
            group: group.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RotaError>;
