use crate::config::AvailabilitySettings;
use crate::error::{Result, RotaError};
use reqwest::blocking::Client;
use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// CheckerKind
// ---------------------------------------------------------------------------

/// Name a group config uses to pick its availability checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerKind {
    InOut,
    AlwaysAvailable,
}

impl CheckerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckerKind::InOut => "inout",
            CheckerKind::AlwaysAvailable => "always_available",
        }
    }
}

impl fmt::Display for CheckerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckerKind {
    type Err = RotaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "inout" => Ok(CheckerKind::InOut),
            "always_available" => Ok(CheckerKind::AlwaysAvailable),
            _ => Err(RotaError::UnknownChecker(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Checker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Checker {
    AlwaysAvailable,
    Remote(RemoteStatusChecker),
}

impl Checker {
    pub fn resolve(kind: CheckerKind, settings: &AvailabilitySettings) -> Result<Self> {
        match kind {
            CheckerKind::AlwaysAvailable => Ok(Checker::AlwaysAvailable),
            CheckerKind::InOut => Ok(Checker::Remote(RemoteStatusChecker::new(settings)?)),
        }
    }

    /// `Ok(false)` means the user is known to be unavailable. An `Err` means
    /// availability could not be determined at all.
    pub fn is_available(&self, username: &str) -> Result<bool> {
        match self {
            Checker::AlwaysAvailable => Ok(true),
            Checker::Remote(remote) => remote.is_available(username),
        }
    }
}

// ---------------------------------------------------------------------------
// RemoteStatusChecker
// ---------------------------------------------------------------------------

/// Looks up `<url_prefix><username>` and compares the returned status field
/// against the configured unavailable set.
#[derive(Debug, Clone)]
pub struct RemoteStatusChecker {
    client: Client,
    url_prefix: String,
    status_field: String,
    unavailable: Vec<String>,
}

impl RemoteStatusChecker {
    pub fn new(settings: &AvailabilitySettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url_prefix: settings.inout_api_url_prefix.clone(),
            status_field: settings.status_field.clone(),
            unavailable: settings.inout_unavailable_statuses.clone(),
        })
    }

    pub fn is_available(&self, username: &str) -> Result<bool> {
        let fail = |message: String| RotaError::Availability {
            user: username.to_string(),
            message,
        };

        let url = format!("{}{}", self.url_prefix, username);
        tracing::debug!(%url, "checking availability");
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| fail(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fail(format!("unexpected response status {status}")));
        }

        let body: serde_json::Value = resp
            .json()
            .map_err(|e| fail(format!("invalid response body: {e}")))?;
        let Some(obj) = body.as_object() else {
            return Err(fail("response body is not a JSON object".to_string()));
        };

        let available = match obj.get(&self.status_field).and_then(|v| v.as_str()) {
            Some(current) => !self.unavailable.iter().any(|s| s == current),
            None => true,
        };
        tracing::debug!(user = username, available, "availability resolved");
        Ok(available)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
