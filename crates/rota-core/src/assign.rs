use crate::audit::{self, AuditEntry};
use crate::availability::{Checker, CheckerKind};
use crate::config::Settings;
use crate::counts::{CountMap, CountStore};
use crate::error::{Result, RotaError, MISSING_GROUP};
use crate::group::GroupConfig;
use crate::io;
use crate::position::PositionLog;
use crate::strategy::Strategy;
use chrono::Utc;
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Outcome of a successful `assign`. When `dry_run` is false every write has
/// already been committed by the time the caller sees this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub group: String,
    pub user: String,
    pub index: usize,
    pub last_index: Option<usize>,
    pub strategy: Strategy,
    pub dry_run: bool,
    /// Post-increment count; `None` on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u64>,
}

/// Counts for display, with `users` in configured order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCounts {
    pub group: String,
    pub users: Vec<String>,
    pub counts: CountMap,
}

// ---------------------------------------------------------------------------
// Group loading / variant resolution
// ---------------------------------------------------------------------------

struct LoadedGroup {
    conf: GroupConfig,
    strategy: Strategy,
    checker: Checker,
}

/// Load the group file, reporting every failure except a bad name as a
/// configuration error.
fn load_config(settings: &Settings, group: &str) -> Result<GroupConfig> {
    GroupConfig::load(settings, group).map_err(|e| match e {
        RotaError::InvalidGroupName(_) => e,
        RotaError::InvalidGroup { .. } => RotaError::config(group, MISSING_GROUP),
        other => RotaError::config(group, other.to_string()),
    })
}

fn load_group(settings: &Settings, group: &str) -> Result<LoadedGroup> {
    let conf = load_config(settings, group)?;
    if conf.users.is_empty() {
        return Err(RotaError::config(group, "no users found"));
    }
    let strategy: Strategy = conf
        .strategy
        .parse()
        .map_err(|e: RotaError| RotaError::config(group, e.to_string()))?;
    let kind: CheckerKind = conf
        .availability_checker
        .parse()
        .map_err(|e: RotaError| RotaError::config(group, e.to_string()))?;
    let checker = Checker::resolve(kind, &settings.availability)
        .map_err(|e| RotaError::config(group, e.to_string()))?;
    Ok(LoadedGroup {
        conf,
        strategy,
        checker,
    })
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Walk forward from `start`, wrapping, until `is_available` accepts a
/// member. Inspects at most `members.len()` candidates; `Ok(None)` means
/// nobody was available. A checker error aborts the scan immediately.
pub fn scan<F>(members: &[String], start: usize, mut is_available: F) -> Result<Option<usize>>
where
    F: FnMut(&str) -> Result<bool>,
{
    let len = members.len();
    for step in 0..len {
        let idx = (start + step) % len;
        if is_available(&members[idx])? {
            return Ok(Some(idx));
        }
        tracing::debug!(user = %members[idx], index = idx, "candidate unavailable, advancing");
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// assign
// ---------------------------------------------------------------------------

/// Pick the next assignee for `group` and, unless `dry_run`, persist the new
/// position, the incremented count and an audit entry.
pub fn assign(settings: &Settings, group: &str, dry_run: bool) -> Result<Assignment> {
    let LoadedGroup {
        conf,
        strategy,
        checker,
    } = load_group(settings, group)?;
    let members = &conf.users;

    let dir = settings.group_data_dir(group);
    let last = PositionLog::at(&dir).read_last();
    let counts = CountStore::at(&dir).read(members);

    let candidate = strategy
        .select_next(members, last, &counts)
        .map_err(|e| RotaError::Selection {
            group: group.to_string(),
            source: Box::new(e),
        })?;
    tracing::debug!(group, %strategy, candidate, ?last, "strategy selected candidate");

    let chosen = scan(members, candidate, |user| checker.is_available(user))?.ok_or_else(|| {
        RotaError::NoAvailableAssignee {
            group: group.to_string(),
        }
    })?;
    let user = members[chosen].clone();

    let user_count = if dry_run {
        tracing::info!(group, user = %user, index = chosen, "dry run, nothing persisted");
        None
    } else {
        let n = commit(&dir, group, members, strategy, last, chosen).map_err(|e| {
            RotaError::Commit {
                group: group.to_string(),
                source: Box::new(e),
            }
        })?;
        tracing::info!(group, user = %user, index = chosen, count = n, "assignment committed");
        Some(n)
    };

    Ok(Assignment {
        group: group.to_string(),
        user,
        index: chosen,
        last_index: last,
        strategy,
        dry_run,
        user_count,
    })
}

fn commit(
    dir: &Path,
    group: &str,
    members: &[String],
    strategy: Strategy,
    last: Option<usize>,
    chosen: usize,
) -> Result<u64> {
    let user = &members[chosen];
    io::ensure_dir(dir)?;
    PositionLog::at(dir).append(chosen)?;
    let user_count = CountStore::at(dir).increment(members, user)?;
    AuditEntry {
        timestamp: Utc::now().to_rfc3339(),
        group: group.to_string(),
        user: user.clone(),
        strategy: strategy.as_str().to_string(),
        last_index: audit::last_index_field(last),
        next_index: chosen,
        total_count: members.len(),
        user_count,
    }
    .append(dir)?;
    Ok(user_count)
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Current counts for every configured member, zero-filled.
pub fn get_counts(settings: &Settings, group: &str) -> Result<GroupCounts> {
    let conf = GroupConfig::load(settings, group).map_err(|e| match e {
        RotaError::InvalidGroupName(_) => e,
        _ => RotaError::InvalidGroup {
            group: group.to_string(),
        },
    })?;
    let counts = CountStore::at(&settings.group_data_dir(group)).read(&conf.users);
    if counts.is_empty() {
        return Err(RotaError::NoCounts {
            group: group.to_string(),
        });
    }
    Ok(GroupCounts {
        group: group.to_string(),
        users: conf.users,
        counts,
    })
}

/// Overwrite the group's counts with zero for every configured member.
pub fn reset_counts(settings: &Settings, group: &str) -> Result<()> {
    let conf = load_config(settings, group)?;
    let dir = settings.group_data_dir(group);
    io::ensure_dir(&dir)?;
    CountStore::at(&dir).reset(&conf.users)?;
    tracing::info!(group, members = conf.users.len(), "counts reset");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
