use crate::error::Result;
use crate::{io, paths};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One committed assignment, written as a single JSON line to
/// `assignments.log`. Consumed by external reporting only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: String,
    pub group: String,
    pub user: String,
    pub strategy: String,
    /// `-1` when the group had no prior position.
    pub last_index: i64,
    pub next_index: usize,
    /// Number of configured members at the time of assignment.
    pub total_count: usize,
    /// The assignee's count after this assignment.
    pub user_count: u64,
}

impl AuditEntry {
    pub fn append(&self, group_dir: &Path) -> Result<()> {
        let line = serde_json::to_string(self)?;
        io::append_line(&paths::assignments_log_path(group_dir), &line)
    }
}

pub(crate) fn last_index_field(last: Option<usize>) -> i64 {
    last.map_or(-1, |i| i as i64)
}
