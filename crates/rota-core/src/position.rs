use crate::error::Result;
use crate::{io, paths};
use chrono::Utc;
use std::path::{Path, PathBuf};

const SEPARATOR: &str = "--";

/// Append-only history of committed indices, one `<RFC3339> -- <index>`
/// line per assignment. Only the last line is meaningful.
#[derive(Debug, Clone)]
pub struct PositionLog {
    path: PathBuf,
}

impl PositionLog {
    pub fn at(group_dir: &Path) -> Self {
        Self {
            path: paths::index_log_path(group_dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Most recently committed index, or `None` when nothing usable is on
    /// disk. A missing or unreadable log is treated as "no prior state".
    pub fn read_last(&self) -> Option<usize> {
        let data = match io::read_optional(&self.path) {
            Ok(Some(d)) => d,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read position log");
                return None;
            }
        };
        let last = data.lines().rev().find(|l| !l.trim().is_empty())?;
        let parsed = parse_line(last);
        if parsed.is_none() {
            tracing::warn!(path = %self.path.display(), line = last, "ignoring malformed position entry");
        }
        parsed
    }

    pub fn append(&self, index: usize) -> Result<()> {
        let line = format!("{} {SEPARATOR} {index}", Utc::now().to_rfc3339());
        io::append_line(&self.path, &line)
    }
}

fn parse_line(line: &str) -> Option<usize> {
    let (_, idx) = line.split_once(SEPARATOR)?;
    idx.trim().parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
