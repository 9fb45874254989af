use crate::error::Result;
use crate::{io, paths};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub type CountMap = BTreeMap<String, u64>;

/// Per-group `username -> assignments` snapshot, rewritten in full on
/// every change.
#[derive(Debug, Clone)]
pub struct CountStore {
    path: PathBuf,
}

impl CountStore {
    pub fn at(group_dir: &Path) -> Self {
        Self {
            path: paths::counts_path(group_dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persisted counts exactly as stored. Missing or unparsable files read
    /// as empty.
    pub fn read_raw(&self) -> CountMap {
        let data = match io::read_optional(&self.path) {
            Ok(Some(d)) => d,
            Ok(None) => return CountMap::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read counts file");
                return CountMap::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse counts file");
                CountMap::new()
            }
        }
    }

    /// Persisted counts with a zero entry for every member not yet recorded.
    pub fn read(&self, members: &[String]) -> CountMap {
        let mut counts = self.read_raw();
        backfill(&mut counts, members);
        counts
    }

    /// Bump `user` by one and return its new count.
    pub fn increment(&self, members: &[String], user: &str) -> Result<u64> {
        let mut counts = self.read(members);
        let entry = counts.entry(user.to_string()).or_insert(0);
        *entry += 1;
        let updated = *entry;
        self.write(&counts)?;
        Ok(updated)
    }

    /// Overwrite the snapshot with every member at zero.
    pub fn reset(&self, members: &[String]) -> Result<()> {
        let mut counts = CountMap::new();
        backfill(&mut counts, members);
        self.write(&counts)
    }

    fn write(&self, counts: &CountMap) -> Result<()> {
        let data = serde_json::to_string_pretty(counts)?;
        io::atomic_write(&self.path, data.as_bytes())
    }
}

fn backfill(counts: &mut CountMap, members: &[String]) {
    for user in members {
        counts.entry(user.clone()).or_insert(0);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
