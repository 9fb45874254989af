use crate::counts::CountMap;
use crate::error::{Result, RotaError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    RoundRobin,
    Random,
    LeastAssigned,
}

impl Strategy {
    pub fn all() -> &'static [Strategy] {
        &[Strategy::RoundRobin, Strategy::Random, Strategy::LeastAssigned]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::RoundRobin => "round_robin",
            Strategy::Random => "random",
            Strategy::LeastAssigned => "least_assigned",
        }
    }

    /// Candidate index into `members`. `last` is the previously committed
    /// index, if any. Members missing from `counts` count as zero.
    pub fn select_next(
        self,
        members: &[String],
        last: Option<usize>,
        counts: &CountMap,
    ) -> Result<usize> {
        if members.is_empty() {
            return Err(RotaError::EmptyMembers);
        }
        let idx = match self {
            Strategy::RoundRobin => {
                // `last` comes from disk and may be past the end of the list
                let len = members.len();
                last.map_or(0, |i| (i % len + 1) % len)
            }
            Strategy::Random => rand::thread_rng().gen_range(0..members.len()),
            Strategy::LeastAssigned => least_assigned(members, counts),
        };
        Ok(idx)
    }
}

/// Lowest index whose count equals the minimum. Strict `<` keeps ties on
/// the earliest member.
fn least_assigned(members: &[String], counts: &CountMap) -> usize {
    let mut best = 0;
    let mut min = u64::MAX;
    for (i, user) in members.iter().enumerate() {
        let n = counts.get(user).copied().unwrap_or(0);
        if n < min {
            min = n;
            best = i;
        }
    }
    best
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = RotaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Strategy::all()
            .iter()
            .copied()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| RotaError::UnknownStrategy(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
