use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::ValidatedTeam;

/// A pool of participants competing on one real match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contest {
    pub id: String,
    pub match_id: String,
    pub capacity: u32,
}

/// A submitted team entered in a contest.
///
/// Deserializing re-checks the team's shape, see [`ValidatedTeam`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestEntry {
    pub contest_id: String,
    pub team_id: String,
    pub team: ValidatedTeam,
}

/// A contest entry with its computed total and leaderboard position.
///
/// `rank` is 0 until the entry has been through the ranker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub contest_id: String,
    pub team_id: String,
    pub total_points: Decimal,
    pub rank: u32,
}

impl ScoredEntry {
    pub fn unranked(
        contest_id: impl Into<String>,
        team_id: impl Into<String>,
        total_points: Decimal,
    ) -> Self {
        Self {
            contest_id: contest_id.into(),
            team_id: team_id.into(),
            total_points,
            rank: 0,
        }
    }
}

/// Result of trying to take a slot in a contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOutcome {
    /// A slot was taken; `participants` is the count including this join.
    Joined { participants: u32 },
    /// Every slot is taken. The user may try another contest.
    Full,
    /// The match has left the window in which teams may be entered.
    Closed,
    UnknownContest,
}
