use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::PlayerId;

/// Fantasy points one player earned in one innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub player_id: PlayerId,
    pub batting: Decimal,
    pub bowling: Decimal,
    pub fielding: Decimal,
}

impl PlayerPoints {
    /// Saturates instead of overflowing.
    pub fn total(&self) -> Decimal {
        self.batting
            .saturating_add(self.bowling)
            .saturating_add(self.fielding)
    }
}

/// Point entries reported for a single innings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Innings {
    pub name: String,
    pub entries: Vec<PlayerPoints>,
}

/// Provider point table for a whole match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTable {
    pub match_id: String,
    pub innings: Vec<Innings>,
}

impl PointsTable {
    /// Raw points for `player_id` summed over every innings they appear in.
    pub fn player_total(&self, player_id: &str) -> Decimal {
        self.innings
            .iter()
            .flat_map(|i| i.entries.iter())
            .filter(|e| e.player_id == player_id)
            .map(PlayerPoints::total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
