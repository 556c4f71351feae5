use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Multipliers;
use crate::model::{PlayerId, PointsTable, ValidatedTeam};

/// Total for a team, or a marker that the provider has not scored the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreOutcome {
    Scored(Decimal),
    NotYetAvailable,
}

impl ScoreOutcome {
    pub fn points(self) -> Option<Decimal> {
        match self {
            ScoreOutcome::Scored(points) => Some(points),
            ScoreOutcome::NotYetAvailable => None,
        }
    }
}

/// One player's share of a team total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub name: String,
    /// Batting + bowling + fielding over every innings.
    pub raw: Decimal,
    pub multiplier: Decimal,
    pub contribution: Decimal,
}

/// Turns provider point tables into team totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    multipliers: Multipliers,
}

impl ScoringEngine {
    pub fn new(multipliers: Multipliers) -> Self {
        Self { multipliers }
    }

    pub fn score_team(&self, team: &ValidatedTeam, points: Option<&PointsTable>) -> ScoreOutcome {
        match points {
            Some(table) => ScoreOutcome::Scored(
                self.player_breakdown(team, table)
                    .iter()
                    .map(|p| p.contribution)
                    .fold(Decimal::ZERO, Decimal::saturating_add),
            ),
            None => ScoreOutcome::NotYetAvailable,
        }
    }

    /// Per-player raw points, multiplier and contribution, in team order.
    /// Players missing from the table score zero.
    pub fn player_breakdown(&self, team: &ValidatedTeam, table: &PointsTable) -> Vec<PlayerScore> {
        team.players()
            .iter()
            .map(|player| {
                let raw = table.player_total(&player.id);
                let multiplier = self.multiplier_for(team, &player.id);
                PlayerScore {
                    player_id: player.id.clone(),
                    name: player.name.clone(),
                    raw,
                    multiplier,
                    contribution: raw.saturating_mul(multiplier),
                }
            })
            .collect()
    }

    fn multiplier_for(&self, team: &ValidatedTeam, player_id: &str) -> Decimal {
        if team.captain() == player_id {
            self.multipliers.captain
        } else if team.vice_captain() == player_id {
            self.multipliers.vice_captain
        } else {
            Decimal::ONE
        }
    }
}
