use serde::{Deserialize, Serialize};
use tracing::debug;

/// Provider identifier of a player.
pub type PlayerId = String;

/// Normalized fantasy category derived from a provider role label.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FantasyRole {
    Wicketkeeper,
    Batsman,
    Allrounder,
    Bowler,
}

impl FantasyRole {
    pub const ALL: [FantasyRole; 4] = [
        FantasyRole::Wicketkeeper,
        FantasyRole::Batsman,
        FantasyRole::Allrounder,
        FantasyRole::Bowler,
    ];

    /// Map a free-text provider role ("WK-Batsman", "Bowling Allrounder",
    /// "Batter", ...) onto a fantasy role.
    ///
    /// The mapping is total: anything unrecognised becomes [`FantasyRole::Batsman`].
    pub fn from_raw_role(raw: &str) -> FantasyRole {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if normalized.starts_with("wk") || normalized.contains("keeper") {
            FantasyRole::Wicketkeeper
        } else if normalized.contains("allrounder") {
            FantasyRole::Allrounder
        } else if normalized.contains("bowl") {
            FantasyRole::Bowler
        } else if normalized.contains("bat") {
            FantasyRole::Batsman
        } else {
            debug!(raw, "unmapped player role, defaulting to batsman");
            FantasyRole::Batsman
        }
    }
}

/// A player as listed in a match squad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Real-world team the player turns out for in this match.
    pub team: String,
    pub raw_role: String,
    pub role: FantasyRole,
}

impl Player {
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        team: impl Into<String>,
        raw_role: impl Into<String>,
    ) -> Self {
        let raw_role = raw_role.into();
        Self {
            id: id.into(),
            name: name.into(),
            team: team.into(),
            role: FantasyRole::from_raw_role(&raw_role),
            raw_role,
        }
    }
}

/// Both teams' players for one match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Squad {
    pub match_id: String,
    pub players: Vec<Player>,
}

impl Squad {
    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}
