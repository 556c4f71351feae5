use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::config::TeamRules;
use crate::engine::validator::{restore_team, ValidationError};
use crate::model::{Player, PlayerId};

/// A user's in-progress pick for one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSelection {
    pub match_id: String,
    pub players: Vec<PlayerId>,
    pub captain: Option<PlayerId>,
    pub vice_captain: Option<PlayerId>,
}

impl CandidateSelection {
    pub fn new(match_id: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
            ..Default::default()
        }
    }

    pub fn with_players<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PlayerId>,
    {
        self.players = players.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_captain(mut self, id: impl Into<PlayerId>) -> Self {
        self.captain = Some(id.into());
        self
    }

    pub fn with_vice_captain(mut self, id: impl Into<PlayerId>) -> Self {
        self.vice_captain = Some(id.into());
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|p| p == id)
    }
}

/// A selection that passed composition validation.
///
/// Built by [`TeamValidator::validate`] or, for a team loaded back from
/// storage, by [`TeamValidator::restore`] and `Deserialize`. It cannot be
/// mutated afterwards. An edit is a fresh validation whose result replaces the
/// stored team.
///
/// Deserializing repeats the squad-free checks against the standard team
/// size; use [`TeamValidator::restore`] when the rules are customised.
///
/// [`TeamValidator::validate`]: crate::engine::TeamValidator::validate
/// [`TeamValidator::restore`]: crate::engine::TeamValidator::restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredTeam")]
pub struct ValidatedTeam {
    match_id: String,
    players: Vec<Player>,
    captain: PlayerId,
    vice_captain: PlayerId,
}

impl ValidatedTeam {
    pub(crate) fn new(
        match_id: String,
        players: Vec<Player>,
        captain: PlayerId,
        vice_captain: PlayerId,
    ) -> Self {
        Self {
            match_id,
            players,
            captain,
            vice_captain,
        }
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn captain(&self) -> &str {
        &self.captain
    }

    pub fn vice_captain(&self) -> &str {
        &self.vice_captain
    }

    /// The selection this team was validated from.
    pub fn selection(&self) -> CandidateSelection {
        CandidateSelection {
            match_id: self.match_id.clone(),
            players: self.players.iter().map(|p| p.id.clone()).collect(),
            captain: Some(self.captain.clone()),
            vice_captain: Some(self.vice_captain.clone()),
        }
    }
}

/// The persisted form of a [`ValidatedTeam`], not yet re-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTeam {
    pub match_id: String,
    pub players: Vec<Player>,
    pub captain: PlayerId,
    pub vice_captain: PlayerId,
}

impl From<ValidatedTeam> for StoredTeam {
    fn from(team: ValidatedTeam) -> Self {
        Self {
            match_id: team.match_id,
            players: team.players,
            captain: team.captain,
            vice_captain: team.vice_captain,
        }
    }
}

/// A stored team that no longer passes the squad-free checks.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("stored team is invalid: {}", .0.iter().join("; "))]
pub struct InvalidStoredTeam(pub Vec<ValidationError>);

impl TryFrom<StoredTeam> for ValidatedTeam {
    type Error = InvalidStoredTeam;

    fn try_from(stored: StoredTeam) -> Result<Self, Self::Error> {
        restore_team(stored, TeamRules::default().team_size).map_err(InvalidStoredTeam)
    }
}
