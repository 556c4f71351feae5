use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::config::TeamRules;
use crate::model::{
    CandidateSelection, FantasyRole, Player, PlayerId, Squad, StoredTeam, ValidatedTeam,
};

/// A user-correctable problem with a team selection.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("player {0} is selected more than once")]
    DuplicatePlayer(PlayerId),

    #[error("team must have exactly {expected} players, found {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("{role} count {count} is outside {min}..={max}")]
    RoleOutOfBounds {
        role: FantasyRole,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("{count} players from {team} exceeds the per-team limit")]
    TeamOverrepresented { team: String, count: usize },

    #[error("player {0} is not in the squad for this match")]
    UnknownPlayer(PlayerId),

    #[error("no captain selected")]
    MissingCaptain,

    #[error("no vice-captain selected")]
    MissingViceCaptain,

    #[error("captain and vice-captain must be different players")]
    CaptainEqualsViceCaptain,

    #[error("captain {0} is not part of the team")]
    CaptainNotInTeam(PlayerId),

    #[error("vice-captain {0} is not part of the team")]
    ViceCaptainNotInTeam(PlayerId),
}

/// Checks selections against a set of [`TeamRules`].
#[derive(Debug, Clone, Default)]
pub struct TeamValidator {
    rules: TeamRules,
}

impl TeamValidator {
    pub fn new(rules: TeamRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TeamRules {
        &self.rules
    }

    /// Validate a full selection, collecting every problem rather than
    /// stopping at the first.
    pub fn validate(
        &self,
        selection: &CandidateSelection,
        squad: &Squad,
    ) -> Result<ValidatedTeam, Vec<ValidationError>> {
        let mut errors = shape_errors(selection, self.rules.team_size);

        let mut resolved: Vec<&Player> = Vec::with_capacity(selection.players.len());
        for id in selection.players.iter().unique() {
            match squad.get(id) {
                Some(player) => resolved.push(player),
                None => errors.push(ValidationError::UnknownPlayer(id.clone())),
            }
        }

        errors.extend(self.role_errors(&resolved));
        errors.extend(self.team_errors(&resolved));

        match (&selection.captain, &selection.vice_captain) {
            (Some(captain), Some(vice_captain)) if errors.is_empty() => Ok(ValidatedTeam::new(
                selection.match_id.clone(),
                resolved.into_iter().cloned().collect(),
                captain.clone(),
                vice_captain.clone(),
            )),
            _ => {
                debug!(
                    match_id = %selection.match_id,
                    errors = errors.len(),
                    "selection rejected"
                );
                Err(errors)
            }
        }
    }

    /// Rebuild a team that was validated earlier, e.g. one loaded from storage.
    ///
    /// Only the checks that need no squad are repeated, so a team whose player
    /// has since left the squad is still restored and scores as submitted.
    pub fn restore(&self, stored: StoredTeam) -> Result<ValidatedTeam, Vec<ValidationError>> {
        restore_team(stored, self.rules.team_size)
    }

    /// Cheap pre-check used while a user is picking players one at a time.
    ///
    /// True when adding `candidate` keeps the team size, the candidate's role
    /// and the candidate's real team within their maximums. It does not
    /// guarantee the finished team will validate.
    pub fn can_add_player(
        &self,
        selection: &CandidateSelection,
        candidate: &Player,
        squad: &Squad,
    ) -> bool {
        if selection.contains(&candidate.id) {
            return false;
        }
        if selection.players.len() + 1 > self.rules.team_size {
            return false;
        }

        let selected = selection.players.iter().filter_map(|id| squad.get(id));
        let (same_role, same_team) = selected.fold((0, 0), |(role, team), p| {
            (
                role + usize::from(p.role == candidate.role),
                team + usize::from(p.team == candidate.team),
            )
        });

        same_role < self.rules.bounds(candidate.role).max && same_team < self.rules.max_per_team
    }

    fn role_errors(&self, players: &[&Player]) -> Vec<ValidationError> {
        let counts = players.iter().map(|p| p.role).counts();
        FantasyRole::ALL
            .into_iter()
            .filter_map(|role| {
                let count = counts.get(&role).copied().unwrap_or(0);
                let bounds = self.rules.bounds(role);
                (!bounds.contains(count)).then_some(ValidationError::RoleOutOfBounds {
                    role,
                    count,
                    min: bounds.min,
                    max: bounds.max,
                })
            })
            .collect()
    }

    fn team_errors(&self, players: &[&Player]) -> Vec<ValidationError> {
        players
            .iter()
            .map(|p| p.team.as_str())
            .counts()
            .into_iter()
            .filter(|(_, count)| *count > self.rules.max_per_team)
            .sorted()
            .map(|(team, count)| ValidationError::TeamOverrepresented {
                team: team.to_string(),
                count,
            })
            .collect()
    }
}

/// Problems visible without a squad: repeated ids, size and captaincy.
fn shape_errors(selection: &CandidateSelection, team_size: usize) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = selection
        .players
        .iter()
        .duplicates()
        .map(|id| ValidationError::DuplicatePlayer(id.clone()))
        .collect();

    let unique = selection.players.iter().unique().count();
    if unique != team_size {
        errors.push(ValidationError::WrongSize {
            expected: team_size,
            actual: unique,
        });
    }

    errors.extend(leadership_errors(selection));
    errors
}

pub(crate) fn restore_team(
    stored: StoredTeam,
    team_size: usize,
) -> Result<ValidatedTeam, Vec<ValidationError>> {
    let selection = CandidateSelection {
        match_id: stored.match_id.clone(),
        players: stored.players.iter().map(|p| p.id.clone()).collect(),
        captain: Some(stored.captain.clone()),
        vice_captain: Some(stored.vice_captain.clone()),
    };
    let errors = shape_errors(&selection, team_size);
    if !errors.is_empty() {
        debug!(match_id = %stored.match_id, errors = errors.len(), "stored team rejected");
        return Err(errors);
    }
    Ok(ValidatedTeam::new(
        stored.match_id,
        stored.players,
        stored.captain,
        stored.vice_captain,
    ))
}

fn leadership_errors(selection: &CandidateSelection) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match &selection.captain {
        None => errors.push(ValidationError::MissingCaptain),
        Some(id) if !selection.contains(id) => {
            errors.push(ValidationError::CaptainNotInTeam(id.clone()))
        }
        Some(_) => {}
    }
    match &selection.vice_captain {
        None => errors.push(ValidationError::MissingViceCaptain),
        Some(id) if !selection.contains(id) => {
            errors.push(ValidationError::ViceCaptainNotInTeam(id.clone()))
        }
        Some(_) => {}
    }
    if let (Some(captain), Some(vice_captain)) = (&selection.captain, &selection.vice_captain) {
        if captain == vice_captain {
            errors.push(ValidationError::CaptainEqualsViceCaptain);
        }
    }
    errors
}
