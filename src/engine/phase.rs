use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::model::{MatchPhase, MatchSnapshot, MatchState, PhaseResolution, TossInfo};

/// Classify a match from its latest provider snapshot.
///
/// `None` means the provider could not find the match. Pure; callers
/// re-evaluate it on every poll.
pub fn resolve_phase(snapshot: Option<&MatchSnapshot>) -> PhaseResolution {
    let Some(snapshot) = snapshot else {
        return PhaseResolution::new(MatchPhase::Unknown);
    };

    let toss = snapshot
        .toss_winner
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|winner| TossInfo {
            winner: winner.to_string(),
            choice: snapshot.toss_choice,
        });

    let phase = match (snapshot.state, &toss) {
        (MatchState::Result, _) => MatchPhase::Completed,
        (MatchState::Live, _) => MatchPhase::Live,
        (MatchState::Fixture, Some(_)) => MatchPhase::TossCompleted,
        (MatchState::Fixture, None) => MatchPhase::AwaitingToss,
    };

    PhaseResolution { phase, toss }
}

/// Remembers, per match, the most advanced terminal phase ever observed.
///
/// Provider polls carry no ordering guarantee, so a stale poll may claim a
/// live match is still awaiting its toss. Once a match has been seen Live or
/// Completed, anything less advanced is reported as the recorded phase.
#[derive(Debug, Default)]
pub struct PhaseWatermark {
    terminal: Mutex<HashMap<String, PhaseResolution>>,
}

impl PhaseWatermark {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a fresh observation into the watermark and return the phase the
    /// gate should act on.
    pub fn observe(&self, match_id: &str, observed: PhaseResolution) -> PhaseResolution {
        let mut terminal = self
            .terminal
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(recorded) = terminal.get(match_id) {
            if observed.phase.progress() < recorded.phase.progress() {
                warn!(
                    match_id,
                    recorded = %recorded.phase,
                    observed = %observed.phase,
                    "provider reported a phase regression, keeping recorded phase"
                );
                return recorded.clone();
            }
        }

        if observed.phase.is_terminal() {
            terminal.insert(match_id.to_string(), observed.clone());
        }
        observed
    }

    pub fn recorded(&self, match_id: &str) -> Option<MatchPhase> {
        self.terminal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(match_id)
            .map(|r| r.phase)
    }

    /// Drop the record for a match, e.g. once its contests are archived.
    pub fn forget(&self, match_id: &str) {
        self.terminal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(match_id);
    }
}
