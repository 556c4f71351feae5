use serde::Serialize;

use crate::model::{MatchPhase, PhaseResolution, TossInfo};

pub const REASON_AWAITING_TOSS: &str = "Waiting for toss - team creation opens after toss";
pub const REASON_TOSS_COMPLETED: &str = "Toss completed - create your team before the match starts";
pub const REASON_LIVE: &str = "Match has started - team is locked";
pub const REASON_COMPLETED: &str = "Match has ended";
pub const REASON_NOT_FOUND: &str = "Match not found";

/// Whether team creation is open for a match, keyed purely by phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GateState {
    Open,
    Locked(MatchPhase),
}

impl From<MatchPhase> for GateState {
    fn from(phase: MatchPhase) -> Self {
        match phase {
            MatchPhase::TossCompleted => GateState::Open,
            other => GateState::Locked(other),
        }
    }
}

/// Answer to "may this user create or edit a team right now?".
///
/// A denial is a normal result carrying a user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub can_create: bool,
    pub can_edit: bool,
    pub reason: &'static str,
    pub toss_info: Option<TossInfo>,
}

impl GateDecision {
    fn locked(reason: &'static str) -> Self {
        Self {
            can_create: false,
            can_edit: false,
            reason,
            toss_info: None,
        }
    }
}

pub fn can_create_or_edit(resolution: &PhaseResolution) -> GateDecision {
    match resolution.phase {
        MatchPhase::TossCompleted => GateDecision {
            can_create: true,
            can_edit: true,
            reason: REASON_TOSS_COMPLETED,
            toss_info: resolution.toss.clone(),
        },
        MatchPhase::AwaitingToss => GateDecision::locked(REASON_AWAITING_TOSS),
        MatchPhase::Live => GateDecision::locked(REASON_LIVE),
        MatchPhase::Completed => GateDecision::locked(REASON_COMPLETED),
        MatchPhase::Unknown => GateDecision::locked(REASON_NOT_FOUND),
    }
}
