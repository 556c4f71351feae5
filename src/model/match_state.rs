use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Coarse match state as reported by the provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MatchState {
    Fixture,
    Live,
    Result,
}

/// What the toss winner chose to do first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum TossChoice {
    #[strum(to_string = "bat", serialize = "batting")]
    Bat,
    #[strum(
        to_string = "bowl",
        serialize = "bowling",
        serialize = "field",
        serialize = "fielding"
    )]
    Bowl,
}

/// Toss outcome, present once the provider reports a toss winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossInfo {
    pub winner: String,
    pub choice: Option<TossChoice>,
}

/// Latest provider view of a match, already translated out of free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub match_id: String,
    pub state: MatchState,
    pub scheduled_start: Option<NaiveDateTime>,
    pub status_text: String,
    pub toss_winner: Option<String>,
    pub toss_choice: Option<TossChoice>,
}

/// Phase of a match as far as team creation is concerned.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum MatchPhase {
    AwaitingToss,
    TossCompleted,
    Live,
    Completed,
    Unknown,
}

impl MatchPhase {
    /// Position in the match lifecycle. `Unknown` sits below everything.
    pub fn progress(self) -> u8 {
        match self {
            MatchPhase::Unknown => 0,
            MatchPhase::AwaitingToss => 1,
            MatchPhase::TossCompleted => 2,
            MatchPhase::Live => 3,
            MatchPhase::Completed => 4,
        }
    }

    /// Live and Completed never reopen team creation.
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchPhase::Live | MatchPhase::Completed)
    }
}

/// A resolved phase together with the toss details that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResolution {
    pub phase: MatchPhase,
    pub toss: Option<TossInfo>,
}

impl PhaseResolution {
    pub fn new(phase: MatchPhase) -> Self {
        Self { phase, toss: None }
    }
}

/// Which slice of the provider's match listing to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchListKind {
    Fixtures,
    Live,
    Results,
}

impl MatchListKind {
    pub fn includes(self, state: MatchState) -> bool {
        matches!(
            (self, state),
            (MatchListKind::Fixtures, MatchState::Fixture)
                | (MatchListKind::Live, MatchState::Live)
                | (MatchListKind::Results, MatchState::Result)
        )
    }
}

/// A single row of a match listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: String,
    pub name: String,
    pub teams: Vec<String>,
    pub state: MatchState,
    pub scheduled_start: Option<NaiveDateTime>,
    pub status_text: String,
}
