//! Pure decision logic: phase resolution, gating, validation, scoring and
//! ranking. Nothing in here performs I/O.

pub mod capacity;
pub mod gate;
pub mod leaderboard;
pub mod phase;
pub mod scoring;
pub mod validator;

pub use capacity::{ContestStore, InMemoryContestStore};
pub use gate::{can_create_or_edit, GateDecision, GateState};
pub use leaderboard::{rank, rank_by_contest};
pub use phase::{resolve_phase, PhaseWatermark};
pub use scoring::{PlayerScore, ScoreOutcome, ScoringEngine};
pub use validator::{TeamValidator, ValidationError};
