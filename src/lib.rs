//! Fantasy cricket contest engine.
//!
//! Validates 11-player selections, gates team creation on the toss, and turns
//! provider point tables into ranked contest leaderboards. Match data comes
//! from any [`MatchDataProvider`]; [`CricketDataClient`] talks to a
//! CricAPI-style HTTP service.

pub use client::CricketDataClient;
pub use config::{FantasyConfig, Multipliers, ProviderConfig, RoleBounds, TeamRules};
pub use engine::{GateDecision, ScoreOutcome, ValidationError};
pub use error::{FantasyError, Result};
pub use fantasy::{FantasyEngine, Submission};
pub use model::*;
pub use provider::MatchDataProvider;

pub mod config;
pub mod engine;
pub mod model;
pub mod provider;

mod client;
mod error;
mod fantasy;

#[cfg(test)]
mod fixtures;
