//! Wire shapes of the cricket-data API. Nothing outside `provider` sees these.

use rust_decimal::Decimal;
use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer};

/// Largest absolute point value accepted for one player in one list.
const MAX_POINTS: i64 = 100_000;

/// Every endpoint wraps its payload as `{status, data, reason}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub status: String,
    pub data: Option<T>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMatchInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    /// "fixture" / "live" / "result", only sent by some endpoints.
    pub ms: Option<String>,
    #[serde(rename = "dateTimeGMT")]
    pub date_time_gmt: Option<String>,
    #[serde(default)]
    pub teams: Vec<String>,
    /// Per-innings score lines; only their presence matters here.
    #[serde(default)]
    pub score: Vec<IgnoredAny>,
    pub toss_winner: Option<String>,
    pub toss_choice: Option<String>,
    pub match_started: Option<bool>,
    pub match_ended: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSquadTeam {
    pub team_name: String,
    #[serde(default)]
    pub players: Vec<RawSquadPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSquadPlayer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawPoints {
    #[serde(default)]
    pub innings: Vec<RawInnings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawInnings {
    #[serde(default)]
    pub inning: String,
    #[serde(default)]
    pub batting: Vec<RawPlayerPoints>,
    #[serde(default)]
    pub bowling: Vec<RawPlayerPoints>,
    #[serde(default)]
    pub catching: Vec<RawPlayerPoints>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPlayerPoints {
    pub id: String,
    #[serde(default, deserialize_with = "bounded_points")]
    pub points: Decimal,
}

/// Rejects absurd values so a malformed payload fails decoding instead of
/// overflowing later sums.
fn bounded_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let points = <Decimal as Deserialize>::deserialize(deserializer)?;
    if points.abs() > Decimal::from(MAX_POINTS) {
        return Err(D::Error::custom(format!(
            "points value {points} is outside -{MAX_POINTS}..={MAX_POINTS}"
        )));
    }
    Ok(points)
}
