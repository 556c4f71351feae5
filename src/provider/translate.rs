//! Conversion from provider wire shapes into the engine's closed types.
//!
//! All sniffing of human-readable status text happens here so the engine
//! only ever sees [`MatchState`] and [`TossChoice`].

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::model::{
    Innings, MatchSnapshot, MatchState, MatchSummary, Player, PlayerPoints, PointsTable, Squad,
    TossChoice,
};
use crate::provider::raw::{RawInnings, RawMatchInfo, RawPoints, RawSquadTeam};

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const RESULT_MARKERS: &[&str] = &[
    "won by",
    "beat ",
    "match drawn",
    "match tied",
    "tied",
    "no result",
    "abandoned",
    "won the super over",
];

const LIVE_MARKERS: &[&str] = &[
    "innings break",
    " need ",
    " needs ",
    " require ",
    "trail by",
    "lead by",
    "stumps",
    "lunch",
    "tea break",
    "tea -",
    "drinks",
    "strategic timeout",
    "rain stopped play",
];

const TOSS_MARKERS: &[&str] = &["won the toss", " opt to ", " opted to ", " elected to ", " chose to "];

const FIXTURE_MARKERS: &[&str] = &[
    "match not started",
    "starts at",
    "yet to begin",
    "scheduled",
];

/// Map raw provider fields to a coarse match state.
///
/// An explicit `ms` field wins. Otherwise the flags, the presence of score
/// lines and the status wording are consulted, most final first.
pub(crate) fn match_state_from_raw(raw: &RawMatchInfo) -> MatchState {
    if let Some(state) = raw.ms.as_deref().and_then(|ms| ms.parse().ok()) {
        return state;
    }

    let status = raw.status.to_ascii_lowercase();
    let mentions = |markers: &[&str]| markers.iter().any(|m| status.contains(m));

    if raw.match_ended == Some(true) || mentions(RESULT_MARKERS) {
        return MatchState::Result;
    }
    if !raw.score.is_empty() || mentions(LIVE_MARKERS) {
        return MatchState::Live;
    }
    if mentions(TOSS_MARKERS) || mentions(FIXTURE_MARKERS) {
        return MatchState::Fixture;
    }

    if !status.trim().is_empty() {
        warn!(
            match_id = %raw.id,
            status = %raw.status,
            "unrecognised match status wording, falling back to matchStarted flag"
        );
    }
    if raw.match_started == Some(true) {
        MatchState::Live
    } else {
        MatchState::Fixture
    }
}

/// Toss winner and choice, preferring structured fields over status text.
pub(crate) fn toss_from_raw(raw: &RawMatchInfo) -> (Option<String>, Option<TossChoice>) {
    let winner = raw
        .toss_winner
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string);
    let choice = raw.toss_choice.as_deref().and_then(|c| c.trim().parse().ok());

    match winner {
        Some(winner) => (Some(winner), choice.or_else(|| toss_from_status(&raw.status).1)),
        None => toss_from_status(&raw.status),
    }
}

/// Parse "X won the toss and elected to bat" / "X opt to bowl".
fn toss_from_status(status: &str) -> (Option<String>, Option<TossChoice>) {
    let lower = status.to_ascii_lowercase();
    let Some(winner_end) = TOSS_MARKERS
        .iter()
        .filter_map(|m| lower.find(m))
        .min()
    else {
        return (None, None);
    };

    let winner = status[..winner_end].trim();
    if winner.is_empty() {
        return (None, None);
    }

    let choice = lower[winner_end..]
        .split_once(" to ")
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .map(|word| word.trim_matches(|c: char| !c.is_ascii_alphabetic()))
        .and_then(|word| word.parse().ok());

    (Some(winner.to_string()), choice)
}

fn parse_date_time(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?.trim();
    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

pub(crate) fn snapshot_from_raw(raw: &RawMatchInfo) -> MatchSnapshot {
    let state = match_state_from_raw(raw);
    let (toss_winner, toss_choice) = toss_from_raw(raw);
    let snapshot = MatchSnapshot {
        match_id: raw.id.clone(),
        state,
        scheduled_start: parse_date_time(raw.date_time_gmt.as_deref()),
        status_text: raw.status.clone(),
        toss_winner,
        toss_choice,
    };
    debug!(
        match_id = %snapshot.match_id,
        state = %snapshot.state,
        toss = ?snapshot.toss_winner,
        "translated match info"
    );
    snapshot
}

pub(crate) fn summary_from_raw(raw: &RawMatchInfo) -> MatchSummary {
    MatchSummary {
        id: raw.id.clone(),
        name: raw.name.clone(),
        teams: raw.teams.clone(),
        state: match_state_from_raw(raw),
        scheduled_start: parse_date_time(raw.date_time_gmt.as_deref()),
        status_text: raw.status.clone(),
    }
}

pub(crate) fn squad_from_raw(match_id: &str, teams: Vec<RawSquadTeam>) -> Squad {
    let players = teams
        .into_iter()
        .flat_map(|team| {
            let team_name = team.team_name;
            team.players
                .into_iter()
                .map(move |p| Player::new(p.id, p.name, team_name.clone(), p.role))
        })
        .collect();
    Squad {
        match_id: match_id.to_string(),
        players,
    }
}

pub(crate) fn points_from_raw(match_id: &str, raw: RawPoints) -> PointsTable {
    PointsTable {
        match_id: match_id.to_string(),
        innings: raw.innings.into_iter().map(innings_from_raw).collect(),
    }
}

/// Merge the batting, bowling and catching lists of one innings into a
/// single entry per player.
fn innings_from_raw(raw: RawInnings) -> Innings {
    let mut entries: Vec<PlayerPoints> = Vec::new();
    for p in raw.batting {
        entry_for(&mut entries, p.id).batting += p.points;
    }
    for p in raw.bowling {
        entry_for(&mut entries, p.id).bowling += p.points;
    }
    for p in raw.catching {
        entry_for(&mut entries, p.id).fielding += p.points;
    }
    Innings {
        name: raw.inning,
        entries,
    }
}

fn entry_for(entries: &mut Vec<PlayerPoints>, player_id: String) -> &mut PlayerPoints {
    let index = match entries.iter().position(|e| e.player_id == player_id) {
        Some(index) => index,
        None => {
            entries.push(PlayerPoints {
                player_id,
                batting: Decimal::ZERO,
                bowling: Decimal::ZERO,
                fielding: Decimal::ZERO,
            });
            entries.len() - 1
        }
    };
    &mut entries[index]
}
