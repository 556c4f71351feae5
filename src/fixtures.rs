//! Shared squads and selections for unit tests.

use crate::model::{CandidateSelection, Player, Squad};

pub(crate) const MATCH_ID: &str = "m1";

fn side(prefix: &str, team: &str) -> Vec<Player> {
    let roles = [
        "WK-Batsman",
        "Wicketkeeper",
        "Batsman",
        "Batsman",
        "Batter",
        "Batsman",
        "Batting Allrounder",
        "Bowling Allrounder",
        "Bowler",
        "Bowler",
        "Bowler",
    ];
    roles
        .iter()
        .enumerate()
        .map(|(i, role)| {
            let id = format!("{prefix}{}", i + 1);
            Player::new(id.clone(), format!("Player {id}"), team, *role)
        })
        .collect()
}

/// Two full sides: per side `x1`-`x2` keepers, `x3`-`x6` batsmen,
/// `x7`-`x8` allrounders and `x9`-`x11` bowlers.
pub(crate) fn squad() -> Squad {
    let mut players = side("a", "Team A");
    players.extend(side("b", "Team B"));
    Squad {
        match_id: MATCH_ID.to_string(),
        players,
    }
}

/// 1 keeper, 4 batsmen, 2 allrounders, 4 bowlers; 7 from Team A.
pub(crate) fn valid_selection() -> CandidateSelection {
    CandidateSelection::new(MATCH_ID)
        .with_players([
            "a1", "a3", "a4", "a5", "a7", "a9", "a10", "b3", "b7", "b9", "b10",
        ])
        .with_captain("a3")
        .with_vice_captain("b7")
}
