use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::FantasyConfig;
use crate::engine::{
    can_create_or_edit, leaderboard, resolve_phase, ContestStore, GateDecision, PhaseWatermark,
    ScoreOutcome, ScoringEngine, TeamValidator, ValidationError,
};
use crate::error::{FantasyError, Result};
use crate::model::{
    CandidateSelection, Contest, ContestEntry, JoinOutcome, MatchListKind, MatchPhase,
    MatchSummary, PhaseResolution, PointsTable, ScoredEntry, Squad, ValidatedTeam,
};
use crate::provider::MatchDataProvider;

/// Outcome of submitting a team for a match.
#[derive(Debug, Clone, Serialize)]
pub enum Submission {
    Accepted(ValidatedTeam),
    Rejected(Vec<ValidationError>),
    Locked(GateDecision),
}

/// Entry point the surrounding application talks to.
///
/// Wraps a [`MatchDataProvider`] and runs the pure engine pieces over what it
/// returns. Holds no per-user state; the only memory is the per-match phase
/// watermark.
pub struct FantasyEngine<P> {
    provider: P,
    validator: TeamValidator,
    scoring: ScoringEngine,
    watermark: PhaseWatermark,
}

impl<P: MatchDataProvider> FantasyEngine<P> {
    /// Create an engine with the standard rules.
    pub fn new(provider: P) -> Self {
        Self::build(provider, &FantasyConfig::default())
    }

    /// Create an engine with custom rules, rejecting an inconsistent config
    /// with [`FantasyError::InvalidConfig`].
    pub fn with_config(provider: P, config: &FantasyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(provider, config))
    }

    fn build(provider: P, config: &FantasyConfig) -> Self {
        Self {
            provider,
            validator: TeamValidator::new(config.rules.clone()),
            scoring: ScoringEngine::new(config.multipliers),
            watermark: PhaseWatermark::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn validator(&self) -> &TeamValidator {
        &self.validator
    }

    async fn resolution(&self, match_id: &str) -> Result<PhaseResolution> {
        let snapshot = self.provider.match_snapshot(match_id).await?;
        let observed = resolve_phase(snapshot.as_ref());
        Ok(self.watermark.observe(match_id, observed))
    }

    async fn require_squad(&self, match_id: &str) -> Result<Squad> {
        self.provider
            .squad(match_id)
            .await?
            .ok_or_else(|| FantasyError::DataUnavailable {
                what: "squad",
                match_id: match_id.to_string(),
            })
    }

    /// Current phase of a match, never less advanced than a previously seen
    /// Live or Completed.
    #[instrument(skip(self))]
    pub async fn resolve_phase(&self, match_id: &str) -> Result<MatchPhase> {
        Ok(self.resolution(match_id).await?.phase)
    }

    #[instrument(skip(self))]
    pub async fn check_gate(&self, match_id: &str) -> Result<GateDecision> {
        let resolution = self.resolution(match_id).await?;
        let decision = can_create_or_edit(&resolution);
        debug!(match_id, phase = %resolution.phase, open = decision.can_create, "gate checked");
        Ok(decision)
    }

    /// Validate a selection against the match squad.
    ///
    /// The outer `Result` fails on provider problems (including a squad that
    /// is not published yet); the inner one carries the full list of
    /// composition problems.
    #[instrument(skip(self, selection), fields(match_id = %selection.match_id))]
    pub async fn validate_selection(
        &self,
        selection: &CandidateSelection,
    ) -> Result<std::result::Result<ValidatedTeam, Vec<ValidationError>>> {
        let squad = self.require_squad(&selection.match_id).await?;
        Ok(self.validator.validate(selection, &squad))
    }

    /// Whether `player_id` can be added to a partial selection.
    #[instrument(skip(self, selection), fields(match_id = %selection.match_id))]
    pub async fn can_add_player(
        &self,
        selection: &CandidateSelection,
        player_id: &str,
    ) -> Result<bool> {
        let squad = self.require_squad(&selection.match_id).await?;
        Ok(squad
            .get(player_id)
            .is_some_and(|player| self.validator.can_add_player(selection, player, &squad)))
    }

    /// Gate-checked creation or replacement of a team.
    ///
    /// The returned team replaces whatever the caller stored before.
    #[instrument(skip(self, selection), fields(match_id = %selection.match_id))]
    pub async fn submit_team(&self, selection: &CandidateSelection) -> Result<Submission> {
        let decision = self.check_gate(&selection.match_id).await?;
        if !decision.can_create {
            return Ok(Submission::Locked(decision));
        }
        let submission = match self.validate_selection(selection).await? {
            Ok(team) => Submission::Accepted(team),
            Err(errors) => Submission::Rejected(errors),
        };
        info!(
            accepted = matches!(submission, Submission::Accepted(_)),
            "team submitted"
        );
        Ok(submission)
    }

    /// Take a slot in a contest, provided teams may still be entered for its match.
    #[instrument(skip(self, store, contest), fields(contest_id = %contest.id))]
    pub async fn join_contest<S: ContestStore>(
        &self,
        store: &S,
        contest: &Contest,
    ) -> Result<JoinOutcome> {
        let decision = self.check_gate(&contest.match_id).await?;
        if !decision.can_create {
            return Ok(JoinOutcome::Closed);
        }
        Ok(store.try_join(&contest.id))
    }

    #[instrument(skip(self, team), fields(match_id = %team.match_id()))]
    pub async fn score_team(&self, team: &ValidatedTeam) -> Result<ScoreOutcome> {
        let table = self.provider.points_table(team.match_id()).await?;
        Ok(self.scoring.score_team(team, table.as_ref()))
    }

    /// Score and rank every entry belonging to `contest_id`.
    ///
    /// Entries for other contests are ignored. Fails with
    /// [`FantasyError::DataUnavailable`] while the match is unscored.
    #[instrument(skip(self, entries))]
    pub async fn rank_contest(
        &self,
        contest_id: &str,
        entries: &[ContestEntry],
    ) -> Result<Vec<ScoredEntry>> {
        let entries = entries
            .iter()
            .filter(|e| e.contest_id == contest_id)
            .collect_vec();

        let mut tables: HashMap<&str, PointsTable> = HashMap::new();
        for match_id in entries.iter().map(|e| e.team.match_id()).unique() {
            let table = self.provider.points_table(match_id).await?.ok_or_else(|| {
                FantasyError::DataUnavailable {
                    what: "points table",
                    match_id: match_id.to_string(),
                }
            })?;
            tables.insert(match_id, table);
        }

        let scored = entries
            .iter()
            .map(|entry| {
                let table = tables.get(entry.team.match_id());
                let total = self
                    .scoring
                    .score_team(&entry.team, table)
                    .points()
                    .unwrap_or_default();
                ScoredEntry::unranked(contest_id, entry.team_id.clone(), total)
            })
            .collect_vec();

        let ranked = leaderboard::rank(scored);
        debug!(contest_id, entries = ranked.len(), "contest ranked");
        Ok(ranked)
    }

    pub async fn matches(&self, kind: MatchListKind) -> Result<Vec<MatchSummary>> {
        self.provider.matches(kind).await
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use super::*;
    use crate::engine::gate::{REASON_AWAITING_TOSS, REASON_NOT_FOUND};
    use crate::engine::InMemoryContestStore;
    use crate::fixtures::{squad, valid_selection, MATCH_ID};
    use crate::model::{Innings, MatchSnapshot, MatchState, PlayerPoints, TossChoice, TossInfo};

    #[derive(Default)]
    struct FakeProvider {
        snapshot: Mutex<Option<MatchSnapshot>>,
        squad: Option<Squad>,
        points: Option<PointsTable>,
    }

    impl FakeProvider {
        fn set_snapshot(&self, state: MatchState, toss_winner: Option<&str>) {
            *self.snapshot.lock().unwrap() = Some(MatchSnapshot {
                match_id: MATCH_ID.to_string(),
                state,
                scheduled_start: None,
                status_text: String::new(),
                toss_winner: toss_winner.map(str::to_string),
                toss_choice: toss_winner.map(|_| TossChoice::Bat),
            });
        }
    }

    impl MatchDataProvider for FakeProvider {
        async fn match_snapshot(&self, match_id: &str) -> Result<Option<MatchSnapshot>> {
            Ok(self
                .snapshot
                .lock()
                .unwrap()
                .clone()
                .filter(|s| s.match_id == match_id))
        }

        async fn squad(&self, _match_id: &str) -> Result<Option<Squad>> {
            Ok(self.squad.clone())
        }

        async fn points_table(&self, _match_id: &str) -> Result<Option<PointsTable>> {
            Ok(self.points.clone())
        }

        async fn matches(&self, _kind: MatchListKind) -> Result<Vec<MatchSummary>> {
            Ok(Vec::new())
        }
    }

    fn engine_with(state: Option<(MatchState, Option<&str>)>) -> FantasyEngine<FakeProvider> {
        let provider = FakeProvider {
            squad: Some(squad()),
            ..Default::default()
        };
        if let Some((state, toss)) = state {
            provider.set_snapshot(state, toss);
        }
        FantasyEngine::new(provider)
    }

    fn points(entries: &[(&str, &str)]) -> PointsTable {
        PointsTable {
            match_id: MATCH_ID.to_string(),
            innings: vec![Innings {
                name: "Team A Inning 1".to_string(),
                entries: entries
                    .iter()
                    .map(|(id, batting)| PlayerPoints {
                        player_id: id.to_string(),
                        batting: Decimal::from_str(batting).unwrap(),
                        bowling: Decimal::ZERO,
                        fielding: Decimal::ZERO,
                    })
                    .collect(),
            }],
        }
    }

    #[tokio::test]
    async fn gate_for_unknown_match() {
        let decision = engine_with(None).check_gate(MATCH_ID).await.unwrap();
        assert!(!decision.can_create);
        assert_eq!(decision.reason, REASON_NOT_FOUND);
    }

    #[tokio::test]
    async fn gate_waits_for_toss() {
        let engine = engine_with(Some((MatchState::Fixture, None)));
        let decision = engine.check_gate(MATCH_ID).await.unwrap();
        assert!(!decision.can_create);
        assert_eq!(decision.reason, REASON_AWAITING_TOSS);
    }

    #[tokio::test]
    async fn gate_opens_after_toss() {
        let engine = engine_with(Some((MatchState::Fixture, Some("Team A"))));
        let decision = engine.check_gate(MATCH_ID).await.unwrap();
        assert!(decision.can_create);
        assert!(decision.can_edit);
        assert_eq!(
            decision.toss_info,
            Some(TossInfo {
                winner: "Team A".to_string(),
                choice: Some(TossChoice::Bat),
            })
        );
    }

    #[tokio::test]
    async fn gate_locks_for_live_and_completed() {
        let live = engine_with(Some((MatchState::Live, Some("Team A"))));
        let decision = live.check_gate(MATCH_ID).await.unwrap();
        assert!(!decision.can_create);
        assert!(decision.reason.contains("locked"));

        let done = engine_with(Some((MatchState::Result, Some("Team A"))));
        let decision = done.check_gate(MATCH_ID).await.unwrap();
        assert!(!decision.can_create);
        assert!(decision.reason.contains("ended"));
    }

    #[tokio::test]
    async fn stale_fixture_poll_does_not_reopen_gate() {
        let engine = engine_with(Some((MatchState::Live, Some("Team A"))));
        assert_eq!(engine.resolve_phase(MATCH_ID).await.unwrap(), MatchPhase::Live);

        engine
            .provider()
            .set_snapshot(MatchState::Fixture, Some("Team A"));
        assert_eq!(engine.resolve_phase(MATCH_ID).await.unwrap(), MatchPhase::Live);
        assert!(!engine.check_gate(MATCH_ID).await.unwrap().can_create);
    }

    #[tokio::test]
    async fn submit_is_locked_before_toss() {
        let engine = engine_with(Some((MatchState::Fixture, None)));
        let submission = engine.submit_team(&valid_selection()).await.unwrap();
        assert!(matches!(submission, Submission::Locked(d) if d.reason == REASON_AWAITING_TOSS));
    }

    #[tokio::test]
    async fn submit_validates_after_toss() {
        let engine = engine_with(Some((MatchState::Fixture, Some("Team B"))));
        let submission = engine.submit_team(&valid_selection()).await.unwrap();
        assert!(matches!(submission, Submission::Accepted(_)));

        let invalid = valid_selection().with_vice_captain("a3");
        let submission = engine.submit_team(&invalid).await.unwrap();
        match submission {
            Submission::Rejected(errors) => {
                assert_eq!(errors, vec![ValidationError::CaptainEqualsViceCaptain])
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_squad_is_data_unavailable() {
        let engine = FantasyEngine::new(FakeProvider::default());
        let result = engine.validate_selection(&valid_selection()).await;
        assert!(matches!(
            result,
            Err(FantasyError::DataUnavailable { what: "squad", .. })
        ));
    }

    #[tokio::test]
    async fn can_add_player_looks_up_squad() {
        let engine = engine_with(None);
        let selection = CandidateSelection::new(MATCH_ID).with_players(["a1"]);
        assert!(engine.can_add_player(&selection, "a2").await.unwrap());
        assert!(!engine.can_add_player(&selection, "a1").await.unwrap());
        assert!(!engine.can_add_player(&selection, "nobody").await.unwrap());
    }

    #[tokio::test]
    async fn score_team_distinguishes_unscored() {
        let engine = engine_with(None);
        let team = engine
            .validate_selection(&valid_selection())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            engine.score_team(&team).await.unwrap(),
            ScoreOutcome::NotYetAvailable
        );
    }

    #[tokio::test]
    async fn rank_contest_scores_and_ranks() {
        let provider = FakeProvider {
            squad: Some(squad()),
            points: Some(points(&[("a3", "40"), ("b7", "40"), ("a4", "10.5")])),
            ..Default::default()
        };
        let engine = FantasyEngine::new(provider);
        let validate = |selection: CandidateSelection| {
            engine.validator().validate(&selection, &squad()).unwrap()
        };

        // a3 captain, b7 vice: 80 + 60 + 10.5
        let first = validate(valid_selection());
        // b7 captain, a3 vice: same total
        let swapped = validate(valid_selection().with_captain("b7").with_vice_captain("a3"));
        // a4 captain, a5 vice: 21 + 0 + 40 + 40
        let third = validate(valid_selection().with_captain("a4").with_vice_captain("a5"));

        let entry = |contest: &str, team_id: &str, team: ValidatedTeam| ContestEntry {
            contest_id: contest.to_string(),
            team_id: team_id.to_string(),
            team,
        };
        let entries = vec![
            entry("c1", "t3", third),
            entry("c1", "t2", swapped),
            entry("c1", "t1", first.clone()),
            entry("c2", "t9", first),
        ];

        let ranked = engine.rank_contest("c1", &entries).await.unwrap();
        let summary = ranked
            .iter()
            .map(|e| (e.team_id.as_str(), e.total_points, e.rank))
            .collect_vec();
        assert_eq!(
            summary,
            vec![
                ("t1", Decimal::from_str("150.5").unwrap(), 1),
                ("t2", Decimal::from_str("150.5").unwrap(), 1),
                ("t3", Decimal::from_str("101").unwrap(), 3),
            ]
        );
    }

    #[tokio::test]
    async fn rank_contest_without_points_is_unavailable() {
        let engine = engine_with(None);
        let team = engine.validator().validate(&valid_selection(), &squad()).unwrap();
        let entries = vec![ContestEntry {
            contest_id: "c1".to_string(),
            team_id: "t1".to_string(),
            team,
        }];
        assert!(matches!(
            engine.rank_contest("c1", &entries).await,
            Err(FantasyError::DataUnavailable {
                what: "points table",
                ..
            })
        ));
    }

    #[test]
    fn with_config_rejects_inverted_bounds() {
        let mut config = FantasyConfig::default();
        config.rules.wicketkeepers.min = 5;
        config.rules.wicketkeepers.max = 2;
        assert!(matches!(
            FantasyEngine::with_config(FakeProvider::default(), &config),
            Err(FantasyError::InvalidConfig(_))
        ));
        let default = FantasyConfig::default();
        assert!(FantasyEngine::with_config(FakeProvider::default(), &default).is_ok());
    }

    #[tokio::test]
    async fn stored_entry_scores_after_player_leaves_squad() {
        let team = engine_with(None)
            .validator()
            .validate(&valid_selection(), &squad())
            .unwrap();
        let stored = serde_json::to_string(&ContestEntry {
            contest_id: "c1".to_string(),
            team_id: "t1".to_string(),
            team,
        })
        .unwrap();

        // a10 has been withdrawn since the team was submitted.
        let mut current = squad();
        current.players.retain(|p| p.id != "a10");
        let provider = FakeProvider {
            squad: Some(current.clone()),
            points: Some(points(&[("a3", "40"), ("a10", "25"), ("a4", "10")])),
            ..Default::default()
        };
        let engine = FantasyEngine::new(provider);

        let entry: ContestEntry = serde_json::from_str(&stored).unwrap();
        let revalidated = engine.validator().validate(&entry.team.selection(), &current);
        assert_eq!(
            revalidated.unwrap_err(),
            vec![ValidationError::UnknownPlayer("a10".to_string())]
        );

        // a3 captain 80, a10 still counted as submitted 25, a4 10.
        assert_eq!(
            engine.score_team(&entry.team).await.unwrap(),
            ScoreOutcome::Scored(Decimal::from(115))
        );
        let ranked = engine.rank_contest("c1", &[entry]).await.unwrap();
        assert_eq!(ranked[0].total_points, Decimal::from(115));
        assert_eq!(ranked[0].rank, 1);
    }

    #[tokio::test]
    async fn join_contest_respects_gate_and_capacity() {
        let contest = Contest {
            id: "c1".to_string(),
            match_id: MATCH_ID.to_string(),
            capacity: 1,
        };
        let mut store = InMemoryContestStore::new();
        store.register(&contest);

        let engine = engine_with(Some((MatchState::Fixture, None)));
        assert_eq!(
            engine.join_contest(&store, &contest).await.unwrap(),
            JoinOutcome::Closed
        );

        engine
            .provider()
            .set_snapshot(MatchState::Fixture, Some("Team A"));
        assert_eq!(
            engine.join_contest(&store, &contest).await.unwrap(),
            JoinOutcome::Joined { participants: 1 }
        );
        assert_eq!(
            engine.join_contest(&store, &contest).await.unwrap(),
            JoinOutcome::Full
        );
    }
}
