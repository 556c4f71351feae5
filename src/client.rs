use itertools::Itertools;
use tracing::{debug, instrument};

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::model::{MatchListKind, MatchSnapshot, MatchSummary, PointsTable, Squad};
use crate::provider::raw::{RawMatchInfo, RawPoints, RawSquadTeam};
use crate::provider::{self, translate, MatchDataProvider};

/// HTTP adapter for a CricAPI-style cricket-data service.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> cricket_fantasy::Result<()> {
/// use cricket_fantasy::{CricketDataClient, FantasyEngine};
///
/// let engine = FantasyEngine::new(CricketDataClient::new("my-api-key"));
/// let decision = engine.check_gate("a1b2c3").await?;
/// println!("{}", decision.reason);
/// # Ok(())
/// # }
/// ```
pub struct CricketDataClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl CricketDataClient {
    /// Create a client against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(ProviderConfig {
            api_key: api_key.into(),
            ..Default::default()
        })
    }

    pub fn from_config(config: ProviderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: ProviderConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch_match_info(&self, match_id: &str) -> Result<Option<RawMatchInfo>> {
        let url = self.endpoint("match_info");
        provider::get_data(
            &self.http,
            &url,
            &[("apikey", self.config.api_key.as_str()), ("id", match_id)],
        )
        .await
    }
}

impl MatchDataProvider for CricketDataClient {
    #[instrument(skip(self))]
    async fn match_snapshot(&self, match_id: &str) -> Result<Option<MatchSnapshot>> {
        let raw = self.fetch_match_info(match_id).await?;
        Ok(raw.as_ref().map(translate::snapshot_from_raw))
    }

    #[instrument(skip(self))]
    async fn squad(&self, match_id: &str) -> Result<Option<Squad>> {
        let url = self.endpoint("match_squad");
        let teams: Option<Vec<RawSquadTeam>> = provider::get_data(
            &self.http,
            &url,
            &[("apikey", self.config.api_key.as_str()), ("id", match_id)],
        )
        .await?;
        let squad = teams
            .filter(|t| !t.is_empty())
            .map(|t| translate::squad_from_raw(match_id, t));
        debug!(
            match_id,
            players = ?squad.as_ref().map(|s| s.players.len()),
            "fetched squad"
        );
        Ok(squad)
    }

    #[instrument(skip(self))]
    async fn points_table(&self, match_id: &str) -> Result<Option<PointsTable>> {
        let url = self.endpoint("match_points");
        let raw: Option<RawPoints> = provider::get_data(
            &self.http,
            &url,
            &[("apikey", self.config.api_key.as_str()), ("id", match_id)],
        )
        .await?;
        let table = raw
            .filter(|p| !p.innings.is_empty())
            .map(|p| translate::points_from_raw(match_id, p));
        debug!(
            match_id,
            innings = ?table.as_ref().map(|t| t.innings.len()),
            "fetched points table"
        );
        Ok(table)
    }

    #[instrument(skip(self))]
    async fn matches(&self, kind: MatchListKind) -> Result<Vec<MatchSummary>> {
        let url = self.endpoint("currentMatches");
        let raw: Option<Vec<RawMatchInfo>> = provider::get_data(
            &self.http,
            &url,
            &[("apikey", self.config.api_key.as_str()), ("offset", "0")],
        )
        .await?;
        let matches = raw
            .unwrap_or_default()
            .iter()
            .map(translate::summary_from_raw)
            .filter(|m| kind.includes(m.state))
            .collect_vec();
        debug!(?kind, count = matches.len(), "fetched match list");
        Ok(matches)
    }
}
