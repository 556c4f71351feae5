pub(crate) mod raw;
pub(crate) mod translate;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{FantasyError, Result};
use crate::model::{MatchListKind, MatchSnapshot, MatchSummary, PointsTable, Squad};
use raw::Envelope;

/// Read-only view of an upstream cricket-data source.
///
/// `Ok(None)` means the provider has nothing for the match (unknown match,
/// squad not announced, points not computed yet). Errors are reserved for
/// transport failures and malformed payloads.
#[allow(async_fn_in_trait)]
pub trait MatchDataProvider {
    async fn match_snapshot(&self, match_id: &str) -> Result<Option<MatchSnapshot>>;

    async fn squad(&self, match_id: &str) -> Result<Option<Squad>>;

    async fn points_table(&self, match_id: &str) -> Result<Option<PointsTable>>;

    async fn matches(&self, kind: MatchListKind) -> Result<Vec<MatchSummary>>;
}

/// Failure reasons the provider uses for "no data yet" rather than a real error.
const EMPTY_REASONS: &[&str] = &["not found", "not available", "no data", "not yet"];

/// Fetch an endpoint and unwrap its `{status, data, reason}` envelope.
///
/// `url` is the endpoint without query parameters; it is what ends up in
/// logs and errors, so the API key never does.
pub(crate) async fn get_data<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, &str)],
) -> Result<Option<T>> {
    debug!(url, "fetching provider payload");

    let request_url =
        reqwest::Url::parse_with_params(url, params).map_err(|e| FantasyError::Provider {
            endpoint: url.to_owned(),
            reason: format!("invalid url: {e}"),
        })?;

    let response = client
        .get(request_url)
        .send()
        .await
        .map_err(|e| FantasyError::Http {
            url: url.to_owned(),
            source: e.without_url(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FantasyError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| FantasyError::ResponseBody {
            url: url.to_owned(),
            source: e.without_url(),
        })?;

    unwrap_envelope(url, serde_json::from_str(&body)?)
}

fn unwrap_envelope<T>(url: &str, envelope: Envelope<T>) -> Result<Option<T>> {
    if envelope.status.eq_ignore_ascii_case("success") {
        return Ok(envelope.data);
    }

    let reason = envelope.reason.unwrap_or_default();
    let lower = reason.to_ascii_lowercase();
    if EMPTY_REASONS.iter().any(|r| lower.contains(r)) {
        debug!(url, reason = %reason, "provider has no data");
        return Ok(None);
    }
    Err(FantasyError::Provider {
        endpoint: url.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> Envelope<Vec<u32>> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn success_envelope_yields_data() {
        let data = unwrap_envelope("x", envelope(r#"{"status": "success", "data": [1, 2]}"#));
        assert_eq!(data.unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn success_without_data_is_empty() {
        let data = unwrap_envelope("x", envelope(r#"{"status": "success", "data": null}"#));
        assert_eq!(data.unwrap(), None);
    }

    #[test]
    fn not_found_failure_is_empty() {
        let data = unwrap_envelope(
            "x",
            envelope(r#"{"status": "failure", "reason": "ERR: Match not found"}"#),
        );
        assert_eq!(data.unwrap(), None);
    }

    #[test]
    fn other_failures_are_errors() {
        let data = unwrap_envelope(
            "x",
            envelope(r#"{"status": "failure", "reason": "Invalid API key"}"#),
        );
        assert!(matches!(data, Err(FantasyError::Provider { .. })));
    }
}
