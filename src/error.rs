/// All errors that can occur while talking to the match-data provider or
/// loading engine configuration.
///
/// Business outcomes (gate denied, validation failures, contest full) are
/// not errors and never show up here.
#[derive(thiserror::Error, Debug)]
pub enum FantasyError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The provider payload was not valid JSON for the expected shape.
    #[error("malformed provider payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The provider answered with a failure envelope.
    #[error("provider reported failure for {endpoint}: {reason}")]
    Provider { endpoint: String, reason: String },

    /// The provider has nothing for this match yet; retry on the next poll.
    #[error("{what} not yet available for match {match_id}")]
    DataUnavailable {
        what: &'static str,
        match_id: String,
    },

    /// Engine configuration cannot be satisfied.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FantasyError>;
