//! Blocking HTTP client for the score service.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::protocol::{
    ApiResponse, ErrorResponse, NewScore, RankedScore, ScoreEntry, ScorePage, ScoreStats,
    SubmitResult,
};

/// Request timeout applied to every call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// 429: the same email submitted too recently.
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// Other 4xx: the service refused the request.
    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// Connection, DNS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    fn from_ureq(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, resp) => {
                let message = resp
                    .into_json::<ErrorResponse>()
                    .map(|body| body.message)
                    .unwrap_or_else(|_| format!("HTTP {status}"));
                match status {
                    429 => ClientError::RateLimited(message),
                    400..=499 => ClientError::Rejected { status, message },
                    _ => ClientError::Server { status, message },
                }
            }
            ureq::Error::Transport(t) => ClientError::Transport(t.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    base_url: String,
    agent: ureq::Agent,
}

impl LeaderboardClient {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self { base_url, agent }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decode<T: DeserializeOwned>(resp: ureq::Response) -> Result<T, ClientError> {
        resp.into_json::<T>()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .agent
            .get(&self.url(path))
            .call()
            .map_err(ClientError::from_ureq)?;
        Self::decode(resp)
    }

    pub fn submit(&self, score: &NewScore) -> Result<SubmitResult, ClientError> {
        let resp = self
            .agent
            .post(&self.url("/scores"))
            .send_json(score)
            .map_err(ClientError::from_ureq)?;
        Self::decode::<ApiResponse<SubmitResult>>(resp).map(|r| r.data)
    }

    pub fn list(&self, page: u32, limit: u32) -> Result<ScorePage, ClientError> {
        self.get(&format!("/scores?page={page}&limit={limit}"))
    }

    pub fn top5(&self) -> Result<Vec<RankedScore>, ClientError> {
        self.get::<ApiResponse<Vec<RankedScore>>>("/scores/top5")
            .map(|r| r.data)
    }

    pub fn stats(&self) -> Result<ScoreStats, ClientError> {
        self.get::<ApiResponse<ScoreStats>>("/scores/stats")
            .map(|r| r.data)
    }

    pub fn highest(&self) -> Result<Option<ScoreEntry>, ClientError> {
        self.get::<ApiResponse<Option<ScoreEntry>>>("/scores/highest")
            .map(|r| r.data)
    }
}
