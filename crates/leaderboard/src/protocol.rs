//! Wire types of the score service.
//!
//! All bodies are JSON with camelCase keys. Successful responses carry
//! `success: true` and a `data` payload; errors carry `success: false` and a
//! human-readable `message`.

use serde::{Deserialize, Serialize};

/// Largest accepted score.
pub const MAX_SCORE: u32 = 999_999;
/// Longest accepted player name, in characters.
pub const MAX_NAME_CHARS: usize = 50;
/// Longest accepted email, in characters.
pub const MAX_EMAIL_CHARS: usize = 100;
/// Page size when `limit` is absent or invalid.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Largest page size honoured by `GET /scores`.
pub const MAX_PAGE_LIMIT: u32 = 100;
/// Entries returned by `GET /scores/top5`.
pub const TOP_N: usize = 5;

/// Body of `POST /scores` (validated form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScore {
    pub player_name: String,
    pub player_email: String,
    pub score: u32,
}

/// Public view of a stored score (the email is never exposed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub player_name: String,
    pub score: u32,
    /// Milliseconds since the Unix epoch.
    pub date: u64,
}

/// Leaderboard row with its 1-based rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedScore {
    pub position: u32,
    pub player_name: String,
    pub score: u32,
    pub date: u64,
}

/// `data` of a successful `POST /scores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    pub player_name: String,
    pub score: u32,
    pub is_new_high_score: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_scores: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPlayer {
    pub player_name: String,
    pub max_score: u32,
    pub games_played: u32,
}

/// `data` of `GET /scores/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStats {
    pub highest_score: u32,
    pub lowest_score: u32,
    /// Mean score rounded to two decimals.
    pub average_score: f64,
    pub total_games: u32,
    /// Distinct player emails.
    pub total_players: u32,
    pub top_players: Vec<TopPlayer>,
}

/// Generic success envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Envelope of `GET /scores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePage {
    pub success: bool,
    pub data: Vec<ScoreEntry>,
    pub pagination: Pagination,
}

/// Envelope of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
