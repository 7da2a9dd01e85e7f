//! HTTP score service.
//!
//! | Route | Method | Response |
//! |-------|--------|----------|
//! | `/scores` | POST | 201 `SubmitResult`, 400 invalid body, 429 rate limited |
//! | `/scores?limit=&page=` | GET | ranked page with pagination |
//! | `/scores/top5` | GET | five best, with positions |
//! | `/scores/stats` | GET | aggregate statistics |
//! | `/scores/highest` | GET | best entry or `null` |
//! | anything else | * | 404 |

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{ConnectInfo, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::protocol::{ApiResponse, RankedScore, ScoreEntry, ScorePage, ScoreStats, SubmitResult};
use crate::store::{PageRequest, ScoreStore, DEFAULT_MAX_SCORES};
use crate::validate::parse_submission;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_scores: usize,
    /// Also allow one submission per client address per window.
    pub throttle_by_ip: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_scores: DEFAULT_MAX_SCORES,
            throttle_by_ip: true,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let host = env::var("SNAKE_LEADERBOARD_HOST")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = env::var("SNAKE_LEADERBOARD_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.port);
        let max_scores = env::var("SNAKE_LEADERBOARD_MAX_SCORES")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_scores);
        let throttle_by_ip = env::var("SNAKE_LEADERBOARD_THROTTLE_IP")
            .ok()
            .map(|s| !matches!(s.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(defaults.throttle_by_ip);

        Self {
            host,
            port,
            max_scores,
            throttle_by_ip,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<Mutex<ScoreStore>>,
    throttle_by_ip: bool,
}

impl AppState {
    pub fn new(store: ScoreStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            throttle_by_ip: true,
        }
    }

    pub fn with_ip_throttle(mut self, enabled: bool) -> Self {
        self.throttle_by_ip = enabled;
        self
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/scores", get(list_scores).post(submit_score))
        .route("/scores/top5", get(top5))
        .route("/scores/stats", get(stats))
        .route("/scores/highest", get(highest))
        .fallback(not_found)
        .with_state(state)
}

async fn submit_score(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitResult>>), ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadJson(e.body_text()))?;

    let score = parse_submission(&body).map_err(|e| {
        warn!(error = %e, "rejected score submission");
        e
    })?;

    let client_ip = peer
        .filter(|_| state.throttle_by_ip)
        .map(|ConnectInfo(addr)| addr.ip());
    let result = state
        .store
        .lock()
        .await
        .submit_from(score, client_ip, now_ms())
        .map_err(|e| {
            warn!(error = %e, ip = ?client_ip, "score not stored");
            e
        })?;

    info!(
        player = %result.player_name,
        score = result.score,
        high = result.is_new_high_score,
        "score saved"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(result, "Score saved successfully")),
    ))
}

/// Query pairs in order; the first occurrence of a key wins and a query
/// string that cannot be decoded is treated as empty.
async fn list_scores(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<ScorePage> {
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let first = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };
    let req = PageRequest::from_query(first("page"), first("limit"));
    let (data, pagination) = state.store.lock().await.page(req);
    Json(ScorePage {
        success: true,
        data,
        pagination,
    })
}

async fn top5(State(state): State<AppState>) -> Json<ApiResponse<Vec<RankedScore>>> {
    Json(ApiResponse::ok(state.store.lock().await.top5()))
}

async fn stats(State(state): State<AppState>) -> Json<ApiResponse<ScoreStats>> {
    Json(ApiResponse::ok(state.store.lock().await.stats()))
}

async fn highest(State(state): State<AppState>) -> Json<ApiResponse<Option<ScoreEntry>>> {
    Json(ApiResponse::ok(state.store.lock().await.highest()))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Bind and serve until Ctrl-C.
///
/// When `ready_tx` is given, the bound address is sent once the listener is
/// up (port 0 resolves to the real port).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        max_scores = config.max_scores,
        throttle_by_ip = config.throttle_by_ip,
        "leaderboard listening"
    );

    if let Some(tx) = ready_tx {
        let _ = tx.send(addr);
    }

    let state = AppState::new(ScoreStore::new(config.max_scores))
        .with_ip_throttle(config.throttle_by_ip);
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;
    Ok(())
}
