//! Fire-and-forget score reporting.
//!
//! Bridges the synchronous game loop with the blocking client: each report
//! runs on its own thread and the outcome comes back over a channel the loop
//! polls with [`ScoreReporter::try_recv`]. Nothing here touches game state.

use std::sync::mpsc;
use std::thread;

use tracing::{info, warn};

use crate::client::{ClientError, LeaderboardClient};
use crate::protocol::{NewScore, SubmitResult};

/// Who the scores are submitted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub name: String,
    pub email: String,
}

/// Result of one report, delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Saved(SubmitResult),
    /// Submitted again too soon; try later.
    RateLimited(String),
    /// The service refused the submission (validation).
    Rejected(String),
    /// Network or server failure.
    Failed(String),
}

impl ReportOutcome {
    fn from_result(result: Result<SubmitResult, ClientError>) -> Self {
        match result {
            Ok(saved) => ReportOutcome::Saved(saved),
            Err(ClientError::RateLimited(msg)) => ReportOutcome::RateLimited(msg),
            Err(ClientError::Rejected { message, .. }) => ReportOutcome::Rejected(message),
            Err(e) => ReportOutcome::Failed(e.to_string()),
        }
    }

    /// One-line status for the HUD.
    pub fn summary(&self) -> String {
        match self {
            ReportOutcome::Saved(r) if r.is_new_high_score => {
                format!("Score {} saved: new high score!", r.score)
            }
            ReportOutcome::Saved(r) => format!("Score {} saved", r.score),
            ReportOutcome::RateLimited(msg) => format!("Not saved: {msg}"),
            ReportOutcome::Rejected(msg) => format!("Rejected: {msg}"),
            ReportOutcome::Failed(msg) => format!("Leaderboard unavailable: {msg}"),
        }
    }
}

pub struct ScoreReporter {
    client: LeaderboardClient,
    identity: PlayerIdentity,
    tx: mpsc::Sender<ReportOutcome>,
    rx: mpsc::Receiver<ReportOutcome>,
    in_flight: usize,
}

impl ScoreReporter {
    pub fn new(client: LeaderboardClient, identity: PlayerIdentity) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            identity,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    /// Reports started but not yet collected.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Submit `score` in the background.
    pub fn report(&mut self, score: u32) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let body = NewScore {
            player_name: self.identity.name.clone(),
            player_email: self.identity.email.clone(),
            score,
        };

        let spawned = thread::Builder::new()
            .name("score-reporter".to_string())
            .spawn(move || {
                let outcome = ReportOutcome::from_result(client.submit(&body));
                match &outcome {
                    ReportOutcome::Saved(_) => info!(score, "score reported"),
                    other => warn!(score, outcome = ?other, "score report not saved"),
                }
                let _ = tx.send(outcome);
            });

        match spawned {
            Ok(_) => self.in_flight += 1,
            Err(e) => {
                warn!(error = %e, "failed to spawn reporter thread");
                let _ = self.tx.send(ReportOutcome::Failed(e.to_string()));
                self.in_flight += 1;
            }
        }
    }

    /// Next finished report, if any. Never blocks.
    pub fn try_recv(&mut self) -> Option<ReportOutcome> {
        let outcome = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }
}
