//! Leaderboard module - score service, store and client
//!
//! The service side is an axum router over an in-memory [`ScoreStore`]; the
//! game side is a blocking [`LeaderboardClient`] wrapped in a
//! [`ScoreReporter`] so a finished game can submit its score without stalling
//! the render loop.
//!
//! # Examples
//!
//! ```
//! use tui_snake_leaderboard::{NewScore, ScoreStore};
//!
//! let mut store = ScoreStore::default();
//! let saved = store
//!     .submit(
//!         NewScore {
//!             player_name: "Ana".into(),
//!             player_email: "ana@example.com".into(),
//!             score: 120,
//!         },
//!         0,
//!     )
//!     .unwrap();
//! assert!(saved.is_new_high_score);
//! assert_eq!(store.top5()[0].position, 1);
//! ```

pub mod client;
pub mod error;
pub mod protocol;
pub mod reporter;
pub mod server;
pub mod store;
pub mod validate;

pub use client::{ClientError, LeaderboardClient};
pub use error::{ApiError, StoreError, ValidationError};
pub use protocol::*;
pub use reporter::{PlayerIdentity, ReportOutcome, ScoreReporter};
pub use server::{now_ms, router, run_server, AppState, ServerConfig};
pub use store::{PageRequest, ScoreStore, StoredScore, RATE_LIMIT_WINDOW_MS};
pub use validate::{is_valid_email, parse_submission};
