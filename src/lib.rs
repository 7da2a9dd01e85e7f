//! TUI Snake (workspace facade crate).
//!
//! Re-exports the workspace crates under one path so the binaries, benches
//! and integration tests can use `tui_snake::{core, session, ...}`.

pub use tui_snake_core as core;
pub use tui_snake_input as input;
pub use tui_snake_leaderboard as leaderboard;
pub use tui_snake_session as session;
pub use tui_snake_term as term;
pub use tui_snake_types as types;
