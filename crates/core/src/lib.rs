//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the Snake rules: the game state, the single-step
//! simulation, food placement and difficulty scaling. It has **zero
//! dependencies** on UI, networking, timers, or I/O, making it:
//!
//! - **Deterministic**: Same seed and same inputs produce identical games
//! - **Testable**: `tick` is a plain function from state to state
//! - **Portable**: Can run in any environment (terminal, server, headless)
//!
//! # Module Structure
//!
//! - [`engine`]: `tick`, food placement and collision predicates
//! - [`game_state`]: Complete session state and lifecycle commands
//! - [`snake`]: Ordered snake segments, head first
//! - [`difficulty`]: Score and tick-interval progression
//! - [`rng`]: Seeded LCG used for food placement
//! - [`snapshot`]: Allocation-free copies for renderers
//!
//! # Game Rules
//!
//! - **Grid**: 20x20 cells; leaving the grid is fatal
//! - **Turning**: a request is applied at the next tick unless it reverses the
//!   current heading
//! - **Self collision**: moving onto any segment (including the tail) is fatal
//! - **Food**: +10 points, the snake grows by one, the tick interval shrinks by
//!   2ms down to 50ms
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{engine, GameState};
//! use tui_snake_types::{Direction, GameStatus, Position};
//!
//! let mut game = GameState::new(12345);
//! game.start().unwrap();
//!
//! let game = engine::tick(&game, Some(Direction::Left)).unwrap();
//! assert_eq!(game.snake().head(), Position::new(9, 10));
//! assert_eq!(game.status(), GameStatus::Running);
//! ```

pub mod difficulty;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod snake;
pub mod snapshot;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use difficulty::{next_speed_ms, score_after, speed_after};
pub use engine::{place_food, tick, try_place_food};
pub use error::EngineError;
pub use game_state::GameState;
pub use rng::SimpleRng;
pub use snake::Snake;
pub use snapshot::GameSnapshot;
