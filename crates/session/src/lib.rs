//! Session module - lifecycle state machine and tick scheduling
//!
//! Sits between the pure engine and the outside world. The [`Session`] owns
//! the one live game state, buffers input through the
//! [`InputController`](crate::input::InputController), and drives ticks from a
//! [`TickScheduler`]. The default [`IntervalScheduler`] is deadline based and
//! suits a single-threaded polling loop:
//!
//! ```
//! use std::time::{Duration, Instant};
//! use tui_snake_session::Session;
//! use tui_snake_session::types::{Direction, Position};
//!
//! let t0 = Instant::now();
//! let mut session = Session::new(1);
//! session.start(t0).unwrap();
//! session.request_direction(Direction::Right);
//!
//! session.advance(t0 + Duration::from_millis(150)).unwrap();
//! assert_eq!(session.state().snake().head(), Position::new(11, 10));
//! ```

pub mod scheduler;
pub mod session;

pub use tui_snake_core as core;
pub use tui_snake_input as input;
pub use tui_snake_types as types;

pub use scheduler::{IntervalScheduler, TickScheduler, TimerToken};
pub use session::{FinalScore, Session};
