//! Input module (engine-facing).
//!
//! Translates discrete directional events (arrow keys, on-screen buttons,
//! swipe gestures) into a single buffered direction request consumed by the
//! next tick. The controller itself is framework independent; `map` adapts
//! `crossterm` key and mouse events into [`crate::types::GameAction`] values.

pub mod controller;
pub mod gesture;
pub mod map;

pub use tui_snake_types as types;

pub use controller::InputController;
pub use gesture::{classify_swipe, SwipeTracker};
pub use map::{handle_key_event, handle_mouse_event, should_quit};
