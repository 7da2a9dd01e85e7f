//! Terminal "game renderer" module.
//!
//! A small game-oriented rendering layer: the view paints a snapshot into a
//! framebuffer of styled cells, and the renderer flushes only the cells that
//! changed since the previous frame. No widget toolkit is involved, which keeps
//! the board aspect ratio under direct control (two columns per grid cell).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardLayout, GameView, HudView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
