//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, terminal rendering, leaderboard reporting).
//!
//! # Grid
//!
//! The playfield is a fixed square grid:
//!
//! - **Size**: 20x20 cells, indexed `0..GRID_SIZE` on both axes
//! - **Origin**: `(0, 0)` is the top-left cell; `y` grows downwards
//!
//! # Timing and Difficulty
//!
//! The snake advances one cell per tick. The tick interval ("speed") starts slow
//! and tightens every time food is eaten:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 150 | Tick interval of a fresh session |
//! | `SPEED_STEP_MS` | 2 | Interval reduction per food eaten |
//! | `MIN_SPEED_MS` | 50 | Floor of the tick interval |
//! | `FOOD_SCORE` | 10 | Points awarded per food eaten |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, Position, GRID_SIZE};
//!
//! let head = Position::new(10, 10);
//! assert_eq!(head.step(Direction::Up), Position::new(10, 9));
//!
//! assert!(Direction::Up.is_opposite(Direction::Down));
//! assert!(!Direction::Up.is_opposite(Direction::Left));
//!
//! assert!(Position::new(0, GRID_SIZE - 1).in_bounds());
//! assert!(!Position::new(-1, 0).in_bounds());
//! ```

/// Grid width and height in cells (20x20).
pub const GRID_SIZE: i8 = 20;

/// Total number of cells on the grid.
pub const GRID_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Tick interval of a fresh session in milliseconds.
pub const INITIAL_SPEED_MS: u32 = 150;

/// Tick interval reduction per food eaten.
pub const SPEED_STEP_MS: u32 = 2;

/// Tick interval floor.
pub const MIN_SPEED_MS: u32 = 50;

/// Points awarded per food eaten.
pub const FOOD_SCORE: u32 = 10;

/// Minimum swipe displacement (in pointer units) that registers as a turn.
pub const MIN_SWIPE_DISTANCE: f32 = 30.0;

/// Spawn cell of the snake head.
pub const INITIAL_HEAD: Position = Position::new(10, 10);

/// Heading of a fresh session.
pub const INITIAL_DIRECTION: Direction = Direction::Up;

/// Food cell of a fresh session.
pub const INITIAL_FOOD: Position = Position::new(15, 15);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_defaults() {
        assert_eq!(GRID_SIZE, 20);
        assert_eq!(GRID_CELLS, 400);
        assert_eq!(INITIAL_SPEED_MS, 150);
        assert_eq!(SPEED_STEP_MS, 2);
        assert_eq!(MIN_SPEED_MS, 50);
        assert_eq!(FOOD_SCORE, 10);
    }

    #[test]
    fn initial_layout_is_inside_grid() {
        assert!(INITIAL_HEAD.in_bounds());
        assert!(INITIAL_FOOD.in_bounds());
        assert_ne!(INITIAL_HEAD, INITIAL_FOOD);
    }

    #[test]
    fn step_follows_direction_delta() {
        let p = Position::new(5, 5);
        assert_eq!(p.step(Direction::Up), Position::new(5, 4));
        assert_eq!(p.step(Direction::Down), Position::new(5, 6));
        assert_eq!(p.step(Direction::Left), Position::new(4, 5));
        assert_eq!(p.step(Direction::Right), Position::new(6, 5));
    }

    #[test]
    fn bounds_cover_both_axes() {
        assert!(Position::new(0, 0).in_bounds());
        assert!(Position::new(19, 19).in_bounds());
        assert!(!Position::new(20, 0).in_bounds());
        assert!(!Position::new(0, 20).in_bounds());
        assert!(!Position::new(0, -1).in_bounds());
    }

    #[test]
    fn opposite_pairs() {
        for dir in Direction::ALL {
            assert!(dir.is_opposite(dir.opposite()));
            assert!(!dir.is_opposite(dir));
        }
        assert!(!Direction::Left.is_opposite(Direction::Up));
    }

    #[test]
    fn direction_from_str() {
        assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
        assert_eq!(Direction::from_str("l"), Some(Direction::Left));
        assert_eq!(Direction::from_str("sideways"), None);
        assert_eq!(Direction::Right.as_str(), "right");
    }
}

/// A cell on the grid.
///
/// Coordinates are signed so that a head stepping off the grid (`-1` or
/// `GRID_SIZE`) is representable before the collision check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction` (may lie outside the grid).
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether both coordinates lie in `[0, GRID_SIZE)`.
    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

/// Heading of the snake as a unit vector on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `(0, -1)`
    Up,
    /// `(0, 1)`
    Down,
    /// `(-1, 0)`
    Left,
    /// `(1, 0)`
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)`.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True only for the exact 180° reversal.
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Parse a direction from its name or initial (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("down"), Some(Direction::Down));
    /// assert_eq!(Direction::from_str("R"), Some(Direction::Right));
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Lifecycle status of a game session.
///
/// ```text
/// Ready -> Running <-> Paused
/// Running -> Over -> Ready (reset)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// Fresh session, waiting for start.
    #[default]
    Ready,
    /// Ticks execute at the current speed.
    Running,
    /// No ticking; direction requests are discarded.
    Paused,
    /// Terminal for the session; final score can be read.
    Over,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Ready => "ready",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::Over => "over",
        }
    }
}

/// What ended the session on a fatal tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the grid.
    Wall,
    /// Head hit a snake segment.
    Body,
}

/// Outcome of the most recent tick, kept on the state for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Snake advanced one cell without eating.
    Moved,
    /// Snake ate the food and grew by one.
    Ate { score: u32, speed_ms: u32 },
    /// Fatal collision; the snake was left unchanged.
    Collided(CollisionKind),
    /// Snake grew to cover every cell; no food can be placed.
    BoardFilled,
}

/// Player intents produced by keyboard, buttons or gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Request a new heading for the next tick.
    Turn(Direction),
    /// Start a fresh session, or restart after game over.
    Start,
    /// Pause a running session or resume a paused one.
    TogglePause,
    /// Discard the session and return to `Ready`.
    Reset,
}
