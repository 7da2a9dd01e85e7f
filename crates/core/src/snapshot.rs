use arrayvec::ArrayVec;

use crate::types::{
    Direction, GameStatus, Position, TickEvent, GRID_CELLS, INITIAL_DIRECTION, INITIAL_FOOD,
    INITIAL_SPEED_MS,
};

/// Stack-only copy of a [`crate::GameState`] for renderers and observers.
///
/// Reuse one snapshot across frames with `GameState::snapshot_into`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Segments, head first.
    pub snake: ArrayVec<Position, GRID_CELLS>,
    pub direction: Direction,
    pub food: Position,
    pub score: u32,
    pub speed_ms: u32,
    pub status: GameStatus,
    pub episode_id: u32,
    pub steps: u32,
    pub last_event: Option<TickEvent>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.snake.clear();
        self.direction = INITIAL_DIRECTION;
        self.food = INITIAL_FOOD;
        self.score = 0;
        self.speed_ms = INITIAL_SPEED_MS;
        self.status = GameStatus::Ready;
        self.episode_id = 0;
        self.steps = 0;
        self.last_event = None;
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            snake: ArrayVec::new(),
            direction: INITIAL_DIRECTION,
            food: INITIAL_FOOD,
            score: 0,
            speed_ms: INITIAL_SPEED_MS,
            status: GameStatus::Ready,
            episode_id: 0,
            steps: 0,
            last_event: None,
        }
    }
}
