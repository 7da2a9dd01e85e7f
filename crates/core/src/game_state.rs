//! Game state module - the authoritative snapshot of one session
//!
//! Holds the snake, heading, food, score, speed and lifecycle status. A state
//! only changes through [`crate::engine::tick`] and the lifecycle commands
//! (`start`, `pause`, `resume`, `reset`) issued by the surrounding application.

use crate::types::*;
use crate::{EngineError, SimpleRng, Snake};

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) snake: Snake,
    pub(crate) direction: Direction,
    pub(crate) food: Position,
    pub(crate) score: u32,
    pub(crate) speed_ms: u32,
    pub(crate) status: GameStatus,
    /// Food placement randomness; part of the state so `tick` stays pure.
    pub(crate) rng: SimpleRng,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Ticks executed in the current session.
    pub(crate) steps: u32,
    pub(crate) foods_eaten: u32,
    /// Outcome of the most recent tick (consumed by observers).
    pub(crate) last_event: Option<TickEvent>,
}

impl GameState {
    /// Create a fresh `Ready` session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::fresh(SimpleRng::new(seed), 0)
    }

    fn fresh(rng: SimpleRng, episode_id: u32) -> Self {
        Self {
            snake: Snake::new(INITIAL_HEAD),
            direction: INITIAL_DIRECTION,
            food: INITIAL_FOOD,
            score: 0,
            speed_ms: INITIAL_SPEED_MS,
            status: GameStatus::Ready,
            rng,
            episode_id,
            steps: 0,
            foods_eaten: 0,
            last_event: None,
        }
    }

    /// Create a `Ready` session with an explicit layout.
    ///
    /// Callers are responsible for keeping `food` off the snake.
    pub fn from_layout(snake: Snake, direction: Direction, food: Position, seed: u32) -> Self {
        Self {
            snake,
            direction,
            food,
            ..Self::new(seed)
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current tick interval in milliseconds.
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    pub fn last_event(&self) -> Option<TickEvent> {
        self.last_event
    }

    /// Take and clear the last tick event.
    pub fn take_last_event(&mut self) -> Option<TickEvent> {
        self.last_event.take()
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// Ready -> Running
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.transition("start", GameStatus::Ready, GameStatus::Running)
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> Result<(), EngineError> {
        self.transition("pause", GameStatus::Running, GameStatus::Paused)
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> Result<(), EngineError> {
        self.transition("resume", GameStatus::Paused, GameStatus::Running)
    }

    fn transition(
        &mut self,
        action: &'static str,
        from: GameStatus,
        to: GameStatus,
    ) -> Result<(), EngineError> {
        if self.status != from {
            return Err(EngineError::InvalidTransition {
                action,
                from: self.status,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Discard the session and reinitialise every field to its `Ready` default.
    ///
    /// The food RNG keeps its position so the next session sees a fresh
    /// sequence, and the episode id advances.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::fresh(rng, next_episode);
    }

    pub fn snapshot_into(&self, out: &mut crate::snapshot::GameSnapshot) {
        out.snake.clear();
        out.snake.extend(self.snake.segments());
        out.direction = self.direction;
        out.food = self.food;
        out.score = self.score;
        out.speed_ms = self.speed_ms;
        out.status = self.status;
        out.episode_id = self.episode_id;
        out.steps = self.steps;
        out.last_event = self.last_event;
    }

    pub fn snapshot(&self) -> crate::snapshot::GameSnapshot {
        let mut s = crate::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.status, GameStatus::Ready);
        assert_eq!(state.snake.segments().collect::<Vec<_>>(), vec![INITIAL_HEAD]);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.food, Position::new(15, 15));
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, 150);
        assert_eq!(state.episode_id, 0);
        assert!(state.last_event.is_none());
    }

    #[test]
    fn test_start_pause_resume() {
        let mut state = GameState::new(1);
        assert!(state.start().is_ok());
        assert!(state.is_running());

        assert!(state.pause().is_ok());
        assert_eq!(state.status, GameStatus::Paused);

        assert!(state.resume().is_ok());
        assert!(state.is_running());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut state = GameState::new(1);
        assert_eq!(
            state.pause(),
            Err(EngineError::InvalidTransition {
                action: "pause",
                from: GameStatus::Ready,
            })
        );
        assert!(state.resume().is_err());

        state.start().unwrap();
        assert!(state.start().is_err());
        assert!(state.resume().is_err());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = GameState::new(1);
        state.start().unwrap();
        state.score = 70;
        state.speed_ms = 136;
        state.status = GameStatus::Over;
        state.snake = Snake::from_segments([Position::new(1, 1), Position::new(1, 2)]).unwrap();

        state.reset();

        assert_eq!(state.status, GameStatus::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_ms, INITIAL_SPEED_MS);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.food, INITIAL_FOOD);
        assert_eq!(state.direction, INITIAL_DIRECTION);
        assert_eq!(state.episode_id, 1);
    }

    #[test]
    fn test_reset_keeps_rng_position() {
        let mut state = GameState::new(5);
        state.rng.next_u32();
        let rng_before = state.rng.clone();
        state.reset();
        assert_eq!(state.rng, rng_before);
    }

    #[test]
    fn test_from_layout_is_ready() {
        let snake = Snake::new(Position::new(0, 10));
        let state = GameState::from_layout(snake, Direction::Left, Position::new(5, 5), 3);
        assert_eq!(state.status, GameStatus::Ready);
        assert_eq!(state.direction, Direction::Left);
        assert_eq!(state.snake.head(), Position::new(0, 10));
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let mut state = GameState::new(1);
        state.start().unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.snake.as_slice(), &[INITIAL_HEAD]);
        assert_eq!(snap.food, INITIAL_FOOD);
        assert_eq!(snap.status, GameStatus::Running);
        assert_eq!(snap.speed_ms, INITIAL_SPEED_MS);
    }
}
