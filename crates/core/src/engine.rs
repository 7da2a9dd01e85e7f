//! Engine module - the pure simulation step
//!
//! [`tick`] advances a running [`GameState`] by exactly one cell and returns the
//! next state; the input state is never touched. Food placement and the
//! collision predicates used by the step are exposed for callers and tests.

use crate::difficulty::next_speed_ms;
use crate::types::*;
use crate::{EngineError, GameState, SimpleRng, Snake};

/// Heading used for the next move.
///
/// A request is applied unless it is the exact reversal of `current`; the
/// comparison is always against the heading from before this tick.
pub fn resolve_direction(current: Direction, requested: Option<Direction>) -> Direction {
    match requested {
        Some(dir) if !current.is_opposite(dir) => dir,
        _ => current,
    }
}

/// Whether `head` lies outside the grid.
pub fn hits_wall(head: Position) -> bool {
    !head.in_bounds()
}

/// Whether `head` lands on any current segment.
///
/// The tail counts: it has not been popped yet when the head moves.
pub fn hits_body(snake: &Snake, head: Position) -> bool {
    snake.contains(head)
}

/// Classify a prospective head position.
pub fn collision(snake: &Snake, head: Position) -> Option<CollisionKind> {
    if hits_wall(head) {
        Some(CollisionKind::Wall)
    } else if hits_body(snake, head) {
        Some(CollisionKind::Body)
    } else {
        None
    }
}

/// Pick a food cell off the snake by rejection sampling.
///
/// Returns `None` when the snake covers every cell.
pub fn try_place_food(snake: &Snake, rng: &mut SimpleRng) -> Option<Position> {
    if snake.len() >= GRID_CELLS {
        return None;
    }
    loop {
        let candidate = rng.next_position();
        if !snake.contains(candidate) {
            return Some(candidate);
        }
    }
}

/// Pick a food cell off the snake by rejection sampling.
///
/// The snake must leave at least one cell free. On a full grid this falls back
/// to the head cell rather than sampling forever; [`tick`] never calls it in
/// that situation.
pub fn place_food(snake: &Snake, rng: &mut SimpleRng) -> Position {
    try_place_food(snake, rng).unwrap_or_else(|| snake.head())
}

/// Advance the session by one tick.
///
/// Returns [`EngineError::NotRunning`] unless `state` is running. On a fatal
/// collision the returned state is `Over` with the snake left exactly as it
/// was; otherwise the head moves one cell and the snake either grows (food
/// eaten) or keeps its length.
pub fn tick(state: &GameState, requested: Option<Direction>) -> Result<GameState, EngineError> {
    if state.status != GameStatus::Running {
        return Err(EngineError::NotRunning {
            status: state.status,
        });
    }

    let mut next = state.clone();
    next.direction = resolve_direction(state.direction, requested);
    next.steps = state.steps.wrapping_add(1);

    let head = state.snake.head().step(next.direction);

    if let Some(kind) = collision(&state.snake, head) {
        next.status = GameStatus::Over;
        next.last_event = Some(TickEvent::Collided(kind));
        return Ok(next);
    }

    next.snake.push_head(head);

    if head != state.food {
        next.snake.pop_tail();
        next.last_event = Some(TickEvent::Moved);
        return Ok(next);
    }

    // Ate: grow (tail stays), score, speed up, new food.
    next.score = state.score.saturating_add(FOOD_SCORE);
    next.speed_ms = next_speed_ms(state.speed_ms);
    next.foods_eaten = state.foods_eaten.wrapping_add(1);

    match try_place_food(&next.snake, &mut next.rng) {
        Some(food) => {
            next.food = food;
            next.last_event = Some(TickEvent::Ate {
                score: next.score,
                speed_ms: next.speed_ms,
            });
        }
        None => {
            next.status = GameStatus::Over;
            next.last_event = Some(TickEvent::BoardFilled);
        }
    }

    Ok(next)
}
