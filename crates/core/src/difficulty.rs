//! Difficulty module - score and tick-interval progression
//!
//! Each food eaten awards a fixed number of points and shortens the tick
//! interval by a fixed step, down to a floor.

use crate::types::{FOOD_SCORE, INITIAL_SPEED_MS, MIN_SPEED_MS, SPEED_STEP_MS};

/// Tick interval after eating one food at `speed_ms`.
pub fn next_speed_ms(speed_ms: u32) -> u32 {
    speed_ms.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS)
}

/// Tick interval of a session that has eaten `foods` times.
pub fn speed_after(foods: u32) -> u32 {
    INITIAL_SPEED_MS
        .saturating_sub(foods.saturating_mul(SPEED_STEP_MS))
        .max(MIN_SPEED_MS)
}

/// Score of a session that has eaten `foods` times.
pub fn score_after(foods: u32) -> u32 {
    foods.saturating_mul(FOOD_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_speed_steps_down() {
        assert_eq!(next_speed_ms(150), 148);
        assert_eq!(next_speed_ms(52), 50);
    }

    #[test]
    fn test_next_speed_floor() {
        assert_eq!(next_speed_ms(50), 50);
        assert_eq!(next_speed_ms(51), 50);
        assert_eq!(next_speed_ms(0), 50);
    }

    #[test]
    fn test_speed_after_matches_iteration() {
        let mut speed = INITIAL_SPEED_MS;
        for foods in 0..80 {
            assert_eq!(speed_after(foods), speed, "foods = {}", foods);
            speed = next_speed_ms(speed);
        }
    }

    #[test]
    fn test_speed_after_sixty_foods_is_floored() {
        assert_eq!(speed_after(50), 50);
        assert_eq!(speed_after(60), 50);
        assert_eq!(speed_after(u32::MAX), 50);
    }

    #[test]
    fn test_score_after() {
        assert_eq!(score_after(0), 0);
        assert_eq!(score_after(3), 30);
    }
}
