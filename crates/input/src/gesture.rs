//! Swipe gesture classification.
//!
//! A pointer-down/pointer-up pair is classified by the axis with the larger
//! absolute displacement. Displacements at or below [`MIN_SWIPE_DISTANCE`]
//! along that axis are ignored.

use crate::types::{Direction, MIN_SWIPE_DISTANCE};

/// Classify a swipe from `start` to `end` (screen coordinates, `y` down).
///
/// Ties between the axes resolve to the vertical axis.
///
/// # Examples
///
/// ```
/// use tui_snake_input::classify_swipe;
/// use tui_snake_input::types::Direction;
///
/// assert_eq!(classify_swipe((100.0, 100.0), (160.0, 110.0)), Some(Direction::Right));
/// assert_eq!(classify_swipe((100.0, 100.0), (105.0, 60.0)), Some(Direction::Up));
/// assert_eq!(classify_swipe((100.0, 100.0), (110.0, 110.0)), None);
/// ```
pub fn classify_swipe(start: (f32, f32), end: (f32, f32)) -> Option<Direction> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;

    if dx.abs() > dy.abs() {
        if dx.abs() <= MIN_SWIPE_DISTANCE {
            return None;
        }
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        if dy.abs() <= MIN_SWIPE_DISTANCE {
            return None;
        }
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Tracks one pointer press until it is released.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish the gesture; `None` if there was no press or it was too short.
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<Direction> {
        let start = self.start.take()?;
        classify_swipe(start, (x, y))
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_four_directions() {
        let o = (200.0, 200.0);
        assert_eq!(classify_swipe(o, (260.0, 200.0)), Some(Direction::Right));
        assert_eq!(classify_swipe(o, (140.0, 200.0)), Some(Direction::Left));
        assert_eq!(classify_swipe(o, (200.0, 260.0)), Some(Direction::Down));
        assert_eq!(classify_swipe(o, (200.0, 140.0)), Some(Direction::Up));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let o = (0.0, 0.0);
        assert_eq!(classify_swipe(o, (30.0, 0.0)), None);
        assert_eq!(classify_swipe(o, (30.5, 0.0)), Some(Direction::Right));
        assert_eq!(classify_swipe(o, (0.0, -30.0)), None);
    }

    #[test]
    fn test_dominant_axis_wins() {
        // Long diagonal, mostly horizontal.
        assert_eq!(
            classify_swipe((0.0, 0.0), (-80.0, 50.0)),
            Some(Direction::Left)
        );
        // Equal displacement resolves vertically.
        assert_eq!(
            classify_swipe((0.0, 0.0), (40.0, 40.0)),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_tracker_requires_press() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.pointer_up(100.0, 0.0), None);

        tracker.pointer_down(0.0, 0.0);
        assert!(tracker.is_tracking());
        assert_eq!(tracker.pointer_up(100.0, 0.0), Some(Direction::Right));
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_tracker_cancel() {
        let mut tracker = SwipeTracker::new();
        tracker.pointer_down(0.0, 0.0);
        tracker.cancel();
        assert_eq!(tracker.pointer_up(0.0, 100.0), None);
    }
}
