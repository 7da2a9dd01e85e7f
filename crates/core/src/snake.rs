//! Snake body - ordered segments with the head at the front.

use std::collections::VecDeque;

use crate::types::Position;

/// Ordered snake segments, head first.
///
/// A snake always holds at least one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Single-segment snake at `head`.
    pub fn new(head: Position) -> Self {
        let mut body = VecDeque::with_capacity(16);
        body.push_back(head);
        Self { body }
    }

    /// Build a snake from explicit segments (head first).
    ///
    /// Returns `None` for an empty segment list.
    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    pub fn head(&self) -> Position {
        // Non-empty by construction; `pop_tail` never removes the last segment.
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether any segment (head and tail included) occupies `pos`.
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
    }

    pub(crate) fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    /// True when no two segments share a cell.
    pub fn is_self_disjoint(&self) -> bool {
        let mut seen = [false; crate::types::GRID_CELLS];
        for p in self.segments() {
            if !p.in_bounds() {
                return false;
            }
            let idx = (p.y as usize) * (crate::types::GRID_SIZE as usize) + (p.x as usize);
            if seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(crate::types::INITIAL_HEAD)
    }
}
