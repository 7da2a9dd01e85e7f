//! Key and mouse mapping from terminal events to game actions.

use crate::gesture::SwipeTracker;
use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Approximate pixel size of one terminal cell, used to turn cell
/// coordinates into swipe distances.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Turning
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::Turn(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::Turn(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::Turn(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::Turn(Direction::Right))
        }

        // Session
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::TogglePause),
        KeyCode::Enter => Some(GameAction::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Feed a mouse event into `tracker`; a left-button drag that is long enough
/// becomes a turn.
pub fn handle_mouse_event(tracker: &mut SwipeTracker, event: MouseEvent) -> Option<GameAction> {
    let x = f32::from(event.column) * CELL_WIDTH_PX;
    let y = f32::from(event.row) * CELL_HEIGHT_PX;
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            tracker.pointer_down(x, y);
            None
        }
        MouseEventKind::Up(MouseButton::Left) => tracker.pointer_up(x, y).map(GameAction::Turn),
        MouseEventKind::Down(_) => {
            tracker.cancel();
            None
        }
        _ => None,
    }
}
