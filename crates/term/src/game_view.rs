//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so layouts can be asserted in unit tests.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, Position, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Session data shown beside the board that is not part of the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudView<'a> {
    pub high_score: u32,
    pub player: Option<&'a str>,
    /// Latest leaderboard status line.
    pub report: Option<&'a str>,
}

const BOARD_BG: Rgb = Rgb::new(20, 28, 24);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const GRID_DOT: CellStyle = CellStyle::new(Rgb::new(60, 75, 65), BOARD_BG).dim();
const HEAD: CellStyle = CellStyle::new(Rgb::new(140, 255, 120), BOARD_BG).bold();
const BODY: CellStyle = CellStyle::new(Rgb::new(60, 190, 70), BOARD_BG);
const FOOD: CellStyle = CellStyle::new(Rgb::new(235, 70, 70), BOARD_BG).bold();
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
const HINT: CellStyle = CellStyle::new(Rgb::new(150, 150, 150), PANEL_BG).dim();
const BANNER: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();

/// Renders the 20x20 board with a side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps the board roughly square.
        Self { cell_w: 2 }
    }
}

/// Where the board frame landed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let width = GRID_SIZE as u16 * self.cell_w + 2;
        let height = GRID_SIZE as u16 + 2;
        BoardLayout {
            x: viewport.width.saturating_sub(width + PANEL_WIDTH) / 2,
            y: viewport.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// Terminal coordinates of the top-left column of a grid cell.
    pub fn cell_origin(&self, layout: BoardLayout, pos: Position) -> Option<(u16, u16)> {
        pos.in_bounds().then(|| {
            (
                layout.x + 1 + pos.x as u16 * self.cell_w,
                layout.y + 1 + pos.y as u16,
            )
        })
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(viewport);
        draw_frame(fb, layout);

        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                self.paint(fb, layout, Position::new(x, y), '·', GRID_DOT);
            }
        }

        self.paint(fb, layout, snap.food, '●', FOOD);
        for (i, &seg) in snap.snake.iter().enumerate() {
            let style = if i == 0 { HEAD } else { BODY };
            self.paint(fb, layout, seg, '█', style);
        }

        self.draw_panel(fb, snap, hud, layout);

        match snap.status {
            GameStatus::Ready => self.banner(fb, layout, &["SNAKE", "Enter to start"]),
            GameStatus::Paused => self.banner(fb, layout, &["PAUSED", "Space to resume"]),
            GameStatus::Over => self.banner(fb, layout, &["GAME OVER", "Enter to play again"]),
            GameStatus::Running => {}
        }
    }

    pub fn render(&self, snap: &GameSnapshot, hud: &HudView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn paint(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        pos: Position,
        ch: char,
        style: CellStyle,
    ) {
        if let Some((px, py)) = self.cell_origin(layout, pos) {
            fb.fill_rect(px, py, self.cell_w, 1, ch, style);
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        layout: BoardLayout,
    ) {
        let x = layout.x + layout.width + 2;
        let mut y = layout.y;

        let mut stat = |fb: &mut FrameBuffer, label: &str, value: u32| {
            fb.put_str(x, y, label, LABEL);
            fb.put_u32(x, y + 1, value, VALUE);
            y += 3;
        };
        stat(fb, "SCORE", snap.score);
        stat(fb, "HIGH", hud.high_score.max(snap.score));
        stat(fb, "LENGTH", snap.snake.len() as u32);
        stat(fb, "SPEED ms", snap.speed_ms);

        fb.put_str(x, y, "STATUS", LABEL);
        fb.put_str(x, y + 1, snap.status.as_str(), VALUE);
        y += 3;

        if let Some(player) = hud.player {
            fb.put_str(x, y, "PLAYER", LABEL);
            fb.put_str(x, y + 1, player, VALUE);
            y += 3;
        }

        for hint in ["arrows/wasd: turn", "space: pause", "r: reset  q: quit"] {
            fb.put_str(x, y, hint, HINT);
            y += 1;
        }

        if let Some(report) = hud.report {
            fb.put_str(layout.x, layout.y + layout.height, report, VALUE);
        }
    }

    fn banner(&self, fb: &mut FrameBuffer, layout: BoardLayout, lines: &[&str]) {
        let top = (layout.y + layout.height / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let w = line.chars().count() as u16;
            let x = layout.x + layout.width.saturating_sub(w) / 2;
            fb.put_str(x, top + i as u16, line, BANNER);
        }
    }
}

/// Columns reserved to the right of the board for the panel.
const PANEL_WIDTH: u16 = 22;

fn draw_frame(fb: &mut FrameBuffer, l: BoardLayout) {
    let (right, bottom) = (l.x + l.width - 1, l.y + l.height - 1);
    for x in l.x + 1..right {
        fb.put_char(x, l.y, '─', BORDER);
        fb.put_char(x, bottom, '─', BORDER);
    }
    for y in l.y + 1..bottom {
        fb.put_char(l.x, y, '│', BORDER);
        fb.put_char(right, y, '│', BORDER);
    }
    fb.put_char(l.x, l.y, '┌', BORDER);
    fb.put_char(right, l.y, '┐', BORDER);
    fb.put_char(l.x, bottom, '└', BORDER);
    fb.put_char(right, bottom, '┘', BORDER);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn viewport() -> Viewport {
        Viewport::new(80, 30)
    }

    fn snapshot(status: GameStatus) -> GameSnapshot {
        let mut state = GameState::new(1);
        if status != GameStatus::Ready {
            state.start().unwrap();
        }
        let mut snap = state.snapshot();
        snap.status = status;
        snap
    }

    #[test]
    fn test_head_and_food_are_drawn() {
        let view = GameView::default();
        let snap = snapshot(GameStatus::Running);
        let fb = view.render(&snap, &HudView::default(), viewport());
        let layout = view.layout(viewport());

        let (hx, hy) = view.cell_origin(layout, Position::new(10, 10)).unwrap();
        assert_eq!(fb.get(hx, hy).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(hx + 1, hy).map(|c| c.style), Some(HEAD));

        let (fx, fy) = view.cell_origin(layout, Position::new(15, 15)).unwrap();
        assert_eq!(fb.get(fx, fy).map(|c| c.ch), Some('●'));
    }

    #[test]
    fn test_frame_corners() {
        let view = GameView::default();
        let fb = view.render(&snapshot(GameStatus::Running), &HudView::default(), viewport());
        let l = view.layout(viewport());
        assert_eq!(l.width, 42);
        assert_eq!(fb.get(l.x, l.y).map(|c| c.ch), Some('┌'));
        assert_eq!(
            fb.get(l.x + l.width - 1, l.y + l.height - 1).map(|c| c.ch),
            Some('┘')
        );
    }

    #[test]
    fn test_panel_shows_score_and_high() {
        let view = GameView::default();
        let mut snap = snapshot(GameStatus::Running);
        snap.score = 30;
        let hud = HudView {
            high_score: 120,
            ..HudView::default()
        };
        let fb = view.render(&snap, &hud, viewport());
        let l = view.layout(viewport());

        assert!(fb.row_text(l.y).contains("SCORE"));
        assert!(fb.row_text(l.y + 1).contains("30"));
        assert!(fb.row_text(l.y + 4).contains("120"));
    }

    #[test]
    fn test_overlays_follow_status() {
        let view = GameView::default();
        let hud = HudView::default();
        let text = |status| {
            let fb = view.render(&snapshot(status), &hud, viewport());
            (0..fb.height()).map(|y| fb.row_text(y)).collect::<Vec<_>>().join("\n")
        };
        assert!(text(GameStatus::Over).contains("GAME OVER"));
        assert!(text(GameStatus::Paused).contains("PAUSED"));
        assert!(text(GameStatus::Ready).contains("Enter to start"));
        assert!(!text(GameStatus::Running).contains("GAME OVER"));
    }

    #[test]
    fn test_report_line_below_board() {
        let view = GameView::default();
        let hud = HudView {
            report: Some("Score 30 saved"),
            ..HudView::default()
        };
        let fb = view.render(&snapshot(GameStatus::Over), &hud, viewport());
        let l = view.layout(viewport());
        assert!(fb.row_text(l.y + l.height).contains("Score 30 saved"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&snapshot(GameStatus::Over), &HudView::default(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
