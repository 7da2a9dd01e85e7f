//! Terminal output: raw mode, alternate screen and frame flushing.
//!
//! Frames are diffed against the previous one and only changed runs of cells
//! are written. A size change or [`TerminalRenderer::invalidate`] forces a
//! full redraw.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, event, terminal, QueueableCommand};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    previous: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            previous: None,
            out: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.queue(event::EnableMouseCapture)?;
        self.flush()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(event::DisableMouseCapture)?;
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Write `frame` to the terminal and keep a copy for the next diff.
    pub fn draw(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.out.clear();
        encode_frame_into(self.previous.as_ref(), frame, &mut self.out)?;
        self.flush()?;

        match self.previous.as_mut() {
            Some(prev) => prev.clone_from(frame),
            None => self.previous = Some(frame.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands turning `previous` into `next`.
///
/// With no previous frame (or a different size) the whole screen is cleared
/// and redrawn.
pub fn encode_frame_into(
    previous: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let same_size = previous
        .is_some_and(|p| p.width() == next.width() && p.height() == next.height());
    if !same_size {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut style: Option<CellStyle> = None;
    for_each_changed_run(previous.filter(|_| same_size), next, |x, y, len| {
        out.queue(cursor::MoveTo(x, y))?;
        for cx in x..x + len {
            let cell = next.get(cx, y).unwrap_or_default();
            if style != Some(cell.style) {
                queue_style(out, cell.style)?;
                style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Call `f(x, y, len)` for each maximal horizontal run of cells that differ.
///
/// Without a previous frame every row is one run.
fn for_each_changed_run<F>(previous: Option<&FrameBuffer>, next: &FrameBuffer, mut f: F) -> Result<()>
where
    F: FnMut(u16, u16, u16) -> Result<()>,
{
    let Some(prev) = previous else {
        if next.width() > 0 {
            for y in 0..next.height() {
                f(0, y, next.width())?;
            }
        }
        return Ok(());
    };

    for y in 0..next.height() {
        let mut start: Option<u16> = None;
        for x in 0..next.width() {
            let dirty = prev.get(x, y) != next.get(x, y);
            match (dirty, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    f(s, y, x - s)?;
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            f(s, y, next.width() - s)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_runs(previous: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        let mut runs = Vec::new();
        for_each_changed_run(previous, next, |x, y, len| {
            runs.push((x, y, len));
            Ok(())
        })
        .unwrap();
        runs
    }

    #[test]
    fn test_changed_runs_coalesce() {
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.put_char(x, 0, '#', CellStyle::default());
        }
        b.put_char(5, 1, '#', CellStyle::default());

        assert_eq!(collect_runs(Some(&a), &b), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn test_full_redraw_without_previous() {
        let fb = FrameBuffer::new(3, 2);
        assert_eq!(collect_runs(None, &fb), vec![(0, 0, 3), (0, 1, 3)]);
    }

    #[test]
    fn test_run_callback_error_stops_walk() {
        let a = FrameBuffer::new(4, 3);
        let mut b = FrameBuffer::new(4, 3);
        for y in 0..3 {
            b.put_char(0, y, '#', CellStyle::default());
        }
        let mut seen = 0;
        let result = for_each_changed_run(Some(&a), &b, |_, y, _| {
            seen += 1;
            if y == 1 {
                anyhow::bail!("stop");
            }
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_run_reaching_row_end() {
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);
        b.put_str(2, 0, "abc", CellStyle::default());
        assert_eq!(collect_runs(Some(&a), &b), vec![(2, 0, 3)]);
    }

    #[test]
    fn test_identical_frames_encode_no_cells() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "snek", CellStyle::default());
        let mut out = Vec::new();
        encode_frame_into(Some(&fb), &fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains("snek"));
    }

    #[test]
    fn test_full_encode_contains_text() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "snek", CellStyle::default());
        let mut out = Vec::new();
        encode_frame_into(None, &fb, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("snek"));
    }
}
