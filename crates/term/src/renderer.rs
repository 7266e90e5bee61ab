//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed row by row against the previous one; only rows that
//! changed are re-encoded.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor, queue,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb, Weight};

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode plus the alternate screen, cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        queue!(
            self.buf,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter).
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        queue!(
            self.buf,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the previous frame so the next one is drawn in full.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Present a frame. Unchanged rows are skipped.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        let prev = self
            .prev
            .as_ref()
            .filter(|p| p.width() == fb.width() && p.height() == fb.height());
        if prev.is_none() {
            queue!(self.buf, terminal::Clear(terminal::ClearType::All))?;
        }
        encode_rows_into(prev, fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.flush()?;
        }

        match self.prev.as_mut() {
            Some(p) => p.clone_from(fb),
            None => self.prev = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Rows of `next` that differ from `prev`; every row when there is no `prev`.
pub fn changed_rows(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<u16> {
    (0..next.height())
        .filter(|&y| prev.map_or(true, |p| p.row(y) != next.row(y)))
        .collect()
}

/// Encode the changed rows of `next` into `out` as terminal commands.
pub fn encode_rows_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let rows = changed_rows(prev, next);
    if rows.is_empty() {
        return Ok(());
    }

    let mut style: Option<CellStyle> = None;
    for y in rows {
        queue!(out, cursor::MoveTo(0, y))?;
        for cell in next.row(y) {
            if style != Some(cell.style) {
                queue!(
                    out,
                    SetAttribute(Attribute::Reset),
                    SetColors(Colors::new(color(cell.style.fg), color(cell.style.bg))),
                    SetAttribute(weight_attribute(cell.style.weight))
                )?;
                style = Some(cell.style);
            }
            queue!(out, Print(cell.ch))?;
        }
    }

    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn weight_attribute(weight: Weight) -> Attribute {
    match weight {
        Weight::Normal => Attribute::NormalIntensity,
        Weight::Bold => Attribute::Bold,
        Weight::Faint => Attribute::Dim,
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_all_rows() {
        let fb = FrameBuffer::new(4, 3);
        assert_eq!(changed_rows(None, &fb), vec![0, 1, 2]);
    }

    #[test]
    fn test_only_changed_rows_are_encoded() {
        let prev = FrameBuffer::new(4, 3);
        let mut next = prev.clone();
        next.put_str(1, 1, "ok", CellStyle::default());
        assert_eq!(changed_rows(Some(&prev), &next), vec![1]);

        let mut out = Vec::new();
        encode_rows_into(Some(&prev), &next, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("ok"));
    }

    #[test]
    fn test_identical_frames_encode_nothing() {
        let fb = FrameBuffer::new(4, 3);
        let mut out = Vec::new();
        encode_rows_into(Some(&fb), &fb, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_style_conversion() {
        assert_eq!(color(Rgb::new(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
        assert_eq!(weight_attribute(Weight::Faint), Attribute::Dim);
    }
}
