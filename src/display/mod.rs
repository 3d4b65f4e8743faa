/// Rendering layer: all terminal I/O lives here.
///
/// The simulation draws onto a `TerminalCanvas`, an in-memory pixel grid
/// covering the 800×600 logical canvas.  Each terminal cell shows two
/// vertical pixels with a half-block glyph (foreground = top pixel,
/// background = bottom pixel).  `present` then writes the HUD, the grid and
/// any overlays to the terminal.

use std::io::Write;

use crossterm::{
    cursor,
    event::PopKeyboardEnhancementFlags,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::canvas::Canvas;
use crate::entities::{Rect, Rgba};
use crate::session::Session;
use crate::tuning::{BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH};

// ── Layout ────────────────────────────────────────────────────────────────────

/// Smallest playfield, in cells, that is still worth drawing.
pub const MIN_COLS: u16 = 32;
pub const MIN_ROWS: u16 = 12;

/// Rows used outside the playfield: HUD, two message rows, controls hint.
const CHROME_ROWS: u16 = 4;

const HALF_BLOCK: char = '▀';

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Red;
const C_HUD_HIGH: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_POPUP_BORDER: Color = Color::Blue;
const C_POPUP_TEXT: Color = Color::White;

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Rgba> for Pixel {
    fn from(c: Rgba) -> Self {
        Pixel { r: c.r, g: c.g, b: c.b }
    }
}

impl From<Pixel> for Color {
    fn from(p: Pixel) -> Self {
        Color::Rgb { r: p.r, g: p.g, b: p.b }
    }
}

fn blend(dst: Pixel, src: Rgba) -> Pixel {
    let a = src.a.clamp(0.0, 1.0);
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    Pixel {
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
    }
}

/// Pixel grid backing the playfield, plus where it sits on screen.
#[derive(Clone, Debug)]
pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    left: u16,
    top: u16,
    logical_width: f32,
    logical_height: f32,
    pixels: Vec<Pixel>,
}

impl TerminalCanvas {
    /// A `cols × rows` cell playfield at the screen origin, or `None` if it
    /// is below the minimum size.
    pub fn new(cols: u16, rows: u16) -> Option<Self> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return None;
        }
        Some(TerminalCanvas {
            cols,
            rows,
            left: 0,
            top: 1,
            logical_width: CANVAS_WIDTH,
            logical_height: CANVAS_HEIGHT,
            pixels: vec![Pixel::from(BACKGROUND); cols as usize * rows as usize * 2],
        })
    }

    /// The largest 4:3 playfield that fits a terminal of the given size,
    /// centred horizontally.  `None` when the terminal is too small.
    pub fn fit(term_cols: u16, term_rows: u16) -> Option<Self> {
        let avail_rows = term_rows.checked_sub(CHROME_ROWS)?;
        // Two pixels per row; width/height = 4/3.
        let cols_for_rows = (avail_rows as u32 * 2 * 4 / 3) as u16;
        let cols = term_cols.min(cols_for_rows);
        let rows = ((cols as u32 * 3 / 4) / 2) as u16;
        let mut canvas = Self::new(cols, rows.min(avail_rows))?;
        canvas.left = (term_cols - cols) / 2;
        Some(canvas)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn width_px(&self) -> usize {
        self.cols as usize
    }

    pub fn height_px(&self) -> usize {
        self.rows as usize * 2
    }

    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.width_px() + x]
    }

    /// Map a logical span onto pixel indices `[start, end)`.  A span that is
    /// on-canvas always covers at least one pixel.
    fn span(start: f32, len: f32, logical: f32, px: usize) -> Option<(usize, usize)> {
        let end = start + len;
        if end <= 0.0 || start >= logical || len <= 0.0 {
            return None;
        }
        let scale = px as f32 / logical;
        let first = ((start.max(0.0) * scale).floor() as usize).min(px - 1);
        let last = ((end.min(logical) * scale).ceil() as usize).clamp(first + 1, px);
        Some((first, last))
    }
}

impl Canvas for TerminalCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        let (w, h) = (self.width_px(), self.height_px());
        let Some((x0, x1)) = Self::span(rect.x, rect.width, self.logical_width, w) else {
            return;
        };
        let Some((y0, y1)) = Self::span(rect.y, rect.height, self.logical_height, h) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let idx = y * w + x;
                self.pixels[idx] = blend(self.pixels[idx], color);
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn present<W: Write>(
    out: &mut W,
    canvas: &TerminalCanvas,
    session: &Session,
) -> std::io::Result<()> {
    draw_hud(out, canvas, session)?;
    draw_playfield(out, canvas)?;
    draw_message(out, canvas, session)?;
    draw_controls_hint(out, canvas)?;

    if session.popup.is_open() {
        draw_popup(out, canvas, session)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, canvas.top + canvas.rows + CHROME_ROWS - 1))?;
    out.flush()?;
    Ok(())
}

/// Hand the screen back: pop keyboard flags if they were pushed, show the
/// cursor and leave the alternate screen.  Raw mode is the caller's.
pub fn restore_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) -> std::io::Result<()> {
    if keyboard_enhanced {
        out.queue(PopKeyboardEnhancementFlags)?;
    }
    out.queue(style::ResetColor)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()
}

fn clear_row<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, row))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    Ok(())
}

fn centered_col(canvas: &TerminalCanvas, text: &str) -> u16 {
    canvas.left + (canvas.cols.saturating_sub(text.chars().count() as u16)) / 2
}

// ── HUD (row above the playfield) ─────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    canvas: &TerminalCanvas,
    session: &Session,
) -> std::io::Result<()> {
    let row = canvas.top.saturating_sub(1);
    clear_row(out, row)?;

    out.queue(cursor::MoveTo(canvas.left, row))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", session.scoreboard.score)))?;

    let high = format!("High Score: {}", session.scoreboard.high_score);
    let col = (canvas.left + canvas.cols).saturating_sub(high.chars().count() as u16);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(high))?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(out: &mut W, canvas: &TerminalCanvas) -> std::io::Result<()> {
    for row in 0..canvas.rows {
        out.queue(cursor::MoveTo(canvas.left, canvas.top + row))?;
        let mut current: Option<(Pixel, Pixel)> = None;
        for col in 0..canvas.cols as usize {
            let top = canvas.pixel(col, row as usize * 2);
            let bottom = canvas.pixel(col, row as usize * 2 + 1);
            if current != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(top.into()))?;
                out.queue(style::SetBackgroundColor(bottom.into()))?;
                current = Some((top, bottom));
            }
            out.queue(Print(HALF_BLOCK))?;
        }
        out.queue(style::ResetColor)?;
    }
    Ok(())
}

// ── Game-over message (below the playfield) ───────────────────────────────────

fn draw_message<W: Write>(
    out: &mut W,
    canvas: &TerminalCanvas,
    session: &Session,
) -> std::io::Result<()> {
    let first = canvas.top + canvas.rows;
    clear_row(out, first)?;
    clear_row(out, first + 1)?;
    if !session.scoreboard.game_over {
        return Ok(());
    }

    let title = if session.scoreboard.is_new_best() {
        "Game Over!  New high score!"
    } else {
        "Game Over!"
    };
    let hint = "Press ENTER to play again";

    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    out.queue(style::SetAttribute(style::Attribute::Bold))?;
    out.queue(cursor::MoveTo(centered_col(canvas, title), first))?;
    out.queue(Print(title))?;
    out.queue(style::SetAttribute(style::Attribute::Reset))?;
    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    out.queue(cursor::MoveTo(centered_col(canvas, hint), first + 1))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, canvas: &TerminalCanvas) -> std::io::Result<()> {
    let row = canvas.top + canvas.rows + 2;
    let hint = "Use ← → to move • SPACE to shoot • C contact • Q quit";
    clear_row(out, row)?;
    out.queue(cursor::MoveTo(centered_col(canvas, hint), row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Contact popup ─────────────────────────────────────────────────────────────

fn draw_popup<W: Write>(
    out: &mut W,
    canvas: &TerminalCanvas,
    session: &Session,
) -> std::io::Result<()> {
    let lines = session.popup.lines();
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .min(canvas.cols.saturating_sub(4) as usize);

    let box_width = inner as u16 + 4;
    let left = canvas.left + canvas.cols.saturating_sub(box_width) / 2;
    let start = canvas.top + canvas.rows.saturating_sub(lines.len() as u16 + 2) / 2;

    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(style::SetForegroundColor(C_POPUP_BORDER))?;
    out.queue(cursor::MoveTo(left, start))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner + 2))))?;

    for (i, line) in lines.iter().enumerate() {
        let text: String = line.chars().take(inner).collect();
        out.queue(cursor::MoveTo(left, start + 1 + i as u16))?;
        out.queue(style::SetForegroundColor(C_POPUP_BORDER))?;
        out.queue(Print("│ "))?;
        out.queue(style::SetForegroundColor(C_POPUP_TEXT))?;
        out.queue(Print(format!("{:<width$}", text, width = inner)))?;
        out.queue(style::SetForegroundColor(C_POPUP_BORDER))?;
        out.queue(Print(" │"))?;
    }

    out.queue(cursor::MoveTo(left, start + 1 + lines.len() as u16))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner + 2))))?;
    out.queue(style::ResetColor)?;
    Ok(())
}
