/// Rendering layer — all terminal I/O lives here.
///
/// The session draws in play-field units; this module scales those onto
/// whatever terminal size is available and paints sprites cell by cell from
/// their opacity masks.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dino_runner::entities::{Rect, SpriteKind};
use dino_runner::session::Renderer;
use dino_runner::sprites::Mask;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_GROUND: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_CROUCH: Color = Color::Grey;
const C_OBSTACLE: Color = Color::Green;
const C_PURSUER: Color = Color::Red;
const C_HUD: Color = Color::Yellow;
const C_BANNER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const SPRITE_CELL: &str = "█";
const HINT: &str = "↑ : Jump   ↓ : Crouch   Q : Quit";

fn sprite_color(kind: SpriteKind) -> Color {
    match kind {
        SpriteKind::PlayerStanding => C_PLAYER,
        SpriteKind::PlayerCrouching => C_PLAYER_CROUCH,
        SpriteKind::Obstacle => C_OBSTACLE,
        SpriteKind::Pursuer => C_PURSUER,
    }
}

/// Terminal-backed [`Renderer`].
///
/// Layout: border on row 0 and row `height - 2`, controls hint on the last
/// row, play field in between.
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: u16,
    height: u16,
    field_width: i32,
    field_height: i32,
    ground_y: i32,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, field_width: i32, field_height: i32, ground_y: i32) -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TerminalRenderer {
            out,
            width,
            height,
            field_width,
            field_height,
            ground_y,
        })
    }

    fn inner_cols(&self) -> i32 {
        (self.width as i32 - 2).max(1)
    }

    fn inner_rows(&self) -> i32 {
        (self.height as i32 - 3).max(1)
    }

    /// Terminal cell containing play-field point `(x, y)`.  Points outside
    /// the field land on the border cell just past the nearest edge.
    fn to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        let cols = self.inner_cols() as i64;
        let rows = self.inner_rows() as i64;
        let col = 1 + x as i64 * cols / self.field_width as i64;
        let row = 1 + y as i64 * rows / self.field_height as i64;
        (col.clamp(0, cols + 1) as i32, row.clamp(0, rows + 1) as i32)
    }

    /// Play-field point at the centre of inner cell `(col, row)`.
    fn cell_center(&self, col: i32, row: i32) -> (i32, i32) {
        let x = ((2 * (col as i64 - 1) + 1) * self.field_width as i64)
            / (2 * self.inner_cols() as i64);
        let y = ((2 * (row as i64 - 1) + 1) * self.field_height as i64)
            / (2 * self.inner_rows() as i64);
        (x as i32, y as i32)
    }

    fn off_field(&self, rect: &Rect) -> bool {
        rect.right() <= 0
            || rect.left() >= self.field_width
            || rect.bottom() <= 0
            || rect.top() >= self.field_height
    }

    fn in_field(&self, col: i32, row: i32) -> bool {
        col >= 1 && col <= self.inner_cols() && row >= 1 && row <= self.inner_rows()
    }

    fn draw_border(&mut self) -> std::io::Result<()> {
        let w = self.width as usize;
        let bottom = self.height.saturating_sub(2);

        self.out.queue(style::SetForegroundColor(C_BORDER))?;
        self.out.queue(cursor::MoveTo(0, 0))?;
        self.out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
        self.out.queue(cursor::MoveTo(0, bottom))?;
        self.out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 1..bottom {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_ground(&mut self) -> std::io::Result<()> {
        let (_, row) = self.to_cell(0, self.ground_y);
        if !self.in_field(1, row) {
            return Ok(());
        }
        self.out.queue(style::SetForegroundColor(C_GROUND))?;
        self.out.queue(cursor::MoveTo(1, row as u16))?;
        self.out.queue(Print("▔".repeat(self.inner_cols() as usize)))?;
        Ok(())
    }

    fn draw_controls_hint(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(HINT))?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        let (width, height) = terminal::size()?;
        self.width = width;
        self.height = height;

        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;
        self.draw_ground()
    }

    fn draw_sprite(&mut self, kind: SpriteKind, mask: &Mask, rect: Rect) -> std::io::Result<()> {
        // Pursuers are never culled and drift arbitrarily far left.
        if self.off_field(&rect) {
            return Ok(());
        }

        let (c0, r0) = self.to_cell(rect.left(), rect.top());
        let (c1, r1) = self.to_cell(rect.right(), rect.bottom());

        self.out.queue(style::SetForegroundColor(sprite_color(kind)))?;
        for row in r0..=r1 {
            for col in c0..=c1 {
                if !self.in_field(col, row) {
                    continue;
                }
                // Paint the cell when the mask pixel under its centre is opaque.
                let (x, y) = self.cell_center(col, row);
                if mask.is_opaque(x - rect.x, y - rect.y) {
                    self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                    self.out.queue(Print(SPRITE_CELL))?;
                }
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> std::io::Result<()> {
        let (col, row) = self.to_cell(x, y);
        self.out.queue(cursor::MoveTo(col.max(1) as u16, row.max(1) as u16))?;
        self.out.queue(style::SetForegroundColor(C_HUD))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32) -> std::io::Result<()> {
        let (col, row) = self.to_cell(cx, cy);
        let half = text.chars().count() as i32 / 2;
        self.out.queue(cursor::MoveTo((col - half).max(1) as u16, row.max(1) as u16))?;
        self.out.queue(style::SetForegroundColor(C_BANNER))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.draw_controls_hint()?;

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()?;
        Ok(())
    }
}
