//! Rendering of the game onto a ratatui frame.
//!
//! Each view draws straight into the frame buffer through a [`Viewport`], so
//! shapes are specified in logical pixels and land on whichever cells cover
//! them.

pub mod galaxy;
pub mod infopanel;
pub mod planet;
pub mod startup;
pub mod system;

use std::time::Instant;

use ratatui::{prelude::*, widgets::Block};

use crate::galaxy::Rgb;
use crate::game::{Game, GameState};
use crate::layout::Viewport;

pub fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Solid disc; a disc that fits in one cell becomes a dot glyph.
pub(crate) fn fill_disc(buf: &mut Buffer, viewport: &Viewport, center: (f64, f64), radius: f64, color: Color) {
    let cells = viewport.disc_cells(center.0, center.1, radius);
    let glyph = if cells.len() == 1 { '●' } else { '█' };
    for pos in cells {
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(glyph).set_fg(color);
        }
    }
}

pub(crate) fn draw_ring(buf: &mut Buffer, viewport: &Viewport, center: (f64, f64), radius: f64, color: Color) {
    for pos in viewport.ring_cells(center.0, center.1, radius) {
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char('·').set_fg(color);
        }
    }
}

/// Write `text` centred on the cell containing the logical point, clipped to the viewport.
pub(crate) fn text_centered(buf: &mut Buffer, viewport: &Viewport, at: (f64, f64), text: &str, style: Style) {
    let Some((col, row)) = viewport.to_cell(at.0, at.1) else {
        return;
    };
    let area = viewport.area();
    let len = text.chars().count() as u16;
    let x = col.saturating_sub(len / 2).max(area.x);
    let max_width = (area.x + area.width).saturating_sub(x) as usize;
    let clipped: String = text.chars().take(max_width).collect();
    buf.set_string(x, row, &clipped, style);
}

/// Draw one frame and return the viewport used, for mapping mouse input.
pub fn draw(frame: &mut Frame, game: &Game, now: Instant) -> Viewport {
    let area = frame.area();
    let display = &game.config().display;
    let viewport = Viewport::new(area, display.screen_width, display.screen_height);
    let screen_width = display.screen_width as i32;
    let buf = frame.buffer_mut();

    Block::default().style(Style::default().bg(Color::Black)).render(area, buf);

    match game.state().view() {
        GameState::StartupMenu => startup::render(buf, &viewport, game, now),
        GameState::Galaxy => galaxy::render(buf, &viewport, game, now),
        GameState::System => system::render(buf, &viewport, game, now),
        GameState::Planet => planet::render(buf, &viewport, game, now),
        GameState::GalaxyMenu | GameState::SystemMenu => {}
    }
    game.transition().render(buf, area, now);

    if let Some(menu) = game.active_menu() {
        menu.render(buf, &viewport, screen_width);
    }
    game.notifications().render(buf, &viewport, screen_width, now);
    game.debug().render(buf, area);

    viewport
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn viewport() -> Viewport {
        Viewport::new(Rect::new(0, 0, 100, 40), 800, 600)
    }

    pub fn buffer() -> Buffer {
        Buffer::empty(Rect::new(0, 0, 100, 40))
    }

    pub fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}
