use std::time::Instant;

use ratatui::prelude::*;

use crate::game::Game;
use crate::layout::Viewport;

use super::text_centered;

pub fn render(buf: &mut Buffer, viewport: &Viewport, game: &Game, now: Instant) {
    let background = game.background();
    background.render_nebulae(buf, viewport);
    background.render_stars(buf, viewport, game.elapsed_secs(now));

    let display = &game.config().display;
    let footer = (display.screen_width as f64 / 2.0, display.screen_height as f64 - 20.0);
    text_centered(
        buf,
        viewport,
        footer,
        "Arrows/Tab to choose, Enter to select",
        Style::default().fg(Color::DarkGray),
    );
}
