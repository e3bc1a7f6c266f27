//! Galaxy map: every star system with its name, plus the info panel.

use std::time::Instant;

use ratatui::prelude::*;

use crate::galaxy::types::LABEL_GAP;
use crate::game::Game;
use crate::layout::Viewport;

use super::{draw_ring, fill_disc, infopanel, rgb, text_centered};

/// Distance from the star edge to its hover ring.
const HOVER_RING_GAP: f64 = 6.0;

pub fn render(buf: &mut Buffer, viewport: &Viewport, game: &Game, now: Instant) {
    let background = game.background();
    background.render_nebulae(buf, viewport);
    background.render_stars(buf, viewport, game.elapsed_secs(now));

    let hovered = game.hovered_system_index();
    for (index, system) in game.galaxy().systems.iter().enumerate() {
        let center = (system.position.x as f64, system.position.y as f64);
        let radius = system.size as f64;
        let is_hovered = hovered == Some(index);

        if is_hovered {
            draw_ring(buf, viewport, center, radius + HOVER_RING_GAP, Color::White);
        }
        fill_disc(buf, viewport, center, radius, rgb(system.star_type.color()));

        let label_style = if is_hovered {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let label_at = (center.0, center.1 + radius + LABEL_GAP as f64);
        text_centered(buf, viewport, label_at, &system.name, label_style);
    }

    let panel = viewport.project(game.config().info_panel_bounds());
    infopanel::render(buf, panel, "Galaxy", &infopanel::galaxy_lines(game));
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{GameKey, InputEvent};

    fn game(now: Instant) -> Game {
        let mut config = GameConfig::default();
        config.galaxy.seed = Some(9);
        config.galaxy.num_star_systems = 5;
        config.galaxy.num_nebulae = 0;
        config.saves.directory = std::env::temp_dir().join("galaxy_conquest_galaxy_view_unused");
        let mut game = Game::new(config, now);
        game.new_game(now);
        game
    }

    #[test]
    fn test_system_names_and_panel_drawn() {
        let now = Instant::now();
        let game = game(now);
        let mut buf = buffer();
        render(&mut buf, &viewport(), &game, now);
        let screen = text(&buf);
        assert!(screen.contains("Galaxy View"));
        assert!(screen.contains(&format!("Systems: {}", game.galaxy().len())));
    }

    #[test]
    fn test_hovered_system_in_panel() {
        let now = Instant::now();
        let mut game = game(now);
        game.handle_event(InputEvent::Key(GameKey::Tab), now);
        let mut buf = buffer();
        render(&mut buf, &viewport(), &game, now);
        let star_type = game.galaxy().systems[0].star_type.to_string();
        assert!(text(&buf).contains(&format!("Type: {}", star_type)));
    }
}
