//! Close-up of the selected star system with its orbits and planets.

use std::time::Instant;

use ratatui::prelude::*;

use crate::game::Game;
use crate::layout::Viewport;

use super::{draw_ring, fill_disc, infopanel, rgb, text_centered};

const TITLE_Y: f64 = 20.0;
const SUBTITLE_Y: f64 = 45.0;
const ORBIT_LABEL_GAP: f64 = 12.0;

pub fn render(buf: &mut Buffer, viewport: &Viewport, game: &Game, now: Instant) {
    game.background().render_stars(buf, viewport, game.elapsed_secs(now));

    let Some(system) = game.selected_system() else {
        return;
    };
    let area = game.galaxy_area();
    let layout = game.orbit_layout(system);
    let center = (layout.center.x as f64, layout.center.y as f64);

    for planet in &system.planets {
        draw_ring(buf, viewport, center, layout.radius(planet.orbit_number), Color::DarkGray);
    }
    fill_disc(buf, viewport, center, layout.star_radius(system), rgb(system.star_type.color()));

    let hovered = game.hovered_planet_index();
    for (index, planet) in system.planets.iter().enumerate() {
        let at = layout.planet_center(planet);
        let radius = planet.size as f64;
        fill_disc(buf, viewport, at, radius, rgb(planet.planet_type.color()));

        let style = if hovered == Some(index) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let label_at = (at.0, at.1 - radius - ORBIT_LABEL_GAP);
        text_centered(buf, viewport, label_at, &planet.orbit_number.to_string(), style);
    }

    let title_x = area.center().x as f64;
    text_centered(
        buf,
        viewport,
        (title_x, TITLE_Y),
        &system.name,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    );
    text_centered(
        buf,
        viewport,
        (title_x, SUBTITLE_Y),
        system.star_type.display_name(),
        Style::default().fg(rgb(system.star_type.color())),
    );

    let panel = viewport.project(game.config().info_panel_bounds());
    infopanel::render(buf, panel, "System", &infopanel::system_lines_for(game));
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{GameKey, InputEvent};

    #[test]
    fn test_title_and_panel_for_selected_system() {
        let now = Instant::now();
        let mut config = GameConfig::default();
        config.galaxy.seed = Some(3);
        config.galaxy.num_star_systems = 3;
        config.saves.directory = std::env::temp_dir().join("galaxy_conquest_system_view_unused");
        let mut game = Game::new(config, now);
        game.new_game(now);
        game.handle_event(InputEvent::Key(GameKey::Tab), now);
        game.handle_event(InputEvent::Key(GameKey::Enter), now);
        let name = game.selected_system().map(|s| s.name.clone()).unwrap();

        let mut buf = buffer();
        render(&mut buf, &viewport(), &game, now);
        let screen = text(&buf);
        assert!(screen.contains(&name));
        assert!(screen.contains("Click/Enter: open planet"));
    }

    #[test]
    fn test_nothing_without_selection() {
        let now = Instant::now();
        let mut config = GameConfig::default();
        config.galaxy.num_background_stars = 0;
        config.saves.directory = std::env::temp_dir().join("galaxy_conquest_system_view_unused");
        let game = Game::new(config, now);
        let mut buf = buffer();
        render(&mut buf, &viewport(), &game, now);
        assert!(text(&buf).trim().is_empty());
    }
}
