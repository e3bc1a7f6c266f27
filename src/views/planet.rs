//! Detail view of a single planet: a large rendering and its resource bars.

use std::time::Instant;

use ratatui::prelude::*;

use crate::galaxy::{Planet, ResourceType, MAX_RESOURCE_AMOUNT};
use crate::game::Game;
use crate::layout::Viewport;

use super::{fill_disc, infopanel, rgb, text_centered};

const MAX_DISPLAY_RADIUS: f64 = 80.0;
const DISC_CENTER_Y: f64 = 190.0;
const RESOURCES_TOP: f64 = 330.0;
const RESOURCE_ROW_HEIGHT: f64 = 30.0;
const LABEL_X: f64 = 20.0;
const BAR_X: f64 = 150.0;
const BAR_WIDTH: f64 = 240.0;

pub fn render(buf: &mut Buffer, viewport: &Viewport, game: &Game, now: Instant) {
    game.background().render_stars(buf, viewport, game.elapsed_secs(now));

    let Some(planet) = game.selected_planet() else {
        return;
    };
    let center_x = game.galaxy_area().center().x as f64;

    text_centered(
        buf,
        viewport,
        (center_x, 30.0),
        &planet.name,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    );
    text_centered(
        buf,
        viewport,
        (center_x, 55.0),
        planet.planet_type.display_name(),
        Style::default().fg(rgb(planet.planet_type.color())),
    );

    let radius = (planet.size as f64 * 4.0).min(MAX_DISPLAY_RADIUS);
    fill_disc(buf, viewport, (center_x, DISC_CENTER_Y), radius, rgb(planet.planet_type.color()));

    for (row, &resource) in ResourceType::all().iter().enumerate() {
        let y = RESOURCES_TOP + row as f64 * RESOURCE_ROW_HEIGHT;
        resource_bar(buf, viewport, planet, resource, y);
    }

    let panel = viewport.project(game.config().info_panel_bounds());
    infopanel::render(buf, panel, "Planet", &infopanel::planet_lines(game));
}

/// Filled cells out of `width` for `amount`.
fn bar_fill(amount: u8, width: usize) -> usize {
    let amount = amount.min(MAX_RESOURCE_AMOUNT) as usize;
    (amount * width + MAX_RESOURCE_AMOUNT as usize / 2) / MAX_RESOURCE_AMOUNT as usize
}

fn resource_bar(buf: &mut Buffer, viewport: &Viewport, planet: &Planet, resource: ResourceType, y: f64) {
    let (Some((label_col, row)), Some((bar_col, _)), Some((end_col, _))) = (
        viewport.to_cell(LABEL_X, y),
        viewport.to_cell(BAR_X, y),
        viewport.to_cell(BAR_X + BAR_WIDTH, y),
    ) else {
        return;
    };
    let amount = planet.resource(resource);
    let style = if planet.planet_type.is_common(resource) {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Gray)
    };

    buf.set_string(label_col, row, resource.display_name(), style);

    let width = end_col.saturating_sub(bar_col) as usize;
    let filled = bar_fill(amount, width);
    let bar: String = "█".repeat(filled) + &"░".repeat(width - filled);
    buf.set_string(bar_col, row, &bar, style);
    buf.set_string(end_col + 1, row, amount.to_string(), style);
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{GameKey, InputEvent};

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar_fill(0, 30), 0);
        assert_eq!(bar_fill(100, 30), 30);
        assert_eq!(bar_fill(50, 30), 15);
        assert_eq!(bar_fill(250, 30), 30);
    }

    #[test]
    fn test_planet_view_lists_resources() {
        let now = Instant::now();
        let mut config = GameConfig::default();
        config.galaxy.seed = Some(11);
        config.saves.directory = std::env::temp_dir().join("galaxy_conquest_planet_view_unused");
        let mut game = Game::new(config, now);
        game.new_game(now);

        let with_planets = game
            .galaxy()
            .systems
            .iter()
            .position(|s| !s.planets.is_empty())
            .unwrap();
        for _ in 0..=with_planets {
            game.handle_event(InputEvent::Key(GameKey::Tab), now);
        }
        game.handle_event(InputEvent::Key(GameKey::Enter), now);
        game.handle_event(InputEvent::Key(GameKey::Tab), now);
        game.handle_event(InputEvent::Key(GameKey::Enter), now);
        let name = game.selected_planet().map(|p| p.name.clone()).unwrap();

        let mut buf = buffer();
        render(&mut buf, &viewport(), &game, now);
        let screen = text(&buf);
        assert!(screen.contains(&name));
        for resource in ResourceType::all() {
            assert!(screen.contains(resource.display_name()));
        }
    }
}
