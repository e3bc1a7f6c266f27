//! Right-hand information panel, one flavour per view.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};

use crate::galaxy::{Planet, ResourceType, StarSystem};
use crate::game::Game;

use super::rgb;

type PanelLines = Vec<(String, Style)>;

fn heading() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn plain() -> Style {
    Style::default().fg(Color::White)
}

fn hint() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn blank(lines: &mut PanelLines) {
    lines.push((String::new(), Style::default()));
}

fn system_lines(system: &StarSystem, lines: &mut PanelLines) {
    lines.push((
        format!(" {}", system.name),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    lines.push((
        format!("  Type: {}", system.star_type),
        Style::default().fg(rgb(system.star_type.color())),
    ));
    lines.push((format!("  Planets: {}", system.planet_count()), plain()));
}

fn resource_lines(planet: &Planet, lines: &mut PanelLines) {
    lines.push((" Resources:".to_string(), heading()));
    for &resource in ResourceType::all() {
        let style = if planet.planet_type.is_common(resource) {
            Style::default().fg(Color::LightGreen)
        } else {
            plain()
        };
        lines.push((format!("  {}: {}", resource, planet.resource(resource)), style));
    }
}

pub fn galaxy_lines(game: &Game) -> PanelLines {
    let mut lines = PanelLines::new();
    match game.hovered_system() {
        Some(system) => {
            system_lines(system, &mut lines);
            lines.push((format!("  Size: {}", system.size), plain()));
            lines.push((
                format!("  Position: ({}, {})", system.position.x, system.position.y),
                Style::default().fg(Color::Gray),
            ));
        }
        None => {
            let galaxy = game.galaxy();
            lines.push((" Galaxy View".to_string(), heading()));
            lines.push((format!("  Systems: {}", galaxy.len()), plain()));
            lines.push((format!("  Planets: {}", galaxy.planet_count()), plain()));
            blank(&mut lines);
            lines.push(("  Hover over a star system".to_string(), plain()));
            lines.push(("  for more information".to_string(), plain()));
        }
    }
    blank(&mut lines);
    lines.push(("  Click/Enter: open system".to_string(), hint()));
    lines.push(("  Tab: next system".to_string(), hint()));
    lines.push(("  Esc: menu  F5: save".to_string(), hint()));
    lines
}

pub fn system_lines_for(game: &Game) -> PanelLines {
    let mut lines = PanelLines::new();
    let Some(system) = game.selected_system() else {
        return lines;
    };
    system_lines(system, &mut lines);

    let hovered = game.hovered_planet_index().and_then(|i| system.planets.get(i));
    if let Some(planet) = hovered {
        blank(&mut lines);
        lines.push((format!(" {}", planet.name), heading()));
        lines.push((
            format!("  Type: {}", planet.planet_type),
            Style::default().fg(rgb(planet.planet_type.color())),
        ));
        resource_lines(planet, &mut lines);
    }
    blank(&mut lines);
    lines.push(("  Click/Enter: open planet".to_string(), hint()));
    lines.push(("  Backspace: galaxy  Esc: menu".to_string(), hint()));
    lines
}

pub fn planet_lines(game: &Game) -> PanelLines {
    let mut lines = PanelLines::new();
    let Some(planet) = game.selected_planet() else {
        return lines;
    };
    lines.push((
        format!(" {}", planet.name),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ));
    lines.push((
        format!("  Type: {}", planet.planet_type),
        Style::default().fg(rgb(planet.planet_type.color())),
    ));
    lines.push((format!("  Size: {}", planet.size), plain()));
    lines.push((format!("  Orbit: {}", planet.orbit_number), plain()));
    blank(&mut lines);
    resource_lines(planet, &mut lines);
    lines.push((format!("  Total: {}", planet.total_resources()), Style::default().fg(Color::Gray)));
    if let Some((resource, amount)) = planet.richest_resource() {
        lines.push((format!("  Richest: {} ({})", resource, amount), Style::default().fg(Color::Gray)));
    }
    blank(&mut lines);
    lines.push(("  Esc/Backspace: back".to_string(), hint()));
    lines
}

/// Panel frame plus its lines, truncated to the panel.
pub fn render(buf: &mut Buffer, area: Rect, title: &str, lines: &PanelLines) {
    if area.width < 3 || area.height < 3 {
        return;
    }
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .style(Style::default().bg(Color::Rgb(30, 30, 30)));
    let inner = block.inner(area);
    block.render(area, buf);

    for (i, (line, style)) in lines.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let display_line: String = line.chars().take(inner.width as usize).collect();
        buf.set_string(inner.x, inner.y + i as u16, &display_line, *style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{GameKey, InputEvent};
    use std::time::Instant;

    fn game() -> Game {
        let mut config = GameConfig::default();
        config.galaxy.seed = Some(5);
        config.galaxy.num_star_systems = 4;
        config.saves.directory = std::env::temp_dir().join("galaxy_conquest_panel_unused");
        let now = Instant::now();
        let mut game = Game::new(config, now);
        game.new_game(now);
        game
    }

    #[test]
    fn test_galaxy_summary_without_hover() {
        let game = game();
        let lines = galaxy_lines(&game);
        assert_eq!(lines[0].0, " Galaxy View");
        assert_eq!(lines[1].0, format!("  Systems: {}", game.galaxy().len()));
    }

    #[test]
    fn test_galaxy_hover_shows_system() {
        let mut game = game();
        game.handle_event(InputEvent::Key(GameKey::Tab), Instant::now());
        let name = game.galaxy().systems[0].name.clone();
        let lines = galaxy_lines(&game);
        assert_eq!(lines[0].0, format!(" {}", name));
        assert!(lines[1].0.starts_with("  Type: "));
    }

    #[test]
    fn test_render_truncates_to_panel() {
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        let lines = vec![
            ("a very long line of text".to_string(), Style::default()),
            ("second".to_string(), Style::default()),
            ("third".to_string(), Style::default()),
        ];
        render(&mut buf, area, "Info", &lines);
        assert_eq!(buf[(1, 1)].symbol(), "a");
        assert_eq!(buf[(10, 1)].symbol(), "n");
        assert_eq!(buf[(1, 2)].symbol(), "s");
        assert_eq!(buf[(11, 1)].symbol(), "│");
    }
}
