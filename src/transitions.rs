//! Fade between views.

use std::time::{Duration, Instant};

use ratatui::prelude::*;

use crate::game::GameState;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub struct ViewTransition {
    duration: Duration,
    started: Option<Instant>,
    from: Option<GameState>,
    to: Option<GameState>,
}

impl Default for ViewTransition {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl ViewTransition {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started: None,
            from: None,
            to: None,
        }
    }

    pub fn start(&mut self, from: GameState, to: GameState, now: Instant) {
        self.from = Some(from);
        self.to = Some(to);
        self.started = Some(now);
    }

    /// Fraction of the fade completed, `None` when no fade is running.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        let started = self.started?;
        if self.duration.is_zero() {
            return None;
        }
        let p = now.saturating_duration_since(started).as_secs_f64() / self.duration.as_secs_f64();
        (p < 1.0).then_some(p)
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.progress(now).is_some()
    }

    /// Clear a finished fade.
    pub fn update(&mut self, now: Instant) {
        if self.started.is_some() && !self.is_active(now) {
            self.started = None;
        }
    }

    pub fn states(&self) -> Option<(GameState, GameState)> {
        self.from.zip(self.to)
    }

    /// Darken the frame by the remaining fade amount.
    pub fn render(&self, buf: &mut Buffer, area: Rect, now: Instant) {
        let Some(progress) = self.progress(now) else {
            return;
        };
        let keep = progress.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f64 * keep) as u8;
        for row in area.y..area.y + area.height {
            for col in area.x..area.x + area.width {
                let Some(cell) = buf.cell_mut((col, row)) else {
                    continue;
                };
                match cell.fg {
                    Color::Rgb(r, g, b) => {
                        cell.set_fg(Color::Rgb(scale(r), scale(g), scale(b)));
                    }
                    _ if keep < 0.5 => {
                        cell.set_style(Style::default().add_modifier(Modifier::DIM));
                    }
                    _ => {}
                }
                if let Color::Rgb(r, g, b) = cell.bg {
                    cell.set_bg(Color::Rgb(scale(r), scale(g), scale(b)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_until_started() {
        let t = ViewTransition::default();
        assert!(t.progress(Instant::now()).is_none());
        assert!(t.states().is_none());
    }

    #[test]
    fn test_progress_runs_for_duration() {
        let start = Instant::now();
        let mut t = ViewTransition::default();
        t.start(GameState::Galaxy, GameState::System, start);
        assert_eq!(t.progress(start), Some(0.0));
        let half = t.progress(start + Duration::from_millis(250)).unwrap();
        assert!((half - 0.5).abs() < 1e-9);
        assert!(t.is_active(start + Duration::from_millis(499)));
        assert!(!t.is_active(start + Duration::from_millis(500)));
        assert_eq!(t.states(), Some((GameState::Galaxy, GameState::System)));

        t.update(start + Duration::from_millis(100));
        assert!(t.is_active(start + Duration::from_millis(100)));
        t.update(start + Duration::from_secs(1));
        assert!(t.progress(start + Duration::from_millis(100)).is_none());
    }

    #[test]
    fn test_render_darkens_colours() {
        let start = Instant::now();
        let mut t = ViewTransition::default();
        t.start(GameState::System, GameState::Planet, start);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        buf[(0, 0)].set_fg(Color::Rgb(200, 100, 50));
        t.render(&mut buf, area, start + Duration::from_millis(250));
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(100, 50, 25));
    }
}
