//! Short-lived on-screen messages such as "Game Saved!".

use std::time::{Duration, Instant};

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::galaxy::Bounds;
use crate::layout::Viewport;

pub const DEFAULT_DURATION: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Notification {
    message: String,
    shown_at: Instant,
}

#[derive(Clone, Debug)]
pub struct Notifications {
    current: Option<Notification>,
    duration: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Notifications {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Replace any message on screen with `message`.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn active(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < self.duration)
            .map(|n| n.message.as_str())
    }

    /// Drop the message once its time is up.
    pub fn expire(&mut self, now: Instant) {
        if self.active(now).is_none() {
            self.current = None;
        }
    }

    pub fn render(&self, buf: &mut Buffer, viewport: &Viewport, screen_width: i32, now: Instant) {
        let Some(message) = self.active(now) else {
            return;
        };
        let area = viewport.project(Bounds::new(screen_width / 2 - 100, 25, 200, 50));
        let width = area.width.max(message.chars().count() as u16 + 4).min(viewport.area().width);
        let center = area.x + area.width / 2;
        let area = Rect::new(center.saturating_sub(width / 2), area.y, width, area.height.max(3));
        let area = area.intersection(viewport.area());
        Clear.render(area, buf);
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Green)))
            .render(area, buf);
    }
}
