//! Per-frame debug overlay, toggled with F4.

use std::fmt::Display;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugOverlay {
    enabled: bool,
    lines: Vec<String>,
}

impl DebugOverlay {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            lines: Vec::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.lines.clear();
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Record a line for this frame. Ignored while disabled.
    pub fn add(&mut self, info: impl Display) {
        if self.enabled {
            self.lines.push(info.to_string());
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self, buf: &mut Buffer, area: Rect) {
        if !self.enabled || self.lines.is_empty() {
            return;
        }
        let width = self
            .lines
            .iter()
            .map(|l| l.chars().count() as u16)
            .max()
            .unwrap_or(0)
            .saturating_add(2)
            .min(area.width);
        let height = (self.lines.len() as u16 + 2).min(area.height);
        let overlay = Rect::new(area.x, area.y, width, height);

        Clear.render(overlay, buf);
        let text: Vec<Line> = self.lines.iter().map(|l| Line::from(l.as_str())).collect();
        Paragraph::new(text)
            .style(Style::default().fg(Color::White).bg(Color::Black))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Gray)))
            .render(overlay, buf);
    }
}
