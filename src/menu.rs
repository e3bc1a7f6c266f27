//! Overlay menus: startup, pause (galaxy) and system menus.
//!
//! Geometry is in logical pixels so pointer hit tests do not depend on the
//! terminal size. The runner projects the boxes when rendering.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::galaxy::{Bounds, Point};
use crate::input::GameKey;
use crate::layout::Viewport;

pub const MENU_WIDTH: i32 = 400;
pub const MENU_TOP: i32 = 50;
/// Offset of the first item below the top of the box
pub const ITEMS_OFFSET: i32 = 100;
pub const ITEM_SPACING: i32 = 60;
pub const ITEM_HIT_WIDTH: i32 = 200;
/// Box height beyond the items, for the title and bottom padding
pub const MENU_EXTRA_HEIGHT: i32 = 150;

/// What activating a menu item does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    NewGame,
    LoadGame,
    Save,
    Resume,
    MainMenu,
    GalaxyView,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
    pub enabled: bool,
}

impl MenuItem {
    pub fn new(label: &'static str, action: MenuAction) -> Self {
        Self {
            label,
            action,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
    pub selected: usize,
}

impl Menu {
    pub fn new(title: &'static str, items: Vec<MenuItem>) -> Self {
        Self {
            title,
            items,
            selected: 0,
        }
    }

    pub fn startup(has_save: bool) -> Self {
        let load = MenuItem::new("Load Game", MenuAction::LoadGame);
        Self::new(
            "Galaxy Conquest",
            vec![
                MenuItem::new("New Game", MenuAction::NewGame),
                if has_save { load } else { load.disabled() },
                MenuItem::new("Exit", MenuAction::Quit),
            ],
        )
    }

    pub fn galaxy() -> Self {
        Self::new(
            "Pause",
            vec![
                MenuItem::new("New Game", MenuAction::NewGame),
                MenuItem::new("Save", MenuAction::Save),
                MenuItem::new("Resume Game", MenuAction::Resume),
                MenuItem::new("Main Menu", MenuAction::MainMenu),
                MenuItem::new("Quit to Desktop", MenuAction::Quit),
            ],
        )
    }

    pub fn system() -> Self {
        Self::new(
            "System Menu",
            vec![
                MenuItem::new("Resume Game", MenuAction::Resume),
                MenuItem::new("Galaxy View", MenuAction::GalaxyView),
                MenuItem::new("Quit to Desktop", MenuAction::Quit),
            ],
        )
    }

    pub fn set_enabled(&mut self, action: MenuAction, enabled: bool) {
        for item in self.items.iter_mut().filter(|i| i.action == action) {
            item.enabled = enabled;
        }
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    fn activate(&self, index: usize) -> Option<MenuAction> {
        self.items.get(index).filter(|i| i.enabled).map(|i| i.action)
    }

    pub fn box_bounds(&self, screen_width: i32) -> Bounds {
        Bounds::new(
            (screen_width - MENU_WIDTH) / 2,
            MENU_TOP,
            MENU_WIDTH,
            self.items.len() as i32 * ITEM_SPACING + MENU_EXTRA_HEIGHT,
        )
    }

    pub fn item_bounds(&self, index: usize, screen_width: i32) -> Bounds {
        Bounds::new(
            screen_width / 2 - ITEM_HIT_WIDTH / 2,
            MENU_TOP + ITEMS_OFFSET + index as i32 * ITEM_SPACING,
            ITEM_HIT_WIDTH,
            ITEM_SPACING,
        )
    }

    pub fn item_at(&self, point: Point, screen_width: i32) -> Option<usize> {
        (0..self.items.len()).find(|&i| self.item_bounds(i, screen_width).contains(point))
    }

    /// Up/Down wrap, Enter activates the selected item if it is enabled.
    pub fn handle_key(&mut self, key: GameKey) -> Option<MenuAction> {
        match key {
            GameKey::Up => {
                self.select_prev();
                None
            }
            GameKey::Down | GameKey::Tab => {
                self.select_next();
                None
            }
            GameKey::BackTab => {
                self.select_prev();
                None
            }
            GameKey::Enter => self.activate(self.selected),
            _ => None,
        }
    }

    /// Pointer motion moves the selection onto the item under it.
    pub fn handle_pointer(&mut self, point: Point, screen_width: i32) {
        if let Some(i) = self.item_at(point, screen_width) {
            self.selected = i;
        }
    }

    /// A click on an enabled item selects and activates it.
    pub fn handle_click(&mut self, point: Point, screen_width: i32) -> Option<MenuAction> {
        let index = self.item_at(point, screen_width)?;
        let action = self.activate(index)?;
        self.selected = index;
        Some(action)
    }

    pub fn render(&self, buf: &mut Buffer, viewport: &Viewport, screen_width: i32) {
        let box_area = viewport.project(self.box_bounds(screen_width));
        if box_area.width < 4 || box_area.height < 3 {
            return;
        }

        Clear.render(box_area, buf);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(box_area);
        block.render(box_area, buf);

        for (i, item) in self.items.iter().enumerate() {
            let row = viewport.project(self.item_bounds(i, screen_width));
            let y = row.y + row.height / 2;
            if y < inner.y || y >= inner.y + inner.height {
                continue;
            }

            let is_selected = i == self.selected;
            let style = match (item.enabled, is_selected) {
                (false, _) => Style::default().fg(Color::DarkGray),
                (true, true) => Style::default().fg(Color::Black).bg(Color::White),
                (true, false) => Style::default().fg(Color::White),
            };
            let marker = if is_selected && item.enabled { "● " } else { "  " };
            Paragraph::new(format!("{}{}", marker, item.label))
                .style(style)
                .alignment(Alignment::Center)
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
        }

        let help_y = box_area.y + box_area.height;
        if help_y < viewport.area().y + viewport.area().height {
            Paragraph::new("↑↓: Navigate  Enter: Select")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(Rect::new(box_area.x, help_y, box_area.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_menu_load_enabled_by_save() {
        let menu = Menu::startup(false);
        assert_eq!(menu.items.len(), 3);
        assert!(!menu.items[1].enabled);
        assert!(Menu::startup(true).items[1].enabled);
    }

    #[test]
    fn test_keys_wrap_and_activate() {
        let mut menu = Menu::galaxy();
        menu.handle_key(GameKey::Up);
        assert_eq!(menu.selected, 4);
        assert_eq!(menu.handle_key(GameKey::Enter), Some(MenuAction::Quit));
        menu.handle_key(GameKey::Down);
        assert_eq!(menu.selected, 0);
        assert_eq!(menu.handle_key(GameKey::Enter), Some(MenuAction::NewGame));
        assert_eq!(menu.handle_key(GameKey::Char('x')), None);
    }

    #[test]
    fn test_disabled_item_does_nothing() {
        let mut menu = Menu::startup(false);
        menu.handle_key(GameKey::Down);
        assert_eq!(menu.selected, 1);
        assert_eq!(menu.handle_key(GameKey::Enter), None);

        let load_point = menu.item_bounds(1, 800).center();
        menu.selected = 0;
        assert_eq!(menu.handle_click(load_point, 800), None);
        assert_eq!(menu.selected, 0);
    }

    #[test]
    fn test_item_geometry() {
        let menu = Menu::system();
        assert_eq!(menu.box_bounds(800), Bounds::new(200, 50, 400, 330));
        assert_eq!(menu.item_bounds(0, 800), Bounds::new(300, 150, 200, 60));
        assert_eq!(menu.item_bounds(2, 800), Bounds::new(300, 270, 200, 60));
        assert_eq!(menu.item_at(Point::new(310, 215), 800), Some(1));
        assert_eq!(menu.item_at(Point::new(290, 215), 800), None);
        assert_eq!(menu.item_at(Point::new(310, 330), 800), None);
    }

    #[test]
    fn test_pointer_selects_and_click_activates() {
        let mut menu = Menu::system();
        menu.handle_pointer(Point::new(400, 280), 800);
        assert_eq!(menu.selected, 2);
        menu.handle_pointer(Point::new(10, 10), 800);
        assert_eq!(menu.selected, 2);
        assert_eq!(menu.handle_click(Point::new(400, 220), 800), Some(MenuAction::GalaxyView));
        assert_eq!(menu.selected, 1);
    }

    #[test]
    fn test_render_draws_title_and_items() {
        let viewport = Viewport::new(Rect::new(0, 0, 100, 40), 800, 600);
        let mut buf = Buffer::empty(Rect::new(0, 0, 100, 40));
        Menu::galaxy().render(&mut buf, &viewport, 800);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Pause"));
        assert!(text.contains("Resume Game"));
        assert!(text.contains("Quit to Desktop"));
    }
}
