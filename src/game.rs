//! Game state machine.
//!
//! `Game` owns the galaxy, the selection and hover bookkeeping, the menus and
//! the save slot. It never touches the terminal: input arrives as
//! [`InputEvent`]s with logical coordinates and time is passed in explicitly,
//! so every transition can be driven from tests.

use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::background::Background;
use crate::config::GameConfig;
use crate::debug::DebugOverlay;
use crate::galaxy::{generate_galaxy_with, Bounds, Galaxy, PlacementParams, Planet, Point, StarSystem};
use crate::hover::{find_hovered, is_within_circle};
use crate::input::{GameKey, InputEvent};
use crate::layout::OrbitLayout;
use crate::menu::{Menu, MenuAction};
use crate::notifications::Notifications;
use crate::persistence::SaveStore;
use crate::transitions::ViewTransition;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    StartupMenu,
    Galaxy,
    System,
    Planet,
    GalaxyMenu,
    SystemMenu,
}

impl GameState {
    pub fn is_menu(self) -> bool {
        matches!(self, GameState::StartupMenu | GameState::GalaxyMenu | GameState::SystemMenu)
    }

    /// The view drawn underneath; in-game menus overlay their view.
    pub fn view(self) -> GameState {
        match self {
            GameState::GalaxyMenu => GameState::Galaxy,
            GameState::SystemMenu => GameState::System,
            other => other,
        }
    }
}

pub struct Game {
    config: GameConfig,
    state: GameState,
    galaxy: Galaxy,
    selected_system: Option<usize>,
    selected_planet: Option<usize>,
    hovered_system: Option<usize>,
    hovered_planet: Option<usize>,
    pointer: Option<Point>,
    pick_slop: i32,
    startup_menu: Menu,
    galaxy_menu: Menu,
    system_menu: Menu,
    background: Background,
    store: SaveStore,
    notifications: Notifications,
    transition: ViewTransition,
    debug: DebugOverlay,
    rng: ChaCha8Rng,
    started_at: Instant,
    last_save: Instant,
    running: bool,
}

impl Game {
    pub fn new(config: GameConfig, now: Instant) -> Self {
        let seed = config.galaxy.seed.unwrap_or_else(rand::random);
        info!("Initializing game with seed {}", seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let background = Background::generate(
            config.display.screen_width,
            config.display.screen_height,
            config.galaxy.num_background_stars,
            config.galaxy.num_nebulae,
            &mut rng,
        );
        let store = SaveStore::new(config.saves.directory.clone());
        let startup_menu = Menu::startup(store.exists());
        let debug = DebugOverlay::new(config.debug.enabled);

        Self {
            state: GameState::StartupMenu,
            galaxy: Galaxy::default(),
            selected_system: None,
            selected_planet: None,
            hovered_system: None,
            hovered_planet: None,
            pointer: None,
            pick_slop: 0,
            startup_menu,
            galaxy_menu: Menu::galaxy(),
            system_menu: Menu::system(),
            background,
            store,
            notifications: Notifications::default(),
            transition: ViewTransition::default(),
            debug,
            rng,
            started_at: now,
            last_save: now,
            running: true,
            config,
        }
    }

    // ---- accessors used by the views ----

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn transition(&self) -> &ViewTransition {
        &self.transition
    }

    pub fn debug(&self) -> &DebugOverlay {
        &self.debug
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn selected_system(&self) -> Option<&StarSystem> {
        self.selected_system.and_then(|i| self.galaxy.get(i))
    }

    pub fn selected_planet(&self) -> Option<&Planet> {
        let system = self.selected_system()?;
        self.selected_planet.and_then(|i| system.planets.get(i))
    }

    pub fn hovered_system(&self) -> Option<&StarSystem> {
        self.hovered_system.and_then(|i| self.galaxy.get(i))
    }

    pub fn hovered_system_index(&self) -> Option<usize> {
        self.hovered_system
    }

    pub fn hovered_planet_index(&self) -> Option<usize> {
        self.hovered_planet
    }

    /// Menu drawn over the current view, if any.
    pub fn active_menu(&self) -> Option<&Menu> {
        match self.state {
            GameState::StartupMenu => Some(&self.startup_menu),
            GameState::GalaxyMenu => Some(&self.galaxy_menu),
            GameState::SystemMenu => Some(&self.system_menu),
            _ => None,
        }
    }

    fn active_menu_mut(&mut self) -> Option<&mut Menu> {
        match self.state {
            GameState::StartupMenu => Some(&mut self.startup_menu),
            GameState::GalaxyMenu => Some(&mut self.galaxy_menu),
            GameState::SystemMenu => Some(&mut self.system_menu),
            _ => None,
        }
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started_at).as_secs_f64()
    }

    /// Extra hit radius for pointer tests, in logical pixels.
    pub fn set_pick_slop(&mut self, slop: i32) {
        self.pick_slop = slop.max(0);
    }

    pub fn galaxy_area(&self) -> Bounds {
        self.config.galaxy_bounds()
    }

    pub fn orbit_layout(&self, system: &StarSystem) -> OrbitLayout {
        OrbitLayout::for_system(self.galaxy_area(), system)
    }

    fn screen_width(&self) -> i32 {
        self.config.display.screen_width as i32
    }

    // ---- state transitions ----

    fn to_state(&mut self, new_state: GameState, now: Instant) {
        let old_state = self.state;
        if old_state == new_state {
            return;
        }
        debug!("Transitioning from {:?} to {:?}", old_state, new_state);
        if old_state.view() != new_state.view() {
            self.transition.start(old_state, new_state, now);
        }
        self.state = new_state;
        if let Some(menu) = self.active_menu_mut() {
            menu.selected = 0;
        }
    }

    pub fn new_game(&mut self, now: Instant) {
        let galaxy_cfg = &self.config.galaxy;
        info!("Starting new game with {} star systems", galaxy_cfg.num_star_systems);
        let params = PlacementParams::new(galaxy_cfg.num_star_systems, self.config.galaxy_bounds(), galaxy_cfg.margin)
            .with_max_attempts(galaxy_cfg.max_placement_attempts);
        self.galaxy = generate_galaxy_with(&params, &mut self.rng);
        self.clear_selection();
        self.last_save = now;
        self.to_state(GameState::Galaxy, now);
    }

    fn clear_selection(&mut self) {
        self.selected_system = None;
        self.selected_planet = None;
        self.hovered_system = None;
        self.hovered_planet = None;
    }

    /// Write the slot. From the pause menu the game resumes afterwards.
    pub fn save_game(&mut self, now: Instant) -> bool {
        info!("Saving game state");
        let selected = self.selected_system().map(|s| s.name.as_str());
        match self.store.save(&self.galaxy, selected) {
            Ok(_) => {
                self.last_save = now;
                self.notifications.show("Game Saved!", now);
                self.startup_menu.set_enabled(MenuAction::LoadGame, true);
                if self.state == GameState::GalaxyMenu {
                    self.return_to_game(now);
                }
                true
            }
            Err(e) => {
                error!("Failed to save game: {}", e);
                self.notifications.show("Save failed", now);
                false
            }
        }
    }

    /// Replace the galaxy with the slot's contents. On failure nothing changes.
    pub fn load_game(&mut self, now: Instant) -> bool {
        info!("Loading game state from {}", self.store.path().display());
        match self.store.load() {
            Ok(loaded) => {
                let selected = loaded
                    .selected_system
                    .as_deref()
                    .and_then(|name| loaded.galaxy.position_of(name));
                self.galaxy = loaded.galaxy;
                self.clear_selection();
                self.selected_system = selected;
                self.last_save = now;
                info!("Loaded {} star systems", self.galaxy.len());
                self.to_state(GameState::Galaxy, now);
                true
            }
            Err(e) => {
                error!("Error loading save file: {}", e);
                self.notifications.show("Load failed", now);
                false
            }
        }
    }

    pub fn return_to_game(&mut self, now: Instant) {
        let target = if self.selected_system.is_some() {
            GameState::System
        } else {
            GameState::Galaxy
        };
        self.to_state(target, now);
    }

    pub fn go_to_galaxy_view(&mut self, now: Instant) {
        self.clear_selection();
        self.to_state(GameState::Galaxy, now);
    }

    pub fn quit_to_main_menu(&mut self, now: Instant) {
        info!("Quitting to main menu");
        self.clear_selection();
        self.startup_menu.set_enabled(MenuAction::LoadGame, self.store.exists());
        self.to_state(GameState::StartupMenu, now);
    }

    pub fn quit(&mut self) {
        info!("Quitting game");
        self.running = false;
    }

    pub fn perform(&mut self, action: MenuAction, now: Instant) {
        debug!("Menu action {:?} in {:?}", action, self.state);
        match action {
            MenuAction::NewGame => self.new_game(now),
            MenuAction::LoadGame => {
                self.load_game(now);
            }
            MenuAction::Save => {
                self.save_game(now);
            }
            MenuAction::Resume => self.return_to_game(now),
            MenuAction::MainMenu => self.quit_to_main_menu(now),
            MenuAction::GalaxyView => self.go_to_galaxy_view(now),
            MenuAction::Quit => self.quit(),
        }
    }

    fn open_system(&mut self, index: usize, now: Instant) {
        if let Some(system) = self.galaxy.get(index) {
            info!("Selected star system: {}", system.name);
            self.selected_system = Some(index);
            self.selected_planet = None;
            self.hovered_planet = None;
            self.to_state(GameState::System, now);
        }
    }

    fn open_planet(&mut self, index: usize, now: Instant) {
        if let Some(planet) = self.selected_system().and_then(|s| s.planets.get(index)) {
            info!("Selected planet: {}", planet.name);
            self.selected_planet = Some(index);
            self.to_state(GameState::Planet, now);
        }
    }

    fn back_to_system(&mut self, now: Instant) {
        self.selected_planet = None;
        self.to_state(GameState::System, now);
    }

    // ---- input ----

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Quit => self.quit(),
            InputEvent::Key(GameKey::F4) => self.debug.toggle(),
            InputEvent::Key(GameKey::F5) if !self.state.is_menu() => {
                self.save_game(now);
            }
            InputEvent::MouseMove(point) => {
                self.pointer = Some(point);
                let width = self.screen_width();
                if self.state.is_menu() {
                    if let Some(menu) = self.active_menu_mut() {
                        menu.handle_pointer(point, width);
                    }
                } else {
                    self.update_hover(point);
                }
            }
            _ if self.state.is_menu() => self.handle_menu_event(event, now),
            InputEvent::Key(key) => match self.state {
                GameState::Galaxy => self.galaxy_key(key, now),
                GameState::System => self.system_key(key, now),
                GameState::Planet => self.planet_key(key, now),
                _ => {}
            },
            InputEvent::Click(point) => {
                self.pointer = Some(point);
                match self.state {
                    GameState::Galaxy => self.galaxy_click(point, now),
                    GameState::System => self.system_click(point, now),
                    GameState::Planet => self.planet_click(point, now),
                    _ => {}
                }
            }
            InputEvent::RightClick(point) => match self.state {
                GameState::Galaxy => self.galaxy_right_click(point, now),
                GameState::System => self.to_state(GameState::SystemMenu, now),
                _ => {}
            },
        }
    }

    fn handle_menu_event(&mut self, event: InputEvent, now: Instant) {
        let width = self.screen_width();
        let state = self.state;
        let Some(menu) = self.active_menu_mut() else {
            return;
        };
        let action = match event {
            InputEvent::Key(GameKey::Esc) if state != GameState::StartupMenu => Some(MenuAction::Resume),
            InputEvent::Key(key) => menu.handle_key(key),
            InputEvent::Click(point) => menu.handle_click(point, width),
            _ => None,
        };
        if let Some(action) = action {
            self.perform(action, now);
        }
    }

    fn update_hover(&mut self, point: Point) {
        match self.state {
            GameState::Galaxy => self.hovered_system = self.system_at(point),
            GameState::System => self.hovered_planet = self.planet_at(point),
            _ => {}
        }
    }

    fn system_at(&self, point: Point) -> Option<usize> {
        let slop = self.pick_slop;
        find_hovered(point, &self.galaxy.systems, Some(self.galaxy_area()), |p, system| {
            system.rect().inflate(slop, slop).contains(p)
        })
    }

    fn planet_at(&self, point: Point) -> Option<usize> {
        let system = self.selected_system()?;
        let layout = self.orbit_layout(system);
        let slop = self.pick_slop as f64;
        find_hovered(point, &system.planets, Some(self.galaxy_area()), |p, planet| {
            is_within_circle(p, layout.planet_center(planet), planet.size as f64 + slop)
        })
    }

    fn cycle(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        })
    }

    fn galaxy_key(&mut self, key: GameKey, now: Instant) {
        let len = self.galaxy.len();
        match key {
            GameKey::Esc => {
                info!("Opening in-game menu");
                self.to_state(GameState::GalaxyMenu, now);
            }
            GameKey::Tab | GameKey::Right | GameKey::Down => {
                self.hovered_system = Self::cycle(self.hovered_system, len, true);
            }
            GameKey::BackTab | GameKey::Left | GameKey::Up => {
                self.hovered_system = Self::cycle(self.hovered_system, len, false);
            }
            GameKey::Enter => {
                if let Some(index) = self.hovered_system {
                    self.open_system(index, now);
                }
            }
            _ => {}
        }
    }

    fn system_key(&mut self, key: GameKey, now: Instant) {
        let len = self.selected_system().map_or(0, |s| s.planets.len());
        match key {
            GameKey::Esc => self.to_state(GameState::SystemMenu, now),
            GameKey::Backspace => self.go_to_galaxy_view(now),
            GameKey::Tab | GameKey::Right | GameKey::Down => {
                self.hovered_planet = Self::cycle(self.hovered_planet, len, true);
            }
            GameKey::BackTab | GameKey::Left | GameKey::Up => {
                self.hovered_planet = Self::cycle(self.hovered_planet, len, false);
            }
            GameKey::Enter => {
                if let Some(index) = self.hovered_planet {
                    self.open_planet(index, now);
                }
            }
            _ => {}
        }
    }

    fn planet_key(&mut self, key: GameKey, now: Instant) {
        if matches!(key, GameKey::Esc | GameKey::Backspace) {
            self.back_to_system(now);
        }
    }

    fn galaxy_click(&mut self, point: Point, now: Instant) {
        if let Some(index) = self.system_at(point) {
            self.hovered_system = Some(index);
            self.open_system(index, now);
        }
    }

    fn galaxy_right_click(&mut self, point: Point, now: Instant) {
        if !self.galaxy_area().contains(point) {
            return;
        }
        self.selected_system = None;
        self.selected_planet = None;
        self.to_state(GameState::GalaxyMenu, now);
    }

    fn system_click(&mut self, point: Point, now: Instant) {
        if let Some(index) = self.planet_at(point) {
            self.hovered_planet = Some(index);
            self.open_planet(index, now);
        }
    }

    fn planet_click(&mut self, point: Point, now: Instant) {
        if self.config.info_panel_bounds().contains(point) {
            return;
        }
        self.back_to_system(now);
    }

    // ---- per frame ----

    pub fn update(&mut self, now: Instant) {
        self.debug.clear();

        if self.state == GameState::Planet && self.selected_planet().is_none() {
            self.selected_planet = None;
            self.to_state(GameState::System, now);
        }
        if self.state.view() == GameState::System && self.selected_system().is_none() {
            warn!("System view without a selected system, returning to galaxy");
            self.selected_system = None;
            self.to_state(GameState::Galaxy, now);
        }

        self.maybe_autosave(now);
        self.notifications.expire(now);
        self.transition.update(now);
        self.collect_debug_info();
    }

    fn maybe_autosave(&mut self, now: Instant) {
        let interval = self.config.saves.autosave_interval_secs;
        if interval == 0 || self.state.is_menu() {
            return;
        }
        if now.saturating_duration_since(self.last_save) < Duration::from_secs(interval) {
            return;
        }
        self.last_save = now;
        let selected = self.selected_system().map(|s| s.name.as_str());
        match self.store.save(&self.galaxy, selected) {
            Ok(path) => {
                info!("Autosaved to {}", path.display());
                self.notifications.show("Game Autosaved", now);
                self.startup_menu.set_enabled(MenuAction::LoadGame, true);
            }
            Err(e) => error!("Autosave failed: {}", e),
        }
    }

    fn collect_debug_info(&mut self) {
        if !self.debug.enabled() {
            return;
        }
        self.debug.add(format!("State: {:?}", self.state));
        self.debug.add(format!("Systems: {}", self.galaxy.len()));
        if let Some(p) = self.pointer {
            self.debug.add(format!("Mouse: ({}, {})", p.x, p.y));
        }
        let hovering = match self.state {
            GameState::Galaxy => self.hovered_system().map(|s| s.name.clone()),
            GameState::System => self
                .selected_system()
                .zip(self.hovered_planet)
                .and_then(|(s, i)| s.planets.get(i))
                .map(|p| p.name.clone()),
            _ => None,
        };
        if let Some(name) = hovering {
            self.debug.add(format!("Hovering: {}", name));
        }
    }
}
