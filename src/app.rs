//! Terminal front end: owns the crossterm session and drives the game loop.

use std::error::Error;
use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, error, info};
use ratatui::prelude::*;

use crate::config::GameConfig;
use crate::game::Game;
use crate::input::{GameKey, InputEvent};
use crate::layout::Viewport;
use crate::views;

type Term = Terminal<CrosstermBackend<Stdout>>;

fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')) {
        return Some(InputEvent::Quit);
    }
    let key = match key.code {
        KeyCode::Up => GameKey::Up,
        KeyCode::Down => GameKey::Down,
        KeyCode::Left => GameKey::Left,
        KeyCode::Right => GameKey::Right,
        KeyCode::Tab => GameKey::Tab,
        KeyCode::BackTab => GameKey::BackTab,
        KeyCode::Enter => GameKey::Enter,
        KeyCode::Esc => GameKey::Esc,
        KeyCode::Backspace => GameKey::Backspace,
        KeyCode::F(4) => GameKey::F4,
        KeyCode::F(5) => GameKey::F5,
        KeyCode::Char(c) => GameKey::Char(c),
        _ => return None,
    };
    Some(InputEvent::Key(key))
}

fn map_mouse(mouse: MouseEvent, viewport: &Viewport) -> Option<InputEvent> {
    let point = viewport.to_logical(mouse.column, mouse.row)?;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click(point)),
        MouseEventKind::Down(MouseButton::Right) => Some(InputEvent::RightClick(point)),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(InputEvent::MouseMove(point)),
        _ => None,
    }
}

/// Translate a terminal event into a game event, using the last frame's viewport for mouse cells.
pub fn map_event(event: Event, viewport: &Viewport) -> Option<InputEvent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, viewport),
        _ => None,
    }
}

fn game_loop(terminal: &mut Term, game: &mut Game) -> Result<(), Box<dyn Error>> {
    let frame_budget = Duration::from_secs_f64(1.0 / game.config().display.fps.max(1) as f64);
    let mut viewport = Viewport::new(Rect::default(), 1, 1);

    while game.is_running() {
        let frame_start = Instant::now();
        terminal.draw(|f| viewport = views::draw(f, game, frame_start))?;
        game.set_pick_slop(viewport.pick_slop());

        let timeout = frame_budget.saturating_sub(frame_start.elapsed());
        if event::poll(timeout)? {
            loop {
                if let Some(input) = map_event(event::read()?, &viewport) {
                    game.handle_event(input, Instant::now());
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        game.update(Instant::now());
    }
    Ok(())
}

/// Runs its closure when dropped, including while a panic unwinds.
struct OnDrop<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture, cursor::Show)
}

/// Run the game in the current terminal until the player quits.
///
/// The terminal is restored on every exit path once raw mode is on.
pub fn run(config: GameConfig) -> Result<(), Box<dyn Error>> {
    terminal::enable_raw_mode()?;
    let _restore = OnDrop(Some(|| {
        if let Err(e) = restore_terminal() {
            error!("Failed to restore terminal: {}", e);
        }
        debug!("Terminal restored");
    }));
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut game = Game::new(config, Instant::now());
    info!("Game initialized successfully");

    game_loop(&mut terminal, &mut game)
}
