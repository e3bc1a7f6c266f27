//! Terminal-independent input events.

use crate::galaxy::Point;

/// Keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKey {
    Up,
    Down,
    Left,
    Right,
    Tab,
    BackTab,
    Enter,
    Esc,
    Backspace,
    F4,
    F5,
    Char(char),
}

/// One input event, with pointer positions already in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(GameKey),
    Click(Point),
    RightClick(Point),
    MouseMove(Point),
    Quit,
}
