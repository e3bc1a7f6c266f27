//! Galaxy Conquest library
//!
//! Procedural galaxy generation, game state and terminal rendering, shared
//! by the binary and the tests.

pub mod app;
pub mod background;
pub mod cli;
pub mod config;
pub mod debug;
pub mod galaxy;
pub mod game;
pub mod hover;
pub mod input;
pub mod layout;
pub mod logging;
pub mod menu;
pub mod notifications;
pub mod persistence;
pub mod transitions;
pub mod views;
