//! Terminal front end: event mapping, keypad, and rendering.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::TuiApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{ButtonAction, Keypad, KeypadButton, KeypadWidget};
pub use ui::{layout, render, Areas, HELP_SHORTCUTS};
