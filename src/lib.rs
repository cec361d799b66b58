//! LinkLux: a terminal front end that simulates a premium URL shortener.
//!
//! The shortening flow is a pure state machine ([`flow::Flow`]) whose effects
//! are carried out by [`app::App`] against injectable timer, clipboard and
//! short-code capabilities. The [`ui`] module draws it with ratatui.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod flow;
pub mod keybindings;
pub mod logging;
pub mod notify;
pub mod shortcode;
pub mod theme;
pub mod timer;
pub mod ui;
pub mod util;
