//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and paste handling
//! - `render` - Card layout and toast overlay
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod help;
mod input;
mod loop_runner;
mod render;
mod status;

// Re-export the public API
pub use input::{handle_key, handle_paste};
pub use loop_runner::{run, Action};
pub use render::render;
