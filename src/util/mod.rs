//! Utility functions for common operations.
//!
//! - **URL validation**: decides whether a typed link is missing, invalid, or usable
//! - **Text processing**: Unicode-aware width calculation, truncation, and input scrolling

mod text;
mod url_validator;

pub use text::{
    display_width, input_window, strip_control_chars, truncate_to_width, InputWindow,
};
pub use url_validator::{validate_input, InputError};

/// Maximum accepted length of the link input, in bytes.
pub const MAX_INPUT_LENGTH: usize = 2048;
