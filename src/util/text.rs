use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculates the display width of a string in terminal columns.
///
/// ```
/// use linklux::util::display_width;
///
/// assert_eq!(display_width("linklux.io"), 10);
/// assert_eq!(display_width("你好"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncates a string to fit within `max_width` columns, appending "..." when cut.
///
/// Widths of 3 or fewer columns get as many characters as fit, without an ellipsis.
/// Returns `Cow::Borrowed` when the string already fits.
///
/// ```
/// use linklux::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("https://linklux.io/abc123", 14), "https://lin...");
/// assert_eq!(truncate_to_width("short", 10), "short");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(take_columns(s, max_width).to_string());
    }
    let head = take_columns(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", head, ELLIPSIS))
}

/// Longest prefix of `s` whose display width is at most `max_width`.
fn take_columns(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_width {
            return &s[..idx];
        }
        width += w;
    }
    s
}

/// Longest suffix of `s` whose display width is at most `max_width`.
fn take_columns_from_end(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, c) in s.char_indices().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_width {
            return &s[idx + c.len_utf8()..];
        }
        width += w;
    }
    s
}

/// Visible slice of a single-line input field and the cursor column inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputWindow<'a> {
    pub text: &'a str,
    pub cursor_col: usize,
}

/// Computes which part of `s` to show in a field `width` columns wide so the
/// cursor (a byte offset on a char boundary) stays visible.
///
/// When the text before the cursor fits, the field shows the text from the start;
/// otherwise it scrolls so the cursor sits in the last column.
pub fn input_window(s: &str, cursor: usize, width: usize) -> InputWindow<'_> {
    if width == 0 {
        return InputWindow {
            text: "",
            cursor_col: 0,
        };
    }
    let cursor = cursor.min(s.len());
    let before = &s[..cursor];
    let before_width = display_width(before);

    // One column is reserved for the cursor block itself.
    if before_width < width {
        let text = take_columns(s, width);
        return InputWindow {
            text,
            cursor_col: before_width,
        };
    }

    let tail = take_columns_from_end(before, width - 1);
    let start = cursor - tail.len();
    let text = take_columns(&s[start..], width);
    InputWindow {
        text,
        cursor_col: display_width(tail),
    }
}

/// Strips characters that cannot be part of a single-line link field.
///
/// Pasted text may carry line breaks, tabs, or terminal escape bytes; all C0
/// controls and DEL are removed. Returns `Cow::Borrowed` when nothing changes.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !c.is_control()).collect())
}
