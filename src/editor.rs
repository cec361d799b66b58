//! Single-line editor behind the link field.
//!
//! The cursor is a byte offset that always sits on a char boundary.
use crate::util::strip_control_chars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditor {
    text: String,
    cursor: usize,
    max_len: usize,
}

impl LineEditor {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            max_len,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert a character at the cursor. Control characters and input past
    /// the length cap are dropped. Returns true if the text changed.
    pub fn insert_char(&mut self, c: char) -> bool {
        if c.is_control() || self.text.len() + c.len_utf8() > self.max_len {
            return false;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Insert pasted text at the cursor, truncated to the length cap.
    /// Returns true if anything was inserted.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let clean = strip_control_chars(s);
        let room = self.max_len.saturating_sub(self.text.len());
        let mut end = 0;
        for (idx, c) in clean.char_indices() {
            if idx + c.len_utf8() > room {
                break;
            }
            end = idx + c.len_utf8();
        }
        if end == 0 {
            return false;
        }
        self.text.insert_str(self.cursor, &clean[..end]);
        self.cursor += end;
        true
    }

    pub fn backspace(&mut self) -> bool {
        match self.text[..self.cursor].chars().next_back() {
            Some(c) => {
                self.cursor -= c.len_utf8();
                self.text.remove(self.cursor);
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn left(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(s: &str) -> LineEditor {
        let mut e = LineEditor::new(64);
        assert!(e.insert_str(s));
        e
    }

    #[test]
    fn test_typing_appends() {
        let mut e = LineEditor::new(64);
        for c in "https://".chars() {
            e.insert_char(c);
        }
        assert_eq!(e.text(), "https://");
        assert_eq!(e.cursor(), 8);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut e = editor_with("https://exmple.com");
        e.home();
        for _ in 0.."https://ex".len() {
            e.right();
        }
        e.insert_char('a');
        assert_eq!(e.text(), "https://example.com");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut e = editor_with("abc");
        assert!(e.backspace());
        assert_eq!(e.text(), "ab");
        assert!(!e.delete()); // at end
        e.home();
        assert!(!e.backspace()); // at start
        assert!(e.delete());
        assert_eq!(e.text(), "b");
    }

    #[test]
    fn test_multibyte_cursor_moves() {
        let mut e = editor_with("https://例え.jp");
        e.end();
        e.left();
        e.left();
        e.left(); // before '.'
        assert!(e.backspace()); // removes 'え'
        assert_eq!(e.text(), "https://例.jp");
    }

    #[test]
    fn test_length_cap() {
        let mut e = LineEditor::new(5);
        assert!(e.insert_str("abcdefgh"));
        assert_eq!(e.text(), "abcde");
        assert!(!e.insert_char('x'));
        assert!(!e.insert_str("more"));
    }

    #[test]
    fn test_paste_strips_line_breaks() {
        let e = editor_with("https://example.com/\npath\r\n");
        assert_eq!(e.text(), "https://example.com/path");
    }

    #[test]
    fn test_control_char_ignored() {
        let mut e = LineEditor::new(8);
        assert!(!e.insert_char('\u{7}'));
        assert!(e.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut e = editor_with("https://example.com");
        e.clear();
        assert!(e.is_empty());
        assert_eq!(e.cursor(), 0);
    }
}
