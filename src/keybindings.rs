//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Plain printable characters are never bound by default. They belong to the
//! link field, so every default binding uses a named key or a modifier.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Activate,
    Copy,
    ShortenAnother,
    FocusNext,
    FocusPrev,
    Dismiss,
    ShowHelp,
    CycleTheme,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    DeleteBack,
    DeleteForward,
    ClearInput,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Activate => "Shorten link / activate focused control",
            Self::Copy => "Copy short link",
            Self::ShortenAnother => "Shorten another link",
            Self::FocusNext => "Next control",
            Self::FocusPrev => "Previous control",
            Self::Dismiss => "Dismiss notifications / close help",
            Self::ShowHelp => "Show help",
            Self::CycleTheme => "Cycle theme",
            Self::CursorLeft => "Cursor left",
            Self::CursorRight => "Cursor right",
            Self::CursorHome => "Cursor to start",
            Self::CursorEnd => "Cursor to end",
            Self::DeleteBack => "Delete before cursor",
            Self::DeleteForward => "Delete under cursor",
            Self::ClearInput => "Clear the link field",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Input,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Left", "Right", "Home", "End",
///   "Backspace", "Delete"
/// - Modifier combos: "Ctrl+y", "Alt+c"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    for (prefix, modifier) in [("Ctrl+", KeyModifiers::CONTROL), ("Alt+", KeyModifiers::ALT)] {
        if let Some(rest) = s.strip_prefix(prefix) {
            let mut chars = rest.trim().chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            return Some(KeySpec::new(KeyCode::Char(c.to_ascii_lowercase()), modifier));
        }
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "backtab" | "shift+tab" => return Some(KeySpec::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "home" => return Some(KeySpec::plain(KeyCode::Home)),
        "end" => return Some(KeySpec::plain(KeyCode::End)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "delete" | "del" => return Some(KeySpec::plain(KeyCode::Delete)),
        _ => {}
    }

    if let Some(n) = s.strip_prefix(['F', 'f']) {
        if let Ok(n) = n.parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::plain(KeyCode::Char(c))),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else if key.modifiers.contains(KeyModifiers::ALT) {
        "Alt+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// fall back to `Global`.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Context::{Global, Input};

        // === Global ===
        self.bind(Global, KeySpec::ctrl('c'), Action::Quit);
        self.bind(Global, KeySpec::ctrl('q'), Action::Quit);
        self.bind(Global, KeySpec::plain(KeyCode::Enter), Action::Activate);
        self.bind(Global, KeySpec::ctrl('y'), Action::Copy);
        self.bind(Global, KeySpec::ctrl('n'), Action::ShortenAnother);
        self.bind(Global, KeySpec::plain(KeyCode::Tab), Action::FocusNext);
        self.bind(
            Global,
            KeySpec::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Action::FocusPrev,
        );
        self.bind(Global, KeySpec::plain(KeyCode::Esc), Action::Dismiss);
        self.bind(Global, KeySpec::plain(KeyCode::F(1)), Action::ShowHelp);
        self.bind(Global, KeySpec::plain(KeyCode::F(2)), Action::CycleTheme);

        // === Link field ===
        self.bind(Input, KeySpec::plain(KeyCode::Left), Action::CursorLeft);
        self.bind(Input, KeySpec::plain(KeyCode::Right), Action::CursorRight);
        self.bind(Input, KeySpec::plain(KeyCode::Home), Action::CursorHome);
        self.bind(Input, KeySpec::ctrl('a'), Action::CursorHome);
        self.bind(Input, KeySpec::plain(KeyCode::End), Action::CursorEnd);
        self.bind(Input, KeySpec::ctrl('e'), Action::CursorEnd);
        self.bind(Input, KeySpec::plain(KeyCode::Backspace), Action::DeleteBack);
        self.bind(Input, KeySpec::plain(KeyCode::Delete), Action::DeleteForward);
        self.bind(Input, KeySpec::ctrl('u'), Action::ClearInput);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "copy").
    /// Values are key strings (e.g., "Ctrl+y", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if context != Context::Global {
            if let Some(&action) = self.lookup.get(&(Context::Global, key)) {
                return Some(action);
            }
        }

        None
    }

    /// All bindings for the help screen as (context, key display, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }

    /// First key bound to `action`, formatted for hints.
    pub fn key_label(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, _, a)| *a == action)
            .map(|(_, key, _)| format_key(key))
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "activate" | "submit" | "shorten" => Some(Action::Activate),
        "copy" => Some(Action::Copy),
        "shorten_another" | "shortenanother" | "reset" => Some(Action::ShortenAnother),
        "focus_next" | "focusnext" | "next" => Some(Action::FocusNext),
        "focus_prev" | "focusprev" | "prev" => Some(Action::FocusPrev),
        "dismiss" => Some(Action::Dismiss),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "cursor_left" | "cursorleft" => Some(Action::CursorLeft),
        "cursor_right" | "cursorright" => Some(Action::CursorRight),
        "cursor_home" | "cursorhome" | "home" => Some(Action::CursorHome),
        "cursor_end" | "cursorend" | "end" => Some(Action::CursorEnd),
        "delete_back" | "deleteback" | "backspace" => Some(Action::DeleteBack),
        "delete_forward" | "deleteforward" | "delete" => Some(Action::DeleteForward),
        "clear_input" | "clearinput" | "clear" => Some(Action::ClearInput),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quit_keys() {
        let reg = KeybindingRegistry::new();
        for c in ['c', 'q'] {
            assert_eq!(
                reg.action_for_key(KeyCode::Char(c), KeyModifiers::CONTROL, Context::Global),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn test_plain_chars_unbound() {
        let reg = KeybindingRegistry::new();
        for c in ['q', 'y', 'n', ':', '/', '?'] {
            assert_eq!(
                reg.action_for_key(KeyCode::Char(c), KeyModifiers::NONE, Context::Input),
                None,
                "'{}' must reach the link field",
                c
            );
        }
    }

    #[test]
    fn test_input_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Enter, KeyModifiers::NONE, Context::Input),
            Some(Action::Activate)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('y'), KeyModifiers::CONTROL, Context::Input),
            Some(Action::Copy)
        );
    }

    #[test]
    fn test_editing_keys_only_in_input() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Backspace, KeyModifiers::NONE, Context::Input),
            Some(Action::DeleteBack)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Backspace, KeyModifiers::NONE, Context::Global),
            None
        );
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("copy".to_string(), "F5".to_string());
        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());

        assert_eq!(
            reg.action_for_key(KeyCode::F(5), KeyModifiers::NONE, Context::Global),
            Some(Action::Copy)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('y'), KeyModifiers::CONTROL, Context::Global),
            None
        );
    }

    #[test]
    fn test_override_replaces_all_keys_for_action() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("cursor_home".to_string(), "Alt+h".to_string());
        reg.apply_overrides(&overrides);

        assert_eq!(
            reg.action_for_key(KeyCode::Char('h'), KeyModifiers::ALT, Context::Input),
            Some(Action::CursorHome)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Home, KeyModifiers::NONE, Context::Input),
            None
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('a'), KeyModifiers::CONTROL, Context::Input),
            None
        );
    }

    #[test]
    fn test_apply_overrides_unknown_action() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("launch_rocket".to_string(), "F9".to_string());
        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("launch_rocket"));
    }

    #[test]
    fn test_apply_overrides_bad_key() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Hyper+Space+Q".to_string());
        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        // Original binding untouched
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_parse_key_string_forms() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("F12"), Some(KeySpec::plain(KeyCode::F(12))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("Ctrl+Y"), Some(KeySpec::ctrl('y')));
        assert_eq!(
            parse_key_string("Alt+c"),
            Some(KeySpec::new(KeyCode::Char('c'), KeyModifiers::ALT))
        );
        assert_eq!(parse_key_string("x"), Some(KeySpec::plain(KeyCode::Char('x'))));
        assert_eq!(parse_key_string("xy"), None);
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::ctrl('y')), "Ctrl+y");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::F(1))), "F1");
        assert_eq!(
            format_key(&KeySpec::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            "Shift+Tab"
        );
    }

    #[test]
    fn test_key_label() {
        let reg = KeybindingRegistry::new();
        assert_eq!(reg.key_label(Action::Copy).as_deref(), Some("Ctrl+y"));
        assert_eq!(reg.key_label(Action::ShowHelp).as_deref(), Some("F1"));
    }

    #[test]
    fn test_every_action_described() {
        let reg = KeybindingRegistry::new();
        assert!(reg
            .all_bindings()
            .iter()
            .all(|(_, _, _, desc)| !desc.is_empty()));
    }
}
