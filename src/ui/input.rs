//! Input handling for the TUI.
//!
//! Keys resolve through the keybinding registry first; unbound printable
//! characters go to the link field when it has focus.

use crate::app::{App, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers};

use super::{help, Action};

fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Input => KbContext::Input,
        Focus::Copy | Focus::Another => KbContext::Global,
    }
}

/// Main key dispatch function.
pub fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    app.needs_redraw = true;

    // Help overlay captures all keys when visible
    if app.show_help {
        return handle_help_input(app, code, modifiers);
    }

    let context = focus_to_context(app.focus);
    match app.keybindings.action_for_key(code, modifiers, context) {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::Activate) => app.activate(),
        Some(KbAction::Copy) => app.copy(),
        Some(KbAction::ShortenAnother) => app.shorten_another(),
        Some(KbAction::FocusNext) => app.focus_next(),
        Some(KbAction::FocusPrev) => app.focus_prev(),
        Some(KbAction::Dismiss) => app.dismiss(),
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            tracing::debug!(theme = name, "Theme changed");
        }
        Some(KbAction::CursorLeft) => app.edit_input(|input| input.left()),
        Some(KbAction::CursorRight) => app.edit_input(|input| input.right()),
        Some(KbAction::CursorHome) => app.edit_input(|input| input.home()),
        Some(KbAction::CursorEnd) => app.edit_input(|input| input.end()),
        Some(KbAction::DeleteBack) => app.edit_input(|input| {
            input.backspace();
        }),
        Some(KbAction::DeleteForward) => app.edit_input(|input| {
            input.delete();
        }),
        Some(KbAction::ClearInput) => app.edit_input(|input| input.clear()),
        None => handle_unbound(app, code, modifiers),
    }

    Action::Continue
}

/// Printable characters land in the link field when it has focus.
fn handle_unbound(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    let KeyCode::Char(c) = code else {
        return;
    };
    if app.focus != Focus::Input {
        return;
    }
    if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT {
        app.edit_input(|input| {
            input.insert_char(c);
        });
    }
}

/// Bracketed paste goes to the link field regardless of focus.
pub fn handle_paste(app: &mut App, text: &str) {
    if !app.input_enabled() {
        tracing::debug!("Ignoring paste while shortening");
        return;
    }
    app.focus = Focus::Input;
    app.edit_input(|input| {
        if !input.insert_str(text) {
            tracing::debug!(len = text.len(), "Paste dropped: nothing fits");
        }
    });
}

/// Handle input while the help overlay is visible.
fn handle_help_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app.keybindings.action_for_key(code, modifiers, KbContext::Global) {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::Dismiss | KbAction::ShowHelp) => {
            app.dismiss();
            return Action::Continue;
        }
        _ => {}
    }

    match code {
        KeyCode::Char('q') if modifiers == KeyModifiers::NONE => app.dismiss(),
        KeyCode::Char('j') | KeyCode::Down => {
            let max = help::max_scroll(app);
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1).min(max);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}
