use crate::app::{App, Focus};
use crate::keybindings::Action;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    let paragraph = Paragraph::new(hint_text(app)).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}

/// Key hints for the current state, using the live bindings.
pub(super) fn hint_text(app: &App) -> String {
    if app.flow.is_loading() {
        return format!(" Creating your premium link... | {} quit", key(app, Action::Quit));
    }

    let mut hints = Vec::new();
    match (app.flow.link().is_some(), app.focus) {
        (true, Focus::Copy) => hints.push(format!("{} copy", key(app, Action::Activate))),
        (true, Focus::Another) => {
            hints.push(format!("{} shorten another", key(app, Action::Activate)))
        }
        _ => hints.push(format!("{} shorten", key(app, Action::Activate))),
    }
    if app.flow.link().is_some() {
        hints.push(format!("{} copy", key(app, Action::Copy)));
        hints.push(format!("{} another", key(app, Action::ShortenAnother)));
        hints.push(format!("{} focus", key(app, Action::FocusNext)));
    }
    hints.push(format!("{} help", key(app, Action::ShowHelp)));
    hints.push(format!("{} quit", key(app, Action::Quit)));

    format!(" {}", hints.join(" | "))
}

fn key(app: &App, action: Action) -> String {
    app.keybindings
        .key_label(action)
        .unwrap_or_else(|| "-".to_string())
}
