//! Render functions for the TUI.
//!
//! Draws the centered shortener card, the toast stack and any overlay.

use crate::app::{App, Focus};
use crate::notify::{Severity, Toast};
use crate::util::{input_window, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 18;

/// Widest the card grows on large terminals.
const CARD_WIDTH: u16 = 72;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(super) const PLACEHOLDER: &str = "https://your-long-url.com/very/long/path";

/// Main render function.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_card(f, app, chunks[0]);
    status::render(f, app, chunks[1]);
    render_toasts(f, app, chunks[0]);

    if app.show_help {
        help::render(f, app);
    }
}

/// Header, link field, primary control, result panel and footer.
fn render_card(f: &mut Frame, app: &App, area: Rect) {
    let width = CARD_WIDTH.min(area.width.saturating_sub(2));
    let card = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y,
        width,
        area.height,
    );

    let result_height = if app.flow.link().is_some() { 4 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(result_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(card);

    f.render_widget(
        Paragraph::new("LinkLux")
            .style(app.style("brand_title"))
            .alignment(Alignment::Center),
        rows[1],
    );
    f.render_widget(
        Paragraph::new("Premium link shortening, reimagined")
            .style(app.style("brand_tagline"))
            .alignment(Alignment::Center),
        rows[2],
    );

    render_input(f, app, rows[4]);
    render_button(f, app, rows[5]);
    if result_height > 0 {
        render_result(f, app, rows[7]);
    }

    f.render_widget(
        Paragraph::new("Crafted with precision for the modern web")
            .style(app.style("footer"))
            .alignment(Alignment::Center),
        rows[9],
    );
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input && app.input_enabled();
    let border = if focused {
        app.style("card_border_focused")
    } else {
        app.style("card_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(" Enter your link ", app.style("input_label")));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.input.is_empty() {
        f.render_widget(
            Paragraph::new(truncate_to_width(PLACEHOLDER, inner.width as usize))
                .style(app.style("input_placeholder")),
            inner,
        );
        if focused && !app.show_help {
            f.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let window = input_window(app.input.text(), app.input.cursor(), inner.width as usize);
    let style = if app.input_enabled() {
        app.style("input_text")
    } else {
        app.style("input_disabled")
    };
    f.render_widget(Paragraph::new(window.text).style(style), inner);

    if focused && !app.show_help {
        f.set_cursor_position((inner.x + window.cursor_col as u16, inner.y));
    }
}

fn render_button(f: &mut Frame, app: &App, area: Rect) {
    let (label, style) = if app.flow.is_loading() {
        let frame = SPINNER[app.spinner_frame % SPINNER.len()];
        (
            format!(" {} Creating your premium link... ", frame),
            app.style("button_busy"),
        )
    } else if app.focus == Focus::Input {
        (" Shorten Link ".to_string(), app.style("button_focused"))
    } else {
        (" Shorten Link ".to_string(), app.style("button"))
    };

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center),
        area,
    );
}

fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let Some(link) = app.flow.link() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("card_border"))
        .title(Span::styled(
            " Your premium short link ",
            app.style("result_heading"),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let url = link.url();
    let link_line = Line::from(Span::styled(
        truncate_to_width(&url, inner.width as usize).into_owned(),
        app.style("result_link"),
    ));

    let copy_label = if app.flow.is_copied() {
        "[ ✓ Copied ]"
    } else {
        "[ Copy ]"
    };
    let copy_style = if app.flow.is_copied() {
        app.style("copy_done")
    } else {
        app.style("copy_idle")
    };
    let controls = Line::from(vec![
        Span::styled(copy_label, focus_style(copy_style, app.focus == Focus::Copy)),
        Span::raw("  "),
        Span::styled(
            "[ Shorten another link ]",
            focus_style(
                app.style("secondary_action"),
                app.focus == Focus::Another,
            ),
        ),
    ]);

    f.render_widget(Paragraph::new(vec![link_line, controls]), inner);
}

fn focus_style(base: Style, focused: bool) -> Style {
    if focused {
        base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        base
    }
}

/// Toasts stack upward from the bottom-right corner, newest lowest.
fn render_toasts(f: &mut Frame, app: &App, area: Rect) {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    if width < 12 {
        return;
    }
    let x = area.x + area.width.saturating_sub(width + 1);
    // Keep the footer row visible
    let bottom = area.y + area.height.saturating_sub(1);

    let toasts: Vec<&Toast> = app.toasts.visible().collect();
    for (i, toast) in toasts.into_iter().rev().enumerate() {
        let offset = (i as u16 + 1) * TOAST_HEIGHT;
        if offset > bottom.saturating_sub(area.y) {
            break;
        }
        render_toast(f, app, toast, Rect::new(x, bottom - offset, width, TOAST_HEIGHT));
    }
}

fn render_toast(f: &mut Frame, app: &App, toast: &Toast, area: Rect) {
    let style = match toast.notice.severity {
        Severity::Normal => app.style("toast_normal"),
        Severity::Destructive => app.style("toast_destructive"),
    };
    let inner_width = area.width.saturating_sub(2) as usize;

    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            truncate_to_width(&toast.notice.title, inner_width).into_owned(),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(truncate_to_width(&toast.notice.description, inner_width).into_owned()),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(style))
    .style(style);
    f.render_widget(paragraph, area);
}
