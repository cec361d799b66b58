//! Help overlay: scrollable keybinding table.
//!
//! Lists the live bindings, so config overrides show up here too.

use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Sections in display order.
const SECTIONS: [(Context, &str); 2] =
    [(Context::Global, "General"), (Context::Input, "Link field")];

/// Rows above the table body: two borders and the column header.
const CHROME_ROWS: u16 = 3;

/// One line of the help table.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HelpLine {
    Section(&'static str),
    Binding { key: String, description: &'static str },
    Blank,
}

/// Group bindings by section, with a blank line between sections.
fn help_lines(bindings: &[(Context, String, Action, &'static str)]) -> Vec<HelpLine> {
    let mut lines = Vec::new();
    for (ctx, label) in SECTIONS {
        let mut section = bindings.iter().filter(|(c, ..)| *c == ctx).peekable();
        if section.peek().is_none() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(HelpLine::Blank);
        }
        lines.push(HelpLine::Section(label));
        lines.extend(section.map(|(_, key, _, description)| HelpLine::Binding {
            key: key.clone(),
            description: *description,
        }));
    }
    lines
}

/// Clamp the scroll offset. Returns `(scroll, max_scroll)`.
fn clamp_scroll(total: usize, visible: usize, offset: usize) -> (usize, usize) {
    let max_scroll = total.saturating_sub(visible);
    (offset.min(max_scroll), max_scroll)
}

fn visible_rows(overlay: Rect) -> usize {
    overlay.height.saturating_sub(CHROME_ROWS) as usize
}

/// Largest useful scroll offset for the app's current viewport.
pub(super) fn max_scroll(app: &App) -> usize {
    let total = help_lines(&app.keybindings.all_bindings()).len();
    let visible = visible_rows(centered_rect(80, 80, app.viewport));
    clamp_scroll(total, visible, 0).1
}

/// Render the help overlay on top of the card.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    let lines = help_lines(&app.keybindings.all_bindings());
    let visible = visible_rows(overlay);
    let (scroll, max_scroll) = clamp_scroll(lines.len(), visible, app.help_scroll_offset);

    let rows: Vec<Row> = lines
        .into_iter()
        .skip(scroll)
        .take(visible)
        .map(|line| match line {
            HelpLine::Section(label) => Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", label),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.style("help_heading")),
            HelpLine::Binding { key, description } => {
                Row::new(vec![format!("  {}", key), description.to_string()])
            }
            HelpLine::Blank => Row::new(vec![String::new(), String::new()]),
        })
        .collect();

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) ", scroll + 1, max_scroll + 1)
    } else {
        " Help (Esc to close) ".to_string()
    };

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("card_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        )
        .style(app.style("input_text"));

    f.render_widget(Clear, overlay);
    f.render_widget(table, overlay);

    if scroll < max_scroll {
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(
            Paragraph::new(Span::styled(
                " j/k to scroll, Esc to close ",
                app.style("footer"),
            )),
            hint_area,
        );
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
