//! Dialog and overlay rendering

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, EditTarget};
use crate::theme::{Colors, Styles};
use crate::ui::centered_rect;

/// Inline edit prompt rendered over the plan view.
pub fn render_edit_prompt(f: &mut Frame, state: &AppState) {
    let Some(edit) = state.edit.as_ref() else {
        return;
    };

    let title = match &edit.target {
        EditTarget::Header(field) => format!(" Edit header: {:?} ", field),
        EditTarget::Row { field, .. } => format!(" Edit row: {:?} ", field),
        EditTarget::GoalTarget => " Edit goal target (%) ".to_string(),
        EditTarget::GoalDate => " Edit goal date (YYYY-MM-DD) ".to_string(),
        EditTarget::Search => " Search actions ".to_string(),
    };

    let area = centered_rect(60, 3, f.area());
    f.render_widget(Clear, area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(edit.buffer.clone(), Styles::value()),
        Span::styled("█", Style::default().fg(Colors::ACCENT)),
    ]))
    .block(
        Block::default()
            .title(title)
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border(true)),
    );
    f.render_widget(input, area);
}

/// Confirmation dialog for destructive operations.
pub fn render_confirm_dialog(f: &mut Frame, state: &AppState) {
    let Some(dialog) = state.confirm_dialog.as_ref() else {
        return;
    };

    let area = centered_rect(56, 8, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .title_style(Styles::danger())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Colors::ERROR))
        .style(Style::default().bg(Colors::BG_DANGER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(dialog.message.clone())
        .style(Styles::value())
        .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[0]);

    let (cancel_style, confirm_style) = if dialog.confirm_selected {
        (Styles::label(), Styles::selected())
    } else {
        (Styles::selected(), Styles::label())
    };
    let buttons = Paragraph::new(Line::from(vec![
        Span::styled("  [ Cancel ]  ", cancel_style),
        Span::styled("  [ Confirm ]  ", confirm_style),
    ]));
    f.render_widget(buttons, chunks[1]);
}

/// Help overlay listing all keybindings.
pub fn render_help_overlay(f: &mut Frame) {
    let area = centered_rect(64, 18, f.area());
    f.render_widget(Clear, area);

    let entries = [
        ("Tab", "cycle focus: table / header / goal"),
        ("↑ ↓ ← →", "navigate rows, columns, and fields"),
        ("Enter / Space", "edit text field or cycle status/priority"),
        ("a", "add a new action row"),
        ("d", "remove the selected row (asks first)"),
        ("s", "cycle the status filter"),
        ("o", "cycle the owner filter"),
        ("/", "search action, owner, and notes text"),
        ("c", "clear all filters"),
        ("v", "toggle chart view"),
        ("w", "export the plan to a JSON file"),
        ("r", "clear the whole plan (asks first)"),
        ("q", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, description) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<14}"), Styles::title()),
            Span::styled(description, Styles::value()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Styles::muted(),
    )));

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keybindings ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(Styles::border(true)),
    );
    f.render_widget(help, area);
}
