//! Action table rendering

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row as TableRow, Table, TableState},
    Frame,
};

use crate::app::{AppState, Pane, COLUMNS};
use crate::store::PlanStore;
use crate::theme::{priority_color, status_color, Styles};

/// Render the filtered action table with the selected cell highlighted.
pub fn render_action_table(f: &mut Frame, state: &mut AppState, store: &PlanStore, area: Rect) {
    let focused = state.pane == Pane::Table;
    let visible = state.filter.apply(store.rows());
    state.clamp_row_selection(visible.len());

    let title = if state.filter.is_empty() {
        format!(" Actions ({}) ", visible.len())
    } else {
        format!(" Actions ({} of {}) ", visible.len(), store.rows().len())
    };

    let header_cells: Vec<Cell> = std::iter::once(Cell::from("#"))
        .chain(COLUMNS.iter().map(|c| {
            let style = if focused && state.column() == *c {
                Styles::title()
            } else {
                Styles::label()
            };
            Cell::from(Span::styled(c.title(), style))
        }))
        .collect();

    let rows: Vec<TableRow> = visible
        .iter()
        .map(|row| {
            let cells = vec![
                Cell::from(row.number.to_string()).style(Styles::label()),
                text_cell(&row.action),
                text_cell(&row.owner),
                text_cell(&row.deadline),
                Cell::from(row.priority.to_string())
                    .style(Style::default().fg(priority_color(row.priority))),
                Cell::from(format!("{} {}", row.status.marker(), row.status))
                    .style(Style::default().fg(status_color(row.status))),
                text_cell(&row.notes),
            ];
            TableRow::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Length(3),      // #
        Constraint::Percentage(30), // Action
        Constraint::Percentage(14), // Owner
        Constraint::Length(12),     // Deadline
        Constraint::Length(8),      // Priority
        Constraint::Length(14),     // Status
        Constraint::Percentage(24), // Notes
    ];

    let table = Table::new(rows, widths)
        .header(TableRow::new(header_cells).bottom_margin(1))
        .block(
            Block::default()
                .title(title)
                .title_style(Styles::title())
                .borders(Borders::ALL)
                .border_style(Styles::border(focused)),
        )
        .row_highlight_style(Styles::selected())
        .highlight_symbol("▸ ");

    let mut table_state = TableState::default();
    if focused && !visible.is_empty() {
        table_state.select(Some(state.row_selection));
    }
    f.render_stateful_widget(table, area, &mut table_state);
}

fn text_cell(value: &str) -> Cell<'_> {
    if value.is_empty() {
        Cell::from(Span::styled("—", Styles::muted()))
    } else {
        Cell::from(value)
    }
}
