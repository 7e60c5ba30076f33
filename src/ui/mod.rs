//! User interface rendering module
//!
//! Organized into submodules:
//! - `panels` - header, goal, and pacing panel rendering
//! - `table` - the action table
//! - `charts` - per-owner progress and distribution charts
//! - `dialogs` - inline edit prompt and confirmation dialog

mod charts;
mod dialogs;
mod panels;
mod table;

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppMode, AppState};
use crate::metrics;
use crate::store::PlanStore;
use crate::theme::{Colors, Styles};

/// Render the complete UI based on application state.
pub fn render(f: &mut Frame, state: &mut AppState, store: &PlanStore) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Main content area
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Navigation bar
        ])
        .split(f.area());

    let content_area = main_chunks[0];
    let status_area = main_chunks[1];
    let nav_area = main_chunks[2];

    match state.mode {
        AppMode::Charts => charts::render_charts(f, store, content_area),
        _ => render_plan_view(f, state, store, content_area),
    }

    render_status_line(f, state, status_area);
    render_nav_bar(f, state, nav_area);

    if state.mode == AppMode::Editing {
        dialogs::render_edit_prompt(f, state);
    }
    if state.mode == AppMode::ConfirmDialog {
        dialogs::render_confirm_dialog(f, state);
    }
    if state.help_visible {
        dialogs::render_help_overlay(f);
    }
}

/// The main plan view: header panel, goal/pacing panels, action table.
fn render_plan_view(f: &mut Frame, state: &mut AppState, store: &PlanStore, area: Rect) {
    let today = Local::now().date_naive();
    let completion = metrics::completion_percent(store.rows());
    let pacing = metrics::goal_pacing(store.header(), store.goal(), completion, today);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Header panel
            Constraint::Length(7), // Goal + pacing panels
            Constraint::Min(5),    // Action table
        ])
        .split(area);

    panels::render_header_panel(f, state, store, completion, chunks[0]);
    panels::render_goal_panels(f, state, store, completion, &pacing, chunks[1]);
    table::render_action_table(f, state, store, chunks[2]);
}

fn render_status_line(f: &mut Frame, state: &AppState, area: Rect) {
    let mut parts = vec![state.status_message.clone()];
    if !state.filter.is_empty() {
        let mut active = Vec::new();
        if let Some(status) = state.filter.status {
            active.push(format!("status={status}"));
        }
        if let Some(ref owner) = state.filter.owner {
            active.push(format!("owner={owner}"));
        }
        if !state.filter.search.is_empty() {
            active.push(format!("search=\"{}\"", state.filter.search));
        }
        parts.push(format!("[filter: {}]", active.join(", ")));
    }
    let line = Paragraph::new(Line::from(parts.join("  "))).style(Styles::label());
    f.render_widget(line, area);
}

fn render_nav_bar(f: &mut Frame, state: &AppState, area: Rect) {
    let hints = match state.mode {
        AppMode::Charts => "v/Esc back | q quit | ? help",
        AppMode::Editing => "Enter save | Esc cancel",
        AppMode::ConfirmDialog => "←/→ select | Enter apply | y confirm | n/Esc cancel",
        AppMode::Plan => {
            "Tab pane | Enter edit | a add | d delete | s/o/c filters | / search | v charts | w export | r reset | q quit"
        }
    };
    let bar = Paragraph::new(Line::from(hints)).style(Style::default().fg(Colors::FG_MUTED));
    f.render_widget(bar, area);
}

/// Centered rectangle helper for dialogs and overlays.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
