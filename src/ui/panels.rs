//! Header, goal, and pacing panel rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::{AppState, Pane, HEADER_FIELDS};
use crate::metrics::GoalPacing;
use crate::store::PlanStore;
use crate::theme::{status_color, Colors, Styles};

/// Header panel: project identification fields plus the completion gauge.
pub fn render_header_panel(
    f: &mut Frame,
    state: &AppState,
    store: &PlanStore,
    completion: u8,
    area: Rect,
) {
    let focused = state.pane == Pane::Header;
    let block = Block::default()
        .title(" Action Plan ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let header = store.header();
    let mut lines = Vec::new();
    for (index, slot) in HEADER_FIELDS.iter().enumerate() {
        let selected = focused && state.header_selection == index;
        let value = match slot {
            crate::app::HeaderFieldSlot::Text(field) => {
                let v = header.field(*field);
                if v.is_empty() { "—".to_string() } else { v.to_string() }
            }
            crate::app::HeaderFieldSlot::Status => header.status.to_string(),
        };
        let value_style = match slot {
            crate::app::HeaderFieldSlot::Status => Style::default().fg(status_color(header.status)),
            _ if selected => Styles::selected(),
            _ => Styles::value(),
        };
        let marker = if selected { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Styles::value()),
            Span::styled(format!("{:<15}", slot.label()), Styles::label()),
            Span::styled(value, value_style),
        ]));
    }
    f.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().title("Completion").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Colors::ACCENT))
        .percent(u16::from(completion))
        .label(format!("{completion}% done"));
    f.render_widget(gauge, chunks[1]);
}

/// Goal panel (target/date), pacing verdict, and schedule numbers.
pub fn render_goal_panels(
    f: &mut Frame,
    state: &AppState,
    store: &PlanStore,
    completion: u8,
    pacing: &GoalPacing,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    render_goal_inputs(f, state, store, chunks[0]);
    render_pacing_verdict(f, completion, pacing, chunks[1]);
    render_pacing_schedule(f, pacing, chunks[2]);
}

fn render_goal_inputs(f: &mut Frame, state: &AppState, store: &PlanStore, area: Rect) {
    let focused = state.pane == Pane::Goal;
    let block = Block::default()
        .title(" Project Goal ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let goal = store.goal();
    let values = [
        format!("{}%", goal.target_percent),
        if goal.target_date.is_empty() {
            "—".to_string()
        } else {
            goal.target_date.clone()
        },
    ];
    let mut lines = Vec::new();
    for (index, slot) in crate::app::GOAL_SLOTS.iter().enumerate() {
        let selected = focused && state.goal_selection == index;
        let marker = if selected { "▸ " } else { "  " };
        let value_style = if selected { Styles::selected() } else { Styles::value() };
        lines.push(Line::from(vec![
            Span::styled(marker, Styles::value()),
            Span::styled(format!("{:<13}", slot.label()), Styles::label()),
            Span::styled(values[index].clone(), value_style),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_pacing_verdict(f: &mut Frame, completion: u8, pacing: &GoalPacing, area: Rect) {
    let block = Block::default()
        .title(" Pace ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = match &pacing.window {
        Some(window) => {
            let (verdict, style) = if window.on_pace {
                ("On pace", Styles::success())
            } else {
                ("Behind pace", Styles::danger())
            };
            vec![
                Line::from(Span::styled(verdict, style)),
                Line::from(vec![
                    Span::styled("Expected today: ", Styles::label()),
                    Span::styled(format!("{}%", window.expected_today), Styles::value()),
                ]),
                Line::from(vec![
                    Span::styled("Actual: ", Styles::label()),
                    Span::styled(format!("{completion}%"), Styles::value()),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Define start and target date",
            Styles::muted(),
        ))],
    };
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_pacing_schedule(f: &mut Frame, pacing: &GoalPacing, area: Rect) {
    let block = Block::default()
        .title(" Schedule ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = match &pacing.window {
        Some(window) => vec![
            Line::from(vec![
                Span::styled("Days remaining: ", Styles::label()),
                Span::styled(window.days_remaining.to_string(), Styles::value()),
            ]),
            Line::from(vec![
                Span::styled("Days elapsed: ", Styles::label()),
                Span::styled(
                    format!("{} of {}", window.days_elapsed, window.total_days),
                    Styles::value(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Required rate: ", Styles::label()),
                Span::styled(
                    format!("{:.1}%/day to reach {}%", window.required_daily_rate, pacing.target),
                    Styles::value(),
                ),
            ]),
        ],
        None => vec![Line::from(Span::styled("—", Styles::muted()))],
    };
    f.render_widget(Paragraph::new(lines), inner);
}
