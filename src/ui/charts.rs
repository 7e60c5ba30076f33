//! Chart view rendering
//!
//! Terminal renditions of the original tracker's charts: per-owner progress
//! as a percentage bar chart, plus status and priority distributions.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::metrics;
use crate::store::PlanStore;
use crate::theme::{priority_color, status_color, Colors, Styles};

const BAR_WIDTH: u16 = 9;

pub fn render_charts(f: &mut Frame, store: &PlanStore, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_owner_progress(f, store, chunks[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_status_distribution(f, store, bottom[0]);
    render_priority_distribution(f, store, bottom[1]);
}

/// Percentage of completed actions per owner.
fn render_owner_progress(f: &mut Frame, store: &PlanStore, area: Rect) {
    let progress = metrics::progress_by_owner(store.rows());
    let block = Block::default()
        .title(" Progress by owner (% done) ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(false));

    if progress.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(Line::from("No rows yet")).style(Styles::muted()),
            inner,
        );
        return;
    }

    let bars: Vec<Bar> = progress
        .iter()
        .map(|owner| {
            Bar::default()
                .value(u64::from(owner.percent))
                .label(Line::from(truncate(&owner.name, BAR_WIDTH as usize)))
                .text_value(format!("{}%", owner.percent))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(2)
        .max(100)
        .bar_style(Style::default().fg(Colors::ACCENT))
        .value_style(Styles::value());
    f.render_widget(chart, area);
}

/// Count of actions per status, zero counts omitted.
fn render_status_distribution(f: &mut Frame, store: &PlanStore, area: Rect) {
    let counts = metrics::counts_by_status(store.rows());
    let bars: Vec<Bar> = counts
        .iter()
        .map(|(status, count)| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(truncate(&status.to_string(), BAR_WIDTH as usize)))
                .style(Style::default().fg(status_color(*status)))
        })
        .collect();
    render_count_chart(f, " Actions by status ", bars, area);
}

/// Count of actions per priority, zero counts omitted.
fn render_priority_distribution(f: &mut Frame, store: &PlanStore, area: Rect) {
    let counts = metrics::counts_by_priority(store.rows());
    let bars: Vec<Bar> = counts
        .iter()
        .map(|(priority, count)| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(priority.to_string()))
                .style(Style::default().fg(priority_color(*priority)))
        })
        .collect();
    render_count_chart(f, " Actions by priority ", bars, area);
}

fn render_count_chart(f: &mut Frame, title: &str, bars: Vec<Bar>, area: Rect) {
    let block = Block::default()
        .title(title.to_string())
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(false));

    if bars.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new(Line::from("No rows yet")).style(Styles::muted()),
            inner,
        );
        return;
    }

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(2)
        .value_style(Styles::value());
    f.render_widget(chart, area);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
