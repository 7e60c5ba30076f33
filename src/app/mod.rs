//! Application module
//!
//! Contains the main event loop, keyboard handling, and the glue between
//! presentation state and the plan store. Every user edit becomes a store
//! mutation; the store persists and the next draw recomputes all derived
//! metrics.

mod state;

pub use state::{
    AppMode, AppState, Column, EditState, EditTarget, GoalSlot, HeaderFieldSlot, Pane, COLUMNS,
    GOAL_SLOTS, HEADER_FIELDS,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;
use strum::IntoEnumIterator;

use crate::components::confirm_dialog::{ConfirmAction, ConfirmDialogState};
use crate::error::Result;
use crate::metrics;
use crate::plan::{parse_date, HeaderField, RowField};
use crate::store::PlanStore;
use crate::transfer;
use crate::types::Status;
use crate::ui;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Main application struct
pub struct App {
    pub state: AppState,
    store: PlanStore,
}

impl App {
    /// Create a new application instance around a loaded store.
    pub fn new(store: PlanStore) -> Self {
        info!("Creating new App instance");
        Self {
            state: AppState::default(),
            store,
        }
    }

    /// Read access to the store for rendering and tests.
    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    /// Run the main event loop until the user quits.
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| ui::render(f, &mut self.state, &self.store))?;

            if event::poll(EVENT_POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Ids of rows passing the active filter, in list order.
    fn visible_row_ids(&self) -> Vec<String> {
        self.state
            .filter
            .apply(self.store.rows())
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    /// Id of the row currently selected in the filtered view.
    fn selected_row_id(&self) -> Option<String> {
        self.visible_row_ids().get(self.state.row_selection).cloned()
    }

    /// Handle a key event. Returns `true` when the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.state.help_visible {
            self.state.help_visible = false;
            return false;
        }

        match self.state.mode {
            AppMode::Plan => self.handle_plan_key(key),
            AppMode::Charts => self.handle_charts_key(key),
            AppMode::Editing => {
                self.handle_editing_key(key);
                false
            }
            AppMode::ConfirmDialog => {
                self.handle_dialog_key(key);
                false
            }
        }
    }

    fn handle_plan_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') | KeyCode::F(1) => self.state.help_visible = true,
            KeyCode::Tab => {
                self.state.pane = self.state.pane.next();
                self.state.status_message = format!("Focus: {:?}", self.state.pane);
            }
            KeyCode::Char('v') => {
                self.state.mode = AppMode::Charts;
                self.state.status_message = "Charts (press v or Esc to return)".to_string();
            }
            KeyCode::Char('a') => {
                self.store.add_row();
                // Jump to the new row: clear filters so it is visible
                self.state.filter.clear();
                self.state.row_selection = self.store.rows().len().saturating_sub(1);
                self.state.pane = Pane::Table;
                self.state.status_message = format!("Added row #{}", self.store.rows().len());
            }
            KeyCode::Char('d') => self.request_remove_selected_row(),
            KeyCode::Char('r') => {
                self.state.pre_dialog_mode = Some(AppMode::Plan);
                self.state.confirm_dialog = Some(ConfirmDialogState::reset_plan());
                self.state.mode = AppMode::ConfirmDialog;
            }
            KeyCode::Char('w') => self.export_now(),
            KeyCode::Char('/') => self.begin_edit(
                EditTarget::Search,
                self.state.filter.search.clone(),
            ),
            KeyCode::Char('s') => self.cycle_status_filter(),
            KeyCode::Char('o') => self.cycle_owner_filter(),
            KeyCode::Char('c') => {
                self.state.filter.clear();
                self.state.status_message = "Filters cleared".to_string();
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.handle_navigation(key.code)
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selection(),
            _ => {}
        }
        false
    }

    fn handle_charts_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('v') | KeyCode::Esc => {
                self.state.mode = AppMode::Plan;
                self.state.status_message = "Plan view".to_string();
            }
            KeyCode::Char('?') | KeyCode::F(1) => self.state.help_visible = true,
            _ => {}
        }
        false
    }

    fn handle_navigation(&mut self, code: KeyCode) {
        match self.state.pane {
            Pane::Header => match code {
                KeyCode::Up => {
                    self.state.header_selection = self.state.header_selection.saturating_sub(1)
                }
                KeyCode::Down => {
                    self.state.header_selection =
                        (self.state.header_selection + 1).min(HEADER_FIELDS.len() - 1)
                }
                _ => {}
            },
            Pane::Goal => match code {
                KeyCode::Up => {
                    self.state.goal_selection = self.state.goal_selection.saturating_sub(1)
                }
                KeyCode::Down => {
                    self.state.goal_selection =
                        (self.state.goal_selection + 1).min(GOAL_SLOTS.len() - 1)
                }
                _ => {}
            },
            Pane::Table => {
                let visible = self.visible_row_ids().len();
                match code {
                    KeyCode::Up => {
                        self.state.row_selection = self.state.row_selection.saturating_sub(1)
                    }
                    KeyCode::Down => {
                        if visible > 0 {
                            self.state.row_selection =
                                (self.state.row_selection + 1).min(visible - 1);
                        }
                    }
                    KeyCode::Left => {
                        self.state.column_selection = self.state.column_selection.saturating_sub(1)
                    }
                    KeyCode::Right => {
                        self.state.column_selection =
                            (self.state.column_selection + 1).min(COLUMNS.len() - 1)
                    }
                    _ => {}
                }
            }
        }
    }

    /// Enter/Space on the focused element: open the inline editor for text
    /// fields, cycle selects in place.
    fn activate_selection(&mut self) {
        match self.state.pane {
            Pane::Header => match self.state.header_slot() {
                HeaderFieldSlot::Text(field) => {
                    let current = self.store.header().field(field).to_string();
                    self.begin_edit(EditTarget::Header(field), current);
                }
                HeaderFieldSlot::Status => {
                    self.store.cycle_header_status();
                    self.state.status_message =
                        format!("Overall status: {}", self.store.header().status);
                }
            },
            Pane::Goal => match self.state.goal_slot() {
                GoalSlot::TargetPercent => {
                    let current = format!("{}", self.store.goal().target_percent);
                    self.begin_edit(EditTarget::GoalTarget, current);
                }
                GoalSlot::TargetDate => {
                    let current = self.store.goal().target_date.clone();
                    self.begin_edit(EditTarget::GoalDate, current);
                }
            },
            Pane::Table => {
                let Some(id) = self.selected_row_id() else {
                    self.state.status_message = "No row selected".to_string();
                    return;
                };
                match self.state.column() {
                    Column::Priority => {
                        self.store.cycle_row_priority(&id);
                    }
                    Column::Status => {
                        self.store.cycle_row_status(&id);
                    }
                    column => {
                        if let Some(field) = column.text_field() {
                            let current = self
                                .store
                                .plan()
                                .row(&id)
                                .map(|r| r.field(field).to_string())
                                .unwrap_or_default();
                            self.begin_edit(EditTarget::Row { id, field }, current);
                        }
                    }
                }
            }
        }
    }

    fn begin_edit(&mut self, target: EditTarget, initial: String) {
        debug!("Begin edit: {:?}", target);
        self.state.edit = Some(EditState::new(target, initial));
        self.state.mode = AppMode::Editing;
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.edit = None;
                self.state.mode = AppMode::Plan;
                self.state.status_message = "Edit cancelled".to_string();
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Backspace => {
                if let Some(edit) = self.state.edit.as_mut() {
                    edit.buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(edit) = self.state.edit.as_mut() {
                    edit.buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn commit_edit(&mut self) {
        let Some(edit) = self.state.edit.take() else {
            self.state.mode = AppMode::Plan;
            return;
        };
        let buffer = edit.buffer;

        match edit.target {
            EditTarget::Header(field) => {
                if field == HeaderField::StartDate && !valid_date_or_empty(&buffer) {
                    self.reject_edit(EditTarget::Header(field), buffer);
                    return;
                }
                self.store.set_header_field(field, buffer);
                self.state.status_message = "Header updated".to_string();
            }
            EditTarget::Row { id, field } => {
                if field == RowField::Deadline && !valid_date_or_empty(&buffer) {
                    self.reject_edit(EditTarget::Row { id, field }, buffer);
                    return;
                }
                if self.store.set_row_field(&id, field, buffer) {
                    self.state.status_message = "Row updated".to_string();
                } else {
                    self.state.status_message = "Row no longer exists".to_string();
                }
            }
            EditTarget::GoalTarget => match buffer.trim().parse::<f64>() {
                Ok(percent) => {
                    self.store.set_goal_target(percent);
                    self.state.status_message =
                        format!("Goal target: {}%", self.store.goal().target_percent);
                }
                Err(_) => {
                    self.state.status_message = "Enter a number between 0 and 100".to_string();
                    self.state.edit = Some(EditState::new(EditTarget::GoalTarget, buffer));
                    return;
                }
            },
            EditTarget::GoalDate => {
                if !valid_date_or_empty(&buffer) {
                    self.reject_edit(EditTarget::GoalDate, buffer);
                    return;
                }
                self.store.set_goal_date(buffer);
                self.state.status_message = "Goal date updated".to_string();
            }
            EditTarget::Search => {
                self.state.filter.search = buffer.trim().to_string();
                self.state.status_message = if self.state.filter.search.is_empty() {
                    "Search cleared".to_string()
                } else {
                    format!("Searching for \"{}\"", self.state.filter.search)
                };
            }
        }

        self.state.mode = AppMode::Plan;
        let visible = self.visible_row_ids().len();
        self.state.clamp_row_selection(visible);
    }

    fn reject_edit(&mut self, target: EditTarget, buffer: String) {
        self.state.status_message = "Invalid date, use YYYY-MM-DD or leave empty".to_string();
        self.state.edit = Some(EditState::new(target, buffer));
    }

    fn request_remove_selected_row(&mut self) {
        let Some(id) = self.selected_row_id() else {
            self.state.status_message = "No row selected".to_string();
            return;
        };
        if let Some(row) = self.store.plan().row(&id) {
            self.state.pre_dialog_mode = Some(AppMode::Plan);
            self.state.confirm_dialog =
                Some(ConfirmDialogState::remove_row(row.number, &row.action));
            self.state.mode = AppMode::ConfirmDialog;
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.state.confirm_dialog.as_mut() else {
            self.state.mode = AppMode::Plan;
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => dialog.toggle_selection(),
            KeyCode::Char('y') => {
                dialog.confirm_selected = true;
                self.apply_confirm();
            }
            KeyCode::Char('n') | KeyCode::Esc => self.close_dialog(),
            KeyCode::Enter => {
                if dialog.confirm_selected {
                    self.apply_confirm();
                } else {
                    self.close_dialog();
                }
            }
            _ => {}
        }
    }

    fn apply_confirm(&mut self) {
        let Some(dialog) = self.state.confirm_dialog.take() else {
            return;
        };
        match dialog.action {
            ConfirmAction::ResetPlan => {
                self.store.reset();
                self.state.filter.clear();
                self.state.row_selection = 0;
                self.state.status_message = "Plan cleared".to_string();
                info!("Plan reset confirmed by user");
            }
            ConfirmAction::RemoveRow => {
                if let Some(id) = self.selected_row_id() {
                    if self.store.remove_row(&id) {
                        self.state.status_message = "Row removed".to_string();
                    }
                }
                let visible = self.visible_row_ids().len();
                self.state.clamp_row_selection(visible);
            }
        }
        self.state.mode = self.state.pre_dialog_mode.take().unwrap_or(AppMode::Plan);
    }

    fn close_dialog(&mut self) {
        self.state.confirm_dialog = None;
        self.state.mode = self.state.pre_dialog_mode.take().unwrap_or(AppMode::Plan);
        self.state.status_message = "Cancelled".to_string();
    }

    fn cycle_status_filter(&mut self) {
        let statuses: Vec<Status> = Status::iter().collect();
        self.state.filter.status = match self.state.filter.status {
            None => Some(statuses[0]),
            Some(current) => {
                let index = statuses.iter().position(|s| *s == current).unwrap_or(0);
                statuses.get(index + 1).copied()
            }
        };
        self.state.status_message = match self.state.filter.status {
            Some(status) => format!("Status filter: {status}"),
            None => "Status filter: all".to_string(),
        };
        let visible = self.visible_row_ids().len();
        self.state.clamp_row_selection(visible);
    }

    fn cycle_owner_filter(&mut self) {
        let owners = metrics::unique_owners(self.store.rows());
        self.state.filter.owner = match self.state.filter.owner.take() {
            None => owners.first().cloned(),
            Some(current) => {
                let index = owners.iter().position(|o| *o == current);
                match index {
                    Some(i) => owners.get(i + 1).cloned(),
                    None => None,
                }
            }
        };
        self.state.status_message = match &self.state.filter.owner {
            Some(owner) => format!("Owner filter: {owner}"),
            None => "Owner filter: all".to_string(),
        };
        let visible = self.visible_row_ids().len();
        self.state.clamp_row_selection(visible);
    }

    fn export_now(&mut self) {
        let today = chrono::Local::now().date_naive();
        let file_name = transfer::export_file_name(today);
        match transfer::export_to_file(self.store.plan(), &file_name) {
            Ok(()) => {
                self.state.status_message = format!("Exported to {file_name}");
                info!("Plan exported to {}", file_name);
            }
            Err(e) => {
                self.state.status_message = format!("Export failed: {e}");
            }
        }
    }
}

fn valid_date_or_empty(value: &str) -> bool {
    value.trim().is_empty() || parse_date(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        App::new(PlanStore::load(Box::new(MemoryStore::new())))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_add_row() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.store().rows().len(), 6);
        assert_eq!(app.state.row_selection, 5);
    }

    #[test]
    fn test_remove_row_requires_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state.mode, AppMode::ConfirmDialog);

        // Declining leaves state unchanged
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.mode, AppMode::Plan);
        assert_eq!(app.store().rows().len(), 5);

        // Confirming removes and renumbers
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store().rows().len(), 4);
        let numbers: Vec<u32> = app.store().rows().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state.mode, AppMode::ConfirmDialog);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store().rows().len(), 6);

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store().rows().len(), 5);
        assert_eq!(app.store().header().project, "");
    }

    #[test]
    fn test_dialog_enter_on_cancel_does_nothing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        // Default highlight is Cancel
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store().rows().len(), 5);
        assert_eq!(app.state.mode, AppMode::Plan);
    }

    #[test]
    fn test_edit_row_action_text() {
        let mut app = app();
        press(&mut app, KeyCode::Enter); // open editor on Action column
        assert_eq!(app.state.mode, AppMode::Editing);
        type_text(&mut app, "Install rack");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.mode, AppMode::Plan);
        assert_eq!(app.store().rows()[0].action, "Install rack");
    }

    #[test]
    fn test_edit_escape_discards() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "discarded");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store().rows()[0].action, "");
    }

    #[test]
    fn test_cycle_status_cell() {
        let mut app = app();
        // Move to the Status column
        for _ in 0..4 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.state.column(), Column::Status);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.store().rows()[0].status, Status::InProgress);
    }

    #[test]
    fn test_deadline_edit_rejects_invalid_date() {
        let mut app = app();
        for _ in 0..2 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.state.column(), Column::Deadline);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "31/12/2024");
        press(&mut app, KeyCode::Enter);
        // Still editing, nothing committed
        assert_eq!(app.state.mode, AppMode::Editing);
        assert_eq!(app.store().rows()[0].deadline, "");

        // Fix the buffer and commit
        for _ in 0.."31/12/2024".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "2024-12-31");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.mode, AppMode::Plan);
        assert_eq!(app.store().rows()[0].deadline, "2024-12-31");
    }

    #[test]
    fn test_goal_target_edit_clamps() {
        let mut app = app();
        press(&mut app, KeyCode::Tab); // Header
        press(&mut app, KeyCode::Tab); // Goal
        assert_eq!(app.state.pane, Pane::Goal);
        press(&mut app, KeyCode::Enter);
        for _ in 0..2 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "150");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store().goal().target_percent, 100.0);
    }

    #[test]
    fn test_status_filter_cycles_through_all() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.state.filter.status, Some(Status::NotStarted));
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('s'));
        }
        assert_eq!(app.state.filter.status, Some(Status::Late));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.state.filter.status, None);
    }

    #[test]
    fn test_search_commit_and_clear() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "rack");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.filter.search, "rack");
        press(&mut app, KeyCode::Char('c'));
        assert!(app.state.filter.is_empty());
    }

    #[test]
    fn test_help_overlay_toggles() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.state.help_visible);
        // Any key closes the overlay without acting
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.state.help_visible);
        assert_eq!(app.state.mode, AppMode::Plan);
    }

    #[test]
    fn test_charts_view_toggle() {
        let mut app = app();
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.state.mode, AppMode::Charts);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.mode, AppMode::Plan);
    }

    #[test]
    fn test_header_status_cycles_in_place() {
        let mut app = app();
        press(&mut app, KeyCode::Tab); // focus header
        assert_eq!(app.state.pane, Pane::Header);
        for _ in 0..4 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store().header().status, Status::InProgress);
    }
}
