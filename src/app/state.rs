//! Application state definitions
//!
//! Contains all state-related types for the TUI: AppState, AppMode, pane
//! focus, table columns, and the inline edit buffer. Plan data itself lives
//! in the `PlanStore`; this is presentation state only.

use crate::components::confirm_dialog::ConfirmDialogState;
use crate::filter::RowFilter;
use crate::plan::{HeaderField, RowField};

/// Application operating modes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Main plan view: header panel, goal panel, action table
    Plan,
    /// Chart view: per-owner progress and status/priority distributions
    Charts,
    /// Inline editing of a single field
    Editing,
    /// Confirmation dialog for destructive operations
    ConfirmDialog,
}

/// Which panel currently has keyboard focus in the plan view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Header,
    Goal,
    Table,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Self::Header => Self::Goal,
            Self::Goal => Self::Table,
            Self::Table => Self::Header,
        }
    }
}

/// Editable fields of the header panel, in display order.
pub const HEADER_FIELDS: [HeaderFieldSlot; 5] = [
    HeaderFieldSlot::Text(HeaderField::Project),
    HeaderFieldSlot::Text(HeaderField::Owner),
    HeaderFieldSlot::Text(HeaderField::Department),
    HeaderFieldSlot::Text(HeaderField::StartDate),
    HeaderFieldSlot::Status,
];

/// A header panel slot: either a text field or the cycled status select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFieldSlot {
    Text(HeaderField),
    Status,
}

impl HeaderFieldSlot {
    pub fn label(self) -> &'static str {
        match self {
            Self::Text(HeaderField::Project) => "Project",
            Self::Text(HeaderField::Owner) => "Owner",
            Self::Text(HeaderField::Department) => "Department",
            Self::Text(HeaderField::StartDate) => "Start date",
            Self::Status => "Overall status",
        }
    }
}

/// Goal panel slots, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalSlot {
    TargetPercent,
    TargetDate,
}

pub const GOAL_SLOTS: [GoalSlot; 2] = [GoalSlot::TargetPercent, GoalSlot::TargetDate];

impl GoalSlot {
    pub fn label(self) -> &'static str {
        match self {
            Self::TargetPercent => "Target %",
            Self::TargetDate => "Target date",
        }
    }
}

/// Editable columns of the action table, in display order. The row number
/// column is derived and not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Action,
    Owner,
    Deadline,
    Priority,
    Status,
    Notes,
}

pub const COLUMNS: [Column; 6] = [
    Column::Action,
    Column::Owner,
    Column::Deadline,
    Column::Priority,
    Column::Status,
    Column::Notes,
];

impl Column {
    pub fn title(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Owner => "Owner",
            Self::Deadline => "Deadline",
            Self::Priority => "Priority",
            Self::Status => "Status",
            Self::Notes => "Notes",
        }
    }

    /// Text column that opens the inline editor, if any. Priority and status
    /// cycle in place instead.
    pub fn text_field(self) -> Option<RowField> {
        match self {
            Self::Action => Some(RowField::Action),
            Self::Owner => Some(RowField::Owner),
            Self::Deadline => Some(RowField::Deadline),
            Self::Notes => Some(RowField::Notes),
            Self::Priority | Self::Status => None,
        }
    }
}

/// What the inline edit buffer is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Header(HeaderField),
    Row { id: String, field: RowField },
    GoalTarget,
    GoalDate,
    Search,
}

/// Inline editing state: one buffer bound to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub target: EditTarget,
    pub buffer: String,
}

impl EditState {
    pub fn new(target: EditTarget, initial: impl Into<String>) -> Self {
        Self {
            target,
            buffer: initial.into(),
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Focused panel in the plan view
    pub pane: Pane,
    /// Selected header field index (into `HEADER_FIELDS`)
    pub header_selection: usize,
    /// Selected goal slot index (into `GOAL_SLOTS`)
    pub goal_selection: usize,
    /// Selected row index into the *filtered* row view
    pub row_selection: usize,
    /// Selected column index (into `COLUMNS`)
    pub column_selection: usize,
    /// Active filter criteria
    pub filter: RowFilter,
    /// Inline edit state, present in `Editing` mode
    pub edit: Option<EditState>,
    /// Confirmation dialog state, present in `ConfirmDialog` mode
    pub confirm_dialog: Option<ConfirmDialogState>,
    /// Mode to return to after a dialog closes
    pub pre_dialog_mode: Option<AppMode>,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether the help overlay is visible
    pub help_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Plan,
            pane: Pane::Table,
            header_selection: 0,
            goal_selection: 0,
            row_selection: 0,
            column_selection: 0,
            filter: RowFilter::default(),
            edit: None,
            confirm_dialog: None,
            pre_dialog_mode: None,
            status_message: "Welcome to the action plan tracker".to_string(),
            help_visible: false,
        }
    }
}

impl AppState {
    /// Currently selected table column.
    pub fn column(&self) -> Column {
        COLUMNS[self.column_selection.min(COLUMNS.len() - 1)]
    }

    /// Currently selected header slot.
    pub fn header_slot(&self) -> HeaderFieldSlot {
        HEADER_FIELDS[self.header_selection.min(HEADER_FIELDS.len() - 1)]
    }

    /// Currently selected goal slot.
    pub fn goal_slot(&self) -> GoalSlot {
        GOAL_SLOTS[self.goal_selection.min(GOAL_SLOTS.len() - 1)]
    }

    /// Clamp the row selection into the filtered view length.
    pub fn clamp_row_selection(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            self.row_selection = 0;
        } else if self.row_selection >= visible_rows {
            self.row_selection = visible_rows - 1;
        }
    }
}
