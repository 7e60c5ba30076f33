//! Confirmation dialog state for destructive operations
//!
//! The dialog carries the pending action; nothing destructive runs until the
//! user explicitly confirms. Declining leaves state unchanged.

/// Actions that require explicit confirmation before executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Wipe the whole plan and the persisted snapshot.
    ResetPlan,
    /// Remove the currently selected action row.
    RemoveRow,
}

/// State of an open confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    pub action: ConfirmAction,
    /// Currently highlighted button; `false` = Cancel, `true` = Confirm.
    /// Defaults to Cancel so a stray Enter never destroys anything.
    pub confirm_selected: bool,
}

impl ConfirmDialogState {
    pub fn new(title: impl Into<String>, message: impl Into<String>, action: ConfirmAction) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action,
            confirm_selected: false,
        }
    }

    /// Dialog for the destructive whole-plan reset.
    pub fn reset_plan() -> Self {
        Self::new(
            "Clear entire plan?",
            "This wipes the header, all action rows, the goal, and the saved snapshot. This cannot be undone.",
            ConfirmAction::ResetPlan,
        )
    }

    /// Dialog for removing one action row.
    pub fn remove_row(number: u32, action: &str) -> Self {
        let label = if action.trim().is_empty() {
            format!("row #{number}")
        } else {
            format!("row #{number} ({})", action.trim())
        };
        Self::new(
            "Remove action row?",
            format!("Remove {label}? Remaining rows are renumbered."),
            ConfirmAction::RemoveRow,
        )
    }

    /// Move highlight between Cancel and Confirm.
    pub fn toggle_selection(&mut self) {
        self.confirm_selected = !self.confirm_selected;
    }
}
