//! Action plan data model
//!
//! Defines the application state aggregate: a singleton header, an ordered
//! list of action rows, and the goal parameters. Serde renames reproduce the
//! persisted JSON schema of the original tracker (`cabecalho` / `linhas` /
//! `metas`), so exported files stay interchangeable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PlanError, Result};
use crate::types::{Priority, Status};

/// Default goal target percentage for new plans.
pub const DEFAULT_TARGET_PERCENT: f64 = 80.0;

/// Number of blank rows in a fresh plan.
pub const DEFAULT_ROW_COUNT: usize = 5;

fn default_row_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_target_percent() -> f64 {
    DEFAULT_TARGET_PERCENT
}

/// Parse a stored date field. Dates are kept on the wire as `YYYY-MM-DD`
/// strings or empty; anything that does not parse is treated as absent.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Plan header: project identification and overall status.
///
/// A singleton within the plan; mutated field by field from the header panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "projeto", default)]
    pub project: String,
    #[serde(rename = "responsavel", default)]
    pub owner: String,
    #[serde(rename = "departamento", default)]
    pub department: String,
    /// Start date as `YYYY-MM-DD` or empty.
    #[serde(rename = "inicio", default)]
    pub start_date: String,
    #[serde(default)]
    pub status: Status,
}

/// Editable text fields of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Project,
    Owner,
    Department,
    StartDate,
}

impl Header {
    /// Current value of a text field.
    pub fn field(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::Project => &self.project,
            HeaderField::Owner => &self.owner,
            HeaderField::Department => &self.department,
            HeaderField::StartDate => &self.start_date,
        }
    }

    /// Apply a field-level edit.
    pub fn set_field(&mut self, field: HeaderField, value: impl Into<String>) {
        let value = value.into();
        match field {
            HeaderField::Project => self.project = value,
            HeaderField::Owner => self.owner = value,
            HeaderField::Department => self.department = value,
            HeaderField::StartDate => self.start_date = value,
        }
    }
}

/// One action row of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Unique identifier, stable across renumbering.
    #[serde(default = "default_row_id")]
    pub id: String,
    /// 1-based display number; always `index + 1` after add/remove.
    #[serde(rename = "numero", default)]
    pub number: u32,
    #[serde(rename = "acao", default)]
    pub action: String,
    #[serde(rename = "responsavel", default)]
    pub owner: String,
    /// Deadline as `YYYY-MM-DD` or empty.
    #[serde(rename = "prazo", default)]
    pub deadline: String,
    #[serde(rename = "prioridade", default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: Status,
    #[serde(rename = "observacoes", default)]
    pub notes: String,
}

/// Editable text fields of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Action,
    Owner,
    Deadline,
    Notes,
}

impl Row {
    /// Create a blank row for the given 0-based list index.
    pub fn blank(index: usize) -> Self {
        Self {
            id: default_row_id(),
            number: index as u32 + 1,
            action: String::new(),
            owner: String::new(),
            deadline: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            notes: String::new(),
        }
    }

    /// Current value of a text field.
    pub fn field(&self, field: RowField) -> &str {
        match field {
            RowField::Action => &self.action,
            RowField::Owner => &self.owner,
            RowField::Deadline => &self.deadline,
            RowField::Notes => &self.notes,
        }
    }

    /// Apply a field-level edit.
    pub fn set_field(&mut self, field: RowField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RowField::Action => self.action = value,
            RowField::Owner => self.owner = value,
            RowField::Deadline => self.deadline = value,
            RowField::Notes => self.notes = value,
        }
    }
}

/// Goal parameters: target completion percentage and target date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(rename = "targetPercent", default = "default_target_percent")]
    pub target_percent: f64,
    /// Target date as `YYYY-MM-DD` or empty.
    #[serde(rename = "targetDate", default)]
    pub target_date: String,
}

impl Default for Goal {
    fn default() -> Self {
        Self {
            target_percent: DEFAULT_TARGET_PERCENT,
            target_date: String::new(),
        }
    }
}

impl Goal {
    /// Target percentage clamped into [0, 100].
    pub fn clamped_target(&self) -> f64 {
        self.target_percent.clamp(0.0, 100.0)
    }
}

/// The whole application state: the unit of persistence, export, and import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "cabecalho")]
    pub header: Header,
    #[serde(rename = "linhas")]
    pub rows: Vec<Row>,
    #[serde(rename = "metas", default)]
    pub goal: Goal,
}

impl Default for Plan {
    fn default() -> Self {
        Self::with_blank_rows(DEFAULT_ROW_COUNT)
    }
}

impl Plan {
    /// Create a plan with a blank header, `count` blank rows, and the
    /// default goal.
    pub fn with_blank_rows(count: usize) -> Self {
        Self {
            header: Header::default(),
            rows: (0..count).map(Row::blank).collect(),
            goal: Goal::default(),
        }
    }

    /// Find a row by id.
    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Find a row by id, mutably.
    pub fn row_mut(&mut self, id: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Append a new blank row and return its id.
    pub fn add_row(&mut self) -> String {
        let row = Row::blank(self.rows.len());
        let id = row.id.clone();
        self.rows.push(row);
        id
    }

    /// Remove a row by id and renumber the remainder. Returns `true` if a
    /// row was removed.
    pub fn remove_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        let removed = self.rows.len() != before;
        if removed {
            self.renumber();
        }
        removed
    }

    /// Reassign row numbers to the contiguous range 1..=N.
    pub fn renumber(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.number = index as u32 + 1;
        }
    }

    /// Validate structural invariants: unique row ids and contiguous
    /// numbering. Used after import before the plan replaces live state.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for row in &self.rows {
            if row.id.trim().is_empty() {
                return Err(PlanError::validation("row with empty id"));
            }
            if !seen.insert(row.id.as_str()) {
                return Err(PlanError::validation(format!(
                    "duplicate row id: {}",
                    row.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_has_five_blank_rows() {
        let plan = Plan::default();
        assert_eq!(plan.rows.len(), 5);
        for (i, row) in plan.rows.iter().enumerate() {
            assert_eq!(row.number, i as u32 + 1);
            assert!(row.action.is_empty());
            assert_eq!(row.priority, Priority::Medium);
            assert_eq!(row.status, Status::NotStarted);
        }
        assert_eq!(plan.goal.target_percent, DEFAULT_TARGET_PERCENT);
        assert!(plan.goal.target_date.is_empty());
    }

    #[test]
    fn test_row_ids_are_unique() {
        let plan = Plan::default();
        let mut ids: Vec<&str> = plan.rows.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), plan.rows.len());
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_add_row_appends_with_next_number() {
        let mut plan = Plan::default();
        let id = plan.add_row();
        assert_eq!(plan.rows.len(), 6);
        let row = plan.row(&id).unwrap();
        assert_eq!(row.number, 6);
    }

    #[test]
    fn test_remove_row_renumbers_contiguously() {
        let mut plan = Plan::default();
        let victim = plan.rows[2].id.clone();
        assert!(plan.remove_row(&victim));
        assert_eq!(plan.rows.len(), 4);
        let numbers: Vec<u32> = plan.rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert!(plan.row(&victim).is_none());
    }

    #[test]
    fn test_remove_missing_row_is_noop() {
        let mut plan = Plan::default();
        assert!(!plan.remove_row("no-such-id"));
        assert_eq!(plan.rows.len(), 5);
    }

    #[test]
    fn test_header_field_edits() {
        let mut header = Header::default();
        header.set_field(HeaderField::Project, "Backbone migration");
        header.set_field(HeaderField::StartDate, "2024-01-01");
        assert_eq!(header.field(HeaderField::Project), "Backbone migration");
        assert_eq!(header.field(HeaderField::StartDate), "2024-01-01");
        assert_eq!(header.field(HeaderField::Owner), "");
    }

    #[test]
    fn test_row_field_edits() {
        let mut row = Row::blank(0);
        row.set_field(RowField::Action, "Install rack");
        row.set_field(RowField::Notes, "blocked on delivery");
        assert_eq!(row.field(RowField::Action), "Install rack");
        assert_eq!(row.field(RowField::Notes), "blocked on delivery");
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut plan = Plan::default();
        plan.rows[1].id = plan.rows[0].id.clone();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-15"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parse_date(" 2024-03-15 "), parse_date("2024-03-15"));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("15/03/2024"), None);
    }

    #[test]
    fn test_goal_clamped_target() {
        let goal = Goal {
            target_percent: 140.0,
            target_date: String::new(),
        };
        assert_eq!(goal.clamped_target(), 100.0);
        let goal = Goal {
            target_percent: -10.0,
            target_date: String::new(),
        };
        assert_eq!(goal.clamped_target(), 0.0);
    }

    #[test]
    fn test_plan_serializes_with_original_schema_names() {
        let plan = Plan::with_blank_rows(1);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"cabecalho\""));
        assert!(json.contains("\"linhas\""));
        assert!(json.contains("\"metas\""));
        assert!(json.contains("\"numero\""));
        assert!(json.contains("\"acao\""));
        assert!(json.contains("\"prioridade\""));
        assert!(json.contains("\"observacoes\""));
        assert!(json.contains("\"targetPercent\""));
    }
}
