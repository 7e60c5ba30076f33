//! Filter/search engine for the action table
//!
//! A pure narrowing over the row list: status filter, owner filter, and a
//! case-insensitive free-text search over action, owner, and notes. The
//! underlying list is never mutated or reordered.

use crate::metrics::owner_label;
use crate::plan::Row;
use crate::types::Status;

/// Filter criteria for the row list. `None` means "all" for the select
/// filters; an empty search string matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    pub status: Option<Status>,
    /// Owner label to match; blank row owners compare as the unassigned
    /// sentinel.
    pub owner: Option<String>,
    pub search: String,
}

impl RowFilter {
    /// True when no criterion narrows the list.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.owner.is_none() && self.search.is_empty()
    }

    /// Drop all criteria.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a single row passes every criterion.
    pub fn matches(&self, row: &Row) -> bool {
        if let Some(status) = self.status {
            if row.status != status {
                return false;
            }
        }
        if let Some(ref owner) = self.owner {
            if owner_label(&row.owner) != owner {
                return false;
            }
        }
        if !self.search.is_empty() {
            let haystack = format!("{} {} {}", row.action, row.owner, row.notes).to_lowercase();
            if !haystack.contains(&self.search.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Narrow the row list, preserving order. Returns borrowed rows.
    pub fn apply<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}
