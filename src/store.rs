//! State store and persistence
//!
//! The plan lives in exactly one place: a `PlanStore` owning the `Plan` and a
//! key-value backend. Every mutation goes through the store, which persists a
//! snapshot under a fixed key after each change. Persistence is best-effort:
//! a failed write leaves the in-memory state correct but not durable, and is
//! logged at debug level only.

use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::plan::{Goal, Header, HeaderField, Plan, Row, RowField};
use crate::transfer::{self, ImportedPlan};

/// Fixed key for the persisted snapshot. Matches the original tracker's
/// storage key so existing snapshots keep loading.
pub const STORAGE_KEY: &str = "tbn_plano_acao_v3";

/// External key-value collaborator. `set` and `remove` are best-effort and
/// never fail visibly.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// File-backed key-value store: one file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            debug!("Skipping persist, cannot create {:?}: {}", self.dir, e);
            return;
        }
        if let Err(e) = fs::write(self.key_path(key), value) {
            debug!("Persist failed for key {}: {}", key, e);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Err(e) = fs::remove_file(self.key_path(key)) {
            debug!("Remove failed for key {}: {}", key, e);
        }
    }
}

/// In-memory key-value store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// The sole owner of mutable plan state.
pub struct PlanStore {
    plan: Plan,
    store: Box<dyn KeyValueStore>,
}

impl PlanStore {
    /// Initialize from the backend: a valid persisted snapshot wins,
    /// anything else falls back to the default plan with no user-visible
    /// error.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let plan = match store.get(STORAGE_KEY) {
            Some(text) => match transfer::from_json(&text) {
                Ok(imported) => {
                    info!("Loaded persisted plan snapshot");
                    imported.into_plan(&Goal::default())
                }
                Err(e) => {
                    debug!("Ignoring malformed snapshot: {}", e);
                    Plan::default()
                }
            },
            None => Plan::default(),
        };
        Self { plan, store }
    }

    /// Read access to the current state.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn header(&self) -> &Header {
        &self.plan.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.plan.rows
    }

    pub fn goal(&self) -> &Goal {
        &self.plan.goal
    }

    fn persist(&mut self) {
        match transfer::to_json(&self.plan) {
            Ok(json) => self.store.set(STORAGE_KEY, &json),
            Err(e) => debug!("Skipping persist, serialization failed: {}", e),
        }
    }

    /// Apply a field-level edit to the header.
    pub fn set_header_field(&mut self, field: HeaderField, value: impl Into<String>) {
        self.plan.header.set_field(field, value);
        self.persist();
    }

    /// Cycle the overall status to its next value.
    pub fn cycle_header_status(&mut self) {
        self.plan.header.status = self.plan.header.status.next();
        self.persist();
    }

    /// Apply a field-level edit to a row by id. Returns `false` when the id
    /// is unknown.
    pub fn set_row_field(&mut self, id: &str, field: RowField, value: impl Into<String>) -> bool {
        match self.plan.row_mut(id) {
            Some(row) => {
                row.set_field(field, value);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Cycle a row's status. Returns `false` when the id is unknown.
    pub fn cycle_row_status(&mut self, id: &str) -> bool {
        match self.plan.row_mut(id) {
            Some(row) => {
                row.status = row.status.next();
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Cycle a row's priority. Returns `false` when the id is unknown.
    pub fn cycle_row_priority(&mut self, id: &str) -> bool {
        match self.plan.row_mut(id) {
            Some(row) => {
                row.priority = row.priority.next();
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Append a blank row and return its id.
    pub fn add_row(&mut self) -> String {
        let id = self.plan.add_row();
        self.persist();
        id
    }

    /// Remove a row by id; remaining rows are renumbered 1..=N.
    pub fn remove_row(&mut self, id: &str) -> bool {
        let removed = self.plan.remove_row(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Replace the goal target percentage, clamped into [0, 100].
    pub fn set_goal_target(&mut self, percent: f64) {
        self.plan.goal.target_percent = percent.clamp(0.0, 100.0);
        self.persist();
    }

    /// Replace the goal target date.
    pub fn set_goal_date(&mut self, value: impl Into<String>) {
        self.plan.goal.target_date = value.into();
        self.persist();
    }

    /// Atomically replace the whole state with an already validated import.
    /// An absent goal section keeps the current goal.
    pub fn import(&mut self, imported: ImportedPlan) {
        self.plan = imported.into_plan(&self.plan.goal);
        self.persist();
    }

    /// Destructive reset: blank header, five blank rows, default goal, and
    /// the persisted snapshot removed. Callers must confirm with the user
    /// before invoking this.
    pub fn reset(&mut self) {
        self.plan = Plan::default();
        self.store.remove(STORAGE_KEY);
    }
}
