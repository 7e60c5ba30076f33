//! planotui library
//!
//! Core functionality for the terminal action plan tracker: the plan data
//! model, metrics, filtering, JSON transfer, and persistence, plus the TUI
//! application built on top of them.

pub mod app;
pub mod cli;
pub mod components;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod plan;
pub mod store;
pub mod theme;
pub mod transfer;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, AppMode, AppState, Pane};
pub use error::{PlanError, Result};
pub use filter::RowFilter;
pub use metrics::{GoalPacing, OwnerProgress, PacingWindow, UNASSIGNED_OWNER};
pub use plan::{Goal, Header, HeaderField, Plan, Row, RowField};
pub use store::{FileStore, KeyValueStore, MemoryStore, PlanStore, STORAGE_KEY};
pub use transfer::ImportedPlan;
pub use types::{Priority, Status};
