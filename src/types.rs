//! Type-safe status and priority enums for action rows
//!
//! This module replaces stringly-typed row fields with proper Rust enums
//! that provide compile-time validation and exhaustive matching. The serde
//! wire names match the persisted JSON schema, so snapshots written by the
//! original web tracker load unchanged.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Progress status of the overall plan or a single action row.
///
/// Declaration order is the fixed display order used by the status
/// distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum Status {
    #[default]
    #[serde(rename = "nao_iniciado")]
    #[strum(serialize = "Not started")]
    NotStarted,
    #[serde(rename = "em_andamento")]
    #[strum(serialize = "In progress")]
    InProgress,
    #[serde(rename = "concluido")]
    #[strum(serialize = "Done")]
    Done,
    #[serde(rename = "atrasado")]
    #[strum(serialize = "Late")]
    Late,
}

impl Status {
    /// Cycle to the next status value, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::NotStarted => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Late,
            Self::Late => Self::NotStarted,
        }
    }

    /// Short marker used in the action table.
    pub fn marker(self) -> &'static str {
        match self {
            Self::NotStarted => "·",
            Self::InProgress => "~",
            Self::Done => "✓",
            Self::Late => "!",
        }
    }
}

/// Priority of a single action row.
///
/// Declaration order is the fixed display order used by the priority
/// distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum Priority {
    #[serde(rename = "alta")]
    #[strum(serialize = "High")]
    High,
    #[default]
    #[serde(rename = "media")]
    #[strum(serialize = "Medium")]
    Medium,
    #[serde(rename = "baixa")]
    #[strum(serialize = "Low")]
    Low,
}

impl Priority {
    /// Cycle to the next priority value, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }
}
