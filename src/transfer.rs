//! Import/export adapter
//!
//! Serializes the whole plan to formatted JSON and back. Import is
//! all-or-nothing: the text is parsed and shape-checked into a typed value
//! first, and only a fully valid result ever reaches live state. A malformed
//! file never partially overwrites anything.

use anyhow::{Context, Result as AnyResult};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{PlanError, Result};
use crate::plan::{Goal, Header, Plan, Row};

/// A successfully parsed import. The goal section is optional in the wire
/// format; absent means "keep the current goal".
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedPlan {
    #[serde(rename = "cabecalho")]
    pub header: Header,
    #[serde(rename = "linhas")]
    pub rows: Vec<Row>,
    #[serde(rename = "metas")]
    pub goal: Option<Goal>,
}

impl ImportedPlan {
    /// Build the replacement plan, falling back to `current_goal` when the
    /// file carried no goal section.
    pub fn into_plan(self, current_goal: &Goal) -> Plan {
        Plan {
            header: self.header,
            rows: self.rows,
            goal: self.goal.unwrap_or_else(|| current_goal.clone()),
        }
    }
}

/// Serialize a plan to formatted JSON. Output re-imports to an equivalent
/// state (round-trip contract).
pub fn to_json(plan: &Plan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

/// Parse and shape-check import text.
///
/// Accepts only a top-level object with a `cabecalho` object and a `linhas`
/// array. Anything else is rejected with a typed error.
pub fn from_json(text: &str) -> Result<ImportedPlan> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| PlanError::import(format!("not valid JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| PlanError::import("top-level value is not an object"))?;
    if !object.get("cabecalho").is_some_and(|v| v.is_object()) {
        return Err(PlanError::import("missing \"cabecalho\" object"));
    }
    if !object.get("linhas").is_some_and(|v| v.is_array()) {
        return Err(PlanError::import("missing \"linhas\" array"));
    }

    let imported: ImportedPlan = serde_json::from_value(value)
        .map_err(|e| PlanError::import(format!("invalid plan shape: {e}")))?;

    // Reject structurally broken row lists before they replace live state
    let candidate = Plan {
        header: imported.header.clone(),
        rows: imported.rows.clone(),
        goal: imported.goal.clone().unwrap_or_default(),
    };
    candidate
        .validate()
        .map_err(|e| PlanError::import(e.to_string()))?;

    Ok(imported)
}

/// Default export file name: `plano_acao_tbn_<ISO-date>.json`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("plano_acao_tbn_{}.json", today.format("%Y-%m-%d"))
}

/// Write the plan as formatted JSON to a file.
pub fn export_to_file<P: AsRef<Path>>(plan: &Plan, path: P) -> AnyResult<()> {
    let json = to_json(plan).context("Failed to serialize plan to JSON")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write plan to {:?}", path.as_ref()))?;
    Ok(())
}

/// Read a file and parse it as an import.
pub fn import_from_file<P: AsRef<Path>>(path: P) -> AnyResult<ImportedPlan> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read plan from {:?}", path.as_ref()))?;
    let imported = from_json(&text)?;
    Ok(imported)
}
