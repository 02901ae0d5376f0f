//! Document model reader: serialized notebook JSON into the in-memory model.

use serde_json::Value;
use thiserror::Error;

use super::{Cell, CellKind, Notebook};

/// Errors raised while reading a serialized notebook.
#[derive(Error, Debug)]
pub enum NotebookParseError {
    /// Input bytes are not valid UTF-8.
    #[error("notebook is not valid UTF-8")]
    InvalidUtf8,

    /// Input is not valid JSON (empty input included).
    #[error("notebook is not valid JSON: {0}")]
    InvalidJson(String),

    /// Top-level `cells` field is absent or not a sequence.
    #[error("notebook has no cells list")]
    MissingCells,
}

impl NotebookParseError {
    /// Short category name, used verbatim in substituted status notes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidUtf8 => "invalid UTF-8",
            Self::InvalidJson(_) => "invalid JSON",
            Self::MissingCells => "missing cells",
        }
    }
}

/// Parses raw notebook bytes into a [`Notebook`].
///
/// Pure transformation; fails only on non-UTF-8 input, invalid JSON, or a
/// missing/non-sequence `cells` field. Individual cells are read leniently:
/// absent optional fields fall back to empty values rather than failing the
/// whole document.
pub fn parse(raw: &[u8]) -> Result<Notebook, NotebookParseError> {
    let text = std::str::from_utf8(raw).map_err(|_| NotebookParseError::InvalidUtf8)?;
    let document: Value =
        serde_json::from_str(text).map_err(|e| NotebookParseError::InvalidJson(e.to_string()))?;

    let raw_cells = document
        .get("cells")
        .and_then(Value::as_array)
        .ok_or(NotebookParseError::MissingCells)?;

    let cells = raw_cells.iter().map(read_cell).collect();

    let kernel_name = document
        .pointer("/metadata/kernelspec/name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_owned);

    Ok(Notebook { cells, kernel_name })
}

fn read_cell(raw: &Value) -> Cell {
    let kind = match raw.get("cell_type").and_then(Value::as_str) {
        Some("code") => CellKind::Code,
        Some("markdown") => CellKind::Markdown,
        _ => CellKind::Other,
    };

    // nbformat serializes source either as one string or as line fragments.
    let source = match raw.get("source") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(fragments)) => fragments.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    };

    let execution_count = raw.get("execution_count").and_then(Value::as_i64);

    let outputs = match raw.get("outputs") {
        Some(Value::Array(records)) => records.clone(),
        _ => Vec::new(),
    };

    Cell {
        kind,
        source,
        execution_count,
        outputs,
    }
}
