//! Notebook document model and inspection.

pub mod inspect;
pub mod parse;

pub use inspect::{inspect, Verdict};
pub use parse::{parse, NotebookParseError};

/// The kind of a notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Executable code cell.
    Code,
    /// Markdown prose cell.
    Markdown,
    /// Any other cell type (raw, unknown).
    Other,
}

/// One unit of a notebook: kind, source text, and execution state.
///
/// Immutable once parsed.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Cell kind.
    pub kind: CellKind,
    /// Source text, with line fragments already concatenated.
    pub source: String,
    /// Execution ordinal; present only for code cells that have been run.
    pub execution_count: Option<i64>,
    /// Opaque output records, in serialized order.
    pub outputs: Vec<serde_json::Value>,
}

/// A parsed notebook: ordered cells plus kernel metadata.
///
/// Cell order is preserved from the serialized form and never reordered.
#[derive(Debug, Clone, Default)]
pub struct Notebook {
    /// Cells in document order.
    pub cells: Vec<Cell>,
    /// Kernel name from `metadata.kernelspec.name`; `None` when absent
    /// or empty.
    pub kernel_name: Option<String>,
}
