//! Changed-file classification by extension.

/// Extension of Jupyter notebook files.
pub const NOTEBOOK_EXT: &str = ".ipynb";

/// Extensions tracked as data artifacts.
pub const DATA_EXTS: [&str; 11] = [
    ".csv", ".parquet", ".json", ".xlsx", ".feather", ".pkl", ".tsv", ".h5", ".yaml", ".yml",
    ".xml",
];

/// What a changed file is, for reporting purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A Jupyter notebook.
    Notebook,
    /// A tracked data artifact (tabular, columnar, serialized, spreadsheet,
    /// markup, or configuration format).
    DataArtifact,
    /// Anything else; not reported.
    Other,
}

/// Classifies a changed-file path by lowercased suffix.
///
/// The notebook and data-artifact extension sets are disjoint, so first
/// match wins without ambiguity. Removed files are expected to be filtered
/// out before this runs.
pub fn classify(path: &str) -> FileKind {
    let lowered = path.to_lowercase();
    if lowered.ends_with(NOTEBOOK_EXT) {
        FileKind::Notebook
    } else if DATA_EXTS.iter().any(|ext| lowered.ends_with(ext)) {
        FileKind::DataArtifact
    } else {
        FileKind::Other
    }
}
