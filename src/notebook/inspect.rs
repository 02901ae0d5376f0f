//! Inspection engine: quality checks over a parsed notebook.

use super::{CellKind, Notebook};

/// Kernel names that never draw a warning (matched case-insensitively).
const DEFAULT_KERNELS: [&str; 3] = ["python3", "python", "ir"];

/// Cells whose source exceeds this many characters are flagged as large.
const LARGE_CELL_CHARS: usize = 2000;

/// The engine's final determination for one notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether any code cell still carries outputs.
    pub has_outputs: bool,
    /// Human-readable summary, one of a fixed set of phrases.
    pub status_note: String,
    /// Auxiliary warnings, in check order.
    pub warnings: Vec<String>,
}

impl Verdict {
    /// Verdict substituted when a notebook could not be parsed.
    pub fn unparsable(category: &str) -> Self {
        Self {
            has_outputs: false,
            status_note: format!("unable to parse ({category})"),
            warnings: Vec::new(),
        }
    }

    /// Verdict substituted when the file exceeded the inline-fetch ceiling.
    pub fn skipped_too_large() -> Self {
        Self {
            has_outputs: false,
            status_note: "skipped (file too large for inline check)".to_string(),
            warnings: Vec::new(),
        }
    }
}

/// Runs all checks over a parsed notebook.
///
/// Total over any parsed notebook. The checks are independent; warnings
/// accumulate in a fixed order (kernel, oversized cells, execution order)
/// before the output-presence scan decides the verdict.
pub fn inspect(notebook: &Notebook) -> Verdict {
    let mut warnings = Vec::new();

    if let Some(kernel) = notebook.kernel_name.as_deref() {
        let kernel = kernel.to_lowercase();
        if !kernel.is_empty() && !DEFAULT_KERNELS.contains(&kernel.as_str()) {
            warnings.push(format!("Non-default kernel: {kernel}"));
        }
    }

    // Positions are 1-based and count all cells, not just cells of the
    // flagged kind.
    for (index, cell) in notebook.cells.iter().enumerate() {
        if cell.source.chars().count() > LARGE_CELL_CHARS {
            let position = index + 1;
            match cell.kind {
                CellKind::Code => warnings.push(format!("Large code cell at {position}")),
                CellKind::Markdown => {
                    warnings.push(format!("Large markdown cell at {position}"));
                }
                CellKind::Other => {}
            }
        }
    }

    let execution_counts: Vec<i64> = notebook
        .cells
        .iter()
        .filter(|cell| cell.kind == CellKind::Code)
        .filter_map(|cell| cell.execution_count)
        .collect();
    let in_order = execution_counts.windows(2).all(|pair| pair[0] <= pair[1]);
    if !execution_counts.is_empty() && !in_order {
        warnings.push("Out-of-order execution counts".to_string());
    }

    // First code cell with outputs decides the verdict; an execution count
    // with cleared outputs deliberately does not.
    let has_outputs = notebook
        .cells
        .iter()
        .any(|cell| cell.kind == CellKind::Code && !cell.outputs.is_empty());

    let status_note = if has_outputs {
        "outputs present"
    } else {
        "outputs cleared"
    };

    Verdict {
        has_outputs,
        status_note: status_note.to_string(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::Cell;
    use proptest::prelude::*;

    fn code_cell(source: &str, execution_count: Option<i64>, output_count: usize) -> Cell {
        Cell {
            kind: CellKind::Code,
            source: source.to_string(),
            execution_count,
            outputs: vec![serde_json::json!({"output_type": "stream"}); output_count],
        }
    }

    fn markdown_cell(source: &str) -> Cell {
        Cell {
            kind: CellKind::Markdown,
            source: source.to_string(),
            execution_count: None,
            outputs: Vec::new(),
        }
    }

    fn notebook(cells: Vec<Cell>, kernel: Option<&str>) -> Notebook {
        Notebook {
            cells,
            kernel_name: kernel.map(str::to_owned),
        }
    }

    #[test]
    fn cleared_notebook_passes() {
        let nb = notebook(
            vec![code_cell("x = 1", Some(1), 0), markdown_cell("notes")],
            Some("python3"),
        );
        let verdict = inspect(&nb);
        assert!(!verdict.has_outputs);
        assert_eq!(verdict.status_note, "outputs cleared");
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn first_cell_with_outputs_decides() {
        let nb = notebook(
            vec![
                code_cell("a", Some(1), 0),
                code_cell("b", Some(2), 3),
                code_cell("c", Some(3), 0),
            ],
            None,
        );
        let verdict = inspect(&nb);
        assert!(verdict.has_outputs);
        assert_eq!(verdict.status_note, "outputs present");
    }

    #[test]
    fn execution_count_alone_does_not_flip_verdict() {
        let nb = notebook(vec![code_cell("ran but cleared", Some(7), 0)], None);
        assert!(!inspect(&nb).has_outputs);
    }

    #[test]
    fn markdown_outputs_are_ignored() {
        // Only code cells count toward the verdict, whatever a stray
        // outputs field on another kind might claim.
        let mut odd = markdown_cell("prose");
        odd.outputs = vec![serde_json::json!("leftover")];
        let nb = notebook(vec![odd], None);
        assert!(!inspect(&nb).has_outputs);
    }

    #[test]
    fn non_default_kernel_warns_lowercased() {
        let nb = notebook(vec![], Some("R"));
        assert_eq!(inspect(&nb).warnings, vec!["Non-default kernel: r"]);
    }

    #[test]
    fn default_kernels_never_warn() {
        for name in ["python3", "Python3", "python", "IR", "ir"] {
            let nb = notebook(vec![], Some(name));
            assert!(inspect(&nb).warnings.is_empty(), "kernel {name} warned");
        }
    }

    #[test]
    fn missing_kernel_never_warns() {
        assert!(inspect(&notebook(vec![], None)).warnings.is_empty());
    }

    #[test]
    fn large_cells_warn_with_positions_among_all_cells() {
        let big = "x".repeat(2001);
        let nb = notebook(
            vec![
                markdown_cell("small"),
                code_cell(&big, None, 0),
                markdown_cell(&big),
            ],
            None,
        );
        let verdict = inspect(&nb);
        assert_eq!(
            verdict.warnings,
            vec!["Large code cell at 2", "Large markdown cell at 3"]
        );
    }

    #[test]
    fn cell_at_threshold_is_not_large() {
        let exactly = "y".repeat(2000);
        let nb = notebook(vec![code_cell(&exactly, None, 0)], None);
        assert!(inspect(&nb).warnings.is_empty());
    }

    #[test]
    fn large_other_cells_are_ignored() {
        let big = Cell {
            kind: CellKind::Other,
            source: "z".repeat(5000),
            execution_count: None,
            outputs: Vec::new(),
        };
        assert!(inspect(&notebook(vec![big], None)).warnings.is_empty());
    }

    #[test]
    fn out_of_order_counts_warn_once() {
        let nb = notebook(
            vec![
                code_cell("a", Some(3), 0),
                code_cell("b", Some(1), 0),
                code_cell("c", Some(2), 0),
            ],
            None,
        );
        let verdict = inspect(&nb);
        let hits = verdict
            .warnings
            .iter()
            .filter(|w| *w == "Out-of-order execution counts")
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn gapped_but_ascending_counts_do_not_warn() {
        let nb = notebook(
            vec![
                code_cell("a", Some(1), 0),
                code_cell("b", Some(2), 0),
                code_cell("c", Some(5), 0),
            ],
            None,
        );
        assert!(inspect(&nb).warnings.is_empty());
    }

    #[test]
    fn unexecuted_cells_do_not_break_order() {
        let nb = notebook(
            vec![
                code_cell("a", Some(1), 0),
                code_cell("never ran", None, 0),
                code_cell("c", Some(2), 0),
            ],
            None,
        );
        assert!(inspect(&nb).warnings.is_empty());
    }

    #[test]
    fn warnings_keep_check_order() {
        let big = "x".repeat(2001);
        let nb = notebook(
            vec![code_cell(&big, Some(2), 0), code_cell("b", Some(1), 1)],
            Some("julia-1.9"),
        );
        let verdict = inspect(&nb);
        assert_eq!(
            verdict.warnings,
            vec![
                "Non-default kernel: julia-1.9",
                "Large code cell at 1",
                "Out-of-order execution counts"
            ]
        );
        assert!(verdict.has_outputs);
    }

    #[test]
    fn substituted_verdicts() {
        let unparsable = Verdict::unparsable("invalid JSON");
        assert!(!unparsable.has_outputs);
        assert_eq!(unparsable.status_note, "unable to parse (invalid JSON)");
        assert!(unparsable.warnings.is_empty());

        let skipped = Verdict::skipped_too_large();
        assert!(!skipped.has_outputs);
        assert_eq!(
            skipped.status_note,
            "skipped (file too large for inline check)"
        );
        assert!(skipped.warnings.is_empty());
    }

    fn notebook_with_counts(counts: &[i64]) -> Notebook {
        notebook(
            counts
                .iter()
                .map(|&n| code_cell("pass", Some(n), 0))
                .collect(),
            None,
        )
    }

    proptest! {
        #[test]
        fn sorted_counts_never_warn(counts in proptest::collection::vec(0i64..100, 0..20)) {
            let mut sorted = counts;
            sorted.sort_unstable();
            let verdict = inspect(&notebook_with_counts(&sorted));
            prop_assert!(verdict.warnings.is_empty());
        }

        #[test]
        fn order_warning_fires_iff_unsorted(counts in proptest::collection::vec(0i64..100, 1..20)) {
            let sorted = counts.windows(2).all(|pair| pair[0] <= pair[1]);
            let verdict = inspect(&notebook_with_counts(&counts));
            let hits = verdict
                .warnings
                .iter()
                .filter(|w| *w == "Out-of-order execution counts")
                .count();
            prop_assert_eq!(hits, usize::from(!sorted));
        }
    }
}
