//! Report formatter: assembles the marker-tagged PR comment body.

use std::collections::BTreeMap;

use crate::metrics::MetricValue;
use crate::notebook::Verdict;

/// Hidden marker recognizing a previously posted report comment.
pub const REPORT_MARKER: &str = "<!-- noteguard:report -->";

/// Data-file lists longer than this are collapsed behind a details block.
const DATA_FILE_FOLD_THRESHOLD: usize = 5;

/// Inspection outcome for one changed notebook.
#[derive(Debug, Clone)]
pub struct NotebookResult {
    /// Repository-relative path.
    pub path: String,
    /// Engine (or substituted) verdict.
    pub verdict: Verdict,
}

/// Builds the full comment body.
///
/// Pure string assembly: identical inputs produce byte-identical output.
/// Sections appear in fixed order (notebooks, data files, metrics); none
/// suppresses another.
pub fn build_report(
    pr_number: u64,
    head_sha: &str,
    notebooks: &[NotebookResult],
    data_files: &[String],
    metrics: &BTreeMap<String, MetricValue>,
) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(REPORT_MARKER.to_string());
    lines.push("### NoteGuard \u{1f6e1}\u{fe0f}".to_string());
    lines.push(format!(
        "_Analyzed PR #{pr_number} @ `{}`_",
        short_sha(head_sha)
    ));
    lines.push(String::new());

    if !notebooks.is_empty() {
        lines.push("#### Notebooks changed".to_string());
        lines.push("| File | Status |".to_string());
        lines.push("|------|--------|".to_string());
        let mut warnings_block: Vec<String> = Vec::new();
        for result in notebooks {
            lines.push(format!(
                "| `{}` | {} |",
                result.path,
                render_status(&result.verdict)
            ));
            if !result.verdict.warnings.is_empty() {
                warnings_block.push(format!(
                    "- `{}`: {}",
                    result.path,
                    result.verdict.warnings.join("; ")
                ));
            }
        }
        lines.push(String::new());
        if !warnings_block.is_empty() {
            lines.push("<details><summary>Notebook warnings (click to expand)</summary>".to_string());
            lines.extend(warnings_block);
            lines.push("</details>".to_string());
            lines.push(String::new());
        }
        lines.push("> Tip: Clear outputs via `jupyter nbconvert --ClearOutputPreprocessor.enabled=True --inplace your_notebook.ipynb`".to_string());
        lines.push(
            "> Or add a pre-commit hook: [`nbstripout`](https://github.com/kynan/nbstripout)"
                .to_string(),
        );
        lines.push(
            "> [Jupyter Notebook Docs](https://jupyter-notebook.readthedocs.io/en/stable/)"
                .to_string(),
        );
        lines.push(String::new());
    }

    if !data_files.is_empty() {
        let folded = data_files.len() > DATA_FILE_FOLD_THRESHOLD;
        if folded {
            lines.push("<details><summary>Data files changed (click to expand)</summary>".to_string());
        } else {
            lines.push("#### Data files changed".to_string());
        }
        for path in data_files {
            lines.push(format!("- `{path}`"));
        }
        if folded {
            lines.push("</details>".to_string());
        }
        lines.push(String::new());
    }

    if !metrics.is_empty() {
        lines.push("#### Model metrics".to_string());
        let numeric: Vec<(&str, f64)> = metrics
            .iter()
            .filter_map(|(name, value)| match value {
                MetricValue::Number(n) => Some((name.as_str(), *n)),
                MetricValue::Other(_) => None,
            })
            .collect();
        if numeric.is_empty() {
            lines.push("```json".to_string());
            lines.push(
                serde_json::to_string_pretty(metrics).unwrap_or_else(|_| "{}".to_string()),
            );
            lines.push("```".to_string());
        } else {
            lines.push("| Metric | Value |".to_string());
            lines.push("|--------|-------|".to_string());
            for (name, value) in numeric {
                lines.push(format!("| {name} | {value:.4} |"));
            }
        }
        lines.push(String::new());
    }

    if notebooks.is_empty() && data_files.is_empty() && metrics.is_empty() {
        lines.push("_No notebooks, data files, or metrics detected in this PR._".to_string());
    }

    lines.join("\n")
}

/// Status column text: outputs-present rows get a warning prefix, every
/// other verdict shows its status note verbatim.
fn render_status(verdict: &Verdict) -> String {
    if verdict.has_outputs {
        "\u{26a0}\u{fe0f} outputs present".to_string()
    } else {
        verdict.status_note.clone()
    }
}

/// Abbreviates a revision to its 7-character short form.
fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
