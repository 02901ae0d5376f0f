//! Pipeline metrics loading.
//!
//! CI jobs that train or evaluate models can drop a `metrics.json` in the
//! workspace; its entries are surfaced in the report's metrics section.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default location of the pipeline-produced metrics file.
pub const DEFAULT_METRICS_FILE: &str = "metrics.json";

/// A metric value, tagged numeric-or-other once at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Numeric value; rendered in the metrics table with 4 decimal places.
    Number(f64),
    /// Any non-numeric JSON value; only ever rendered as raw JSON.
    Other(serde_json::Value),
}

/// Loads metrics from `path` if the file exists.
///
/// A missing file simply means no metrics section. An unreadable or
/// unparsable file is logged and likewise yields no metrics; it never
/// fails the run.
pub fn load_metrics(path: &Path) -> BTreeMap<String, MetricValue> {
    if !path.exists() {
        return BTreeMap::new();
    }
    match read_metrics(path) {
        Ok(metrics) => metrics,
        Err(e) => {
            warn!("Unable to load {}: {e:#}", path.display());
            BTreeMap::new()
        }
    }
}

fn read_metrics(path: &Path) -> Result<BTreeMap<String, MetricValue>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse metrics file: {}", path.display()))
}
