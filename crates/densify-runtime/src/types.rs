//! Runtime types.

use densify_ingest::Summary;
use serde::{Deserialize, Serialize};

/// Lifecycle of a densification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "iteration")]
pub enum RunState {
    /// Nothing computed yet; the next step builds the initial summary.
    Init,
    /// The next step runs pass `k` (1-based).
    Iterating(usize),
    /// All passes recorded.
    Done,
}

/// Result of one densification pass. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// 1-based pass index.
    pub iteration: usize,
    /// Missing entities ranked for this pass.
    pub missing_entities: Vec<String>,
    /// Summary after this pass.
    pub summary: Summary,
    /// Missing entities that produced no substitution.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_entities: Vec<String>,
    /// Set when a capability failure cut the pass short.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub initial_summary: Summary,
    pub records: Vec<IterationRecord>,
}

/// Density diagnostics for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityRow {
    pub iteration: usize,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    /// Why the density could not be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-record density rows, in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DensityReport {
    pub rows: Vec<DensityRow>,
}

impl DensityReport {
    /// Render as a fixed-width `Iteration | Entities | Words | Density` table.
    pub fn render_table(&self) -> String {
        let mut out = String::from("Iteration | Entities | Words | Density (E/T)\n");
        for row in &self.rows {
            let entities = row
                .entity_count
                .map_or_else(|| "-".to_string(), |c| c.to_string());
            let density = match (row.density, &row.error) {
                (Some(d), _) => format!("{:.4}", d),
                (None, Some(err)) => format!("n/a ({})", err),
                (None, None) => "n/a".to_string(),
            };
            out.push_str(&format!(
                "{:>9} | {:>8} | {:>5} | {}\n",
                row.iteration, entities, row.word_count, density
            ));
        }
        out
    }
}
