//! Entity density diagnostics.

use std::collections::HashSet;

use densify_core::{EntityExtractor, Error, Result};
use serde::Serialize;
use tracing::warn;

use crate::types::{DensityReport, DensityRow, IterationRecord};

/// Distinct entities over words for one summary text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityValue {
    pub entity_count: usize,
    pub word_count: usize,
    pub density: f64,
}

pub struct DensityMetric<'a> {
    extractor: &'a dyn EntityExtractor,
}

impl<'a> DensityMetric<'a> {
    pub fn new(extractor: &'a dyn EntityExtractor) -> Self {
        Self { extractor }
    }

    /// Number of distinct entity surface strings in `text`.
    pub fn distinct_entities(&self, text: &str) -> Result<usize> {
        let entities = self.extractor.extract(text)?;
        let distinct: HashSet<&str> = entities.iter().map(String::as_str).collect();
        Ok(distinct.len())
    }

    /// Density of `text`. Fails with `InvalidInput` when it has no words.
    pub fn measure(&self, text: &str) -> Result<DensityValue> {
        let word_count = text.split_whitespace().count();
        if word_count == 0 {
            return Err(Error::InvalidInput(
                "summary has no words; density is undefined".into(),
            ));
        }
        let entity_count = self.distinct_entities(text)?;
        Ok(DensityValue {
            entity_count,
            word_count,
            density: entity_count as f64 / word_count as f64,
        })
    }

    /// One row per record. A failed measurement is reported in its row and
    /// the remaining records are still measured.
    pub fn report(&self, records: &[IterationRecord]) -> DensityReport {
        let rows = records
            .iter()
            .map(|record| {
                let text = record.summary.text();
                match self.measure(&text) {
                    Ok(value) => DensityRow {
                        iteration: record.iteration,
                        word_count: value.word_count,
                        entity_count: Some(value.entity_count),
                        density: Some(value.density),
                        error: None,
                    },
                    Err(e) => {
                        warn!("Density unavailable for iteration {}: {}", record.iteration, e);
                        DensityRow {
                            iteration: record.iteration,
                            word_count: text.split_whitespace().count(),
                            entity_count: None,
                            density: None,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect();
        DensityReport { rows }
    }
}
