//! Iteration controller: drives the densification passes.
//!
//! A run moves `Init → Iterating(1..=n) → Done`. Each step of
//! [`DensificationRun`] performs exactly one transition, and pass `k + 1`
//! always sees the summary produced by pass `k`. The run owns the evolving
//! summary; the gap analyzer and densifier only borrow it.

use std::time::Instant;

use densify_core::{DensifyConfig, EntityExtractor, Error, Result, SimilarityScorer, StopwordSource};
use densify_ingest::{Document, ExtractiveSummarizer, Summary};
use tracing::{debug, info, warn};

use crate::densifier::Densifier;
use crate::gap::GapAnalyzer;
use crate::metric::DensityMetric;
use crate::types::{DensityReport, IterationRecord, RunOutcome, RunState};

/// Wires configuration and capabilities together for densification runs.
pub struct IterationController<'a> {
    config: DensifyConfig,
    extractor: &'a dyn EntityExtractor,
    scorer: &'a dyn SimilarityScorer,
    stopwords: &'a dyn StopwordSource,
}

impl<'a> IterationController<'a> {
    /// Validates `config` before anything runs.
    pub fn new(
        config: DensifyConfig,
        extractor: &'a dyn EntityExtractor,
        scorer: &'a dyn SimilarityScorer,
        stopwords: &'a dyn StopwordSource,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            extractor,
            scorer,
            stopwords,
        })
    }

    pub fn config(&self) -> &DensifyConfig {
        &self.config
    }

    /// Begin a run over `document` without executing any step.
    pub fn start<'r>(&'r self, document: &'r Document) -> DensificationRun<'r> {
        DensificationRun {
            controller: self,
            document,
            state: RunState::Init,
            initial: Summary::default(),
            summary: Summary::default(),
            records: Vec::new(),
        }
    }

    /// Run every pass and return the records.
    pub fn run(&self, document: &Document) -> Result<RunOutcome> {
        let started = Instant::now();
        info!(
            "Densifying document {} ({} sentences, {} passes)",
            short_hash(document),
            document.sentences().len(),
            self.config.iteration_count
        );

        let mut run = self.start(document);
        while run.step()? != RunState::Done {}
        let outcome = run.finish();

        info!(
            "Densification complete: {} records in {}ms",
            outcome.records.len(),
            started.elapsed().as_millis()
        );
        Ok(outcome)
    }

    /// Density rows for a finished run's records.
    pub fn report(&self, records: &[IterationRecord]) -> DensityReport {
        DensityMetric::new(self.extractor).report(records)
    }
}

/// A single in-progress run. Not shareable: one writer per summary.
pub struct DensificationRun<'r> {
    controller: &'r IterationController<'r>,
    document: &'r Document,
    state: RunState,
    initial: Summary,
    summary: Summary,
    records: Vec<IterationRecord>,
}

impl<'r> DensificationRun<'r> {
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The summary as of the last completed step.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Perform one transition and return the new state. Stepping a finished
    /// run is a no-op.
    pub fn step(&mut self) -> Result<RunState> {
        let current = self.state;
        let next = match current {
            RunState::Init => self.initialize()?,
            RunState::Iterating(k) => self.iterate(k)?,
            RunState::Done => RunState::Done,
        };
        self.state = next;
        Ok(next)
    }

    /// Consume the run. Incomplete runs return the records gathered so far.
    pub fn finish(self) -> RunOutcome {
        RunOutcome {
            initial_summary: self.initial,
            records: self.records,
        }
    }

    fn initialize(&mut self) -> Result<RunState> {
        let config = &self.controller.config;
        let summarizer = ExtractiveSummarizer::new(config.ratio)?;
        let summary = summarizer.summarize(self.document, self.controller.stopwords)?;
        info!(
            "Initial summary: {} of {} sentences",
            summary.len(),
            self.document.sentences().len()
        );

        self.initial = summary.clone();
        self.summary = summary;

        if config.iteration_count == 0 {
            return Ok(RunState::Done);
        }
        if self.summary.is_empty() {
            return Err(Error::InvalidInput(format!(
                "initial summary is empty (ratio {} of {} sentences); nothing to densify",
                config.ratio,
                self.document.sentences().len()
            )));
        }
        Ok(RunState::Iterating(1))
    }

    fn iterate(&mut self, k: usize) -> Result<RunState> {
        let config = &self.controller.config;
        let analyzer = GapAnalyzer::new(self.controller.extractor, config.max_missing_entities);
        let densifier = Densifier::new(self.controller.scorer, config.delimiter);

        let mut degraded = false;
        let missing = match analyzer.missing_entities(self.document, &self.summary) {
            Ok(missing) => missing,
            Err(e) if e.is_recoverable() => {
                warn!("Iteration {}: gap analysis failed, summary unchanged: {}", k, e);
                degraded = true;
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let outcome = densifier.densify(self.document, &self.summary, &missing)?;
        debug_assert_eq!(outcome.summary.len(), self.summary.len());

        info!(
            "Iteration {}: missing={:?}, replaced={}, skipped={}",
            k,
            missing,
            outcome.replacements.len(),
            outcome.skipped.len()
        );
        for replacement in &outcome.replacements {
            debug!(
                "  [{}] {:?} -> {:?}",
                replacement.position, replacement.removed, replacement.inserted
            );
        }

        self.summary = outcome.summary;
        self.records.push(IterationRecord {
            iteration: k,
            missing_entities: missing,
            summary: self.summary.clone(),
            skipped_entities: outcome.skipped,
            degraded,
        });

        if k >= config.iteration_count {
            Ok(RunState::Done)
        } else {
            Ok(RunState::Iterating(k + 1))
        }
    }
}

fn short_hash(document: &Document) -> String {
    document.content_hash().chars().take(12).collect()
}
