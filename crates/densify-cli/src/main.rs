//! Densify: entity-dense summaries from the command line.

use std::sync::Arc;

use densify_core::{DensifyConfig, EntityExtractor, SimilarityScorer};
use densify_infer::{CacheStats, CachedExtractor};
use densify_ingest::stopwords::english;
use densify_ingest::{Document, HeuristicExtractor, Summary};
use densify_runtime::{
    DensityReport, DensityRow, IterationController, IterationRecord, TimeoutExtractor, TimeoutScorer,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Command;

/// Everything printed for a finished run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
    document_hash: String,
    sentence_count: usize,
    config: DensifyConfig,
    initial_summary: Summary,
    records: Vec<IterationRecord>,
    density: Vec<DensityRow>,
    cache: CacheStats,
}

fn run_pipeline(text: String, config: DensifyConfig) -> anyhow::Result<RunReport> {
    let base: Arc<dyn EntityExtractor> = Arc::new(HeuristicExtractor::new());
    let scorer: Arc<dyn SimilarityScorer> = densify_infer::create_scorer();

    let (extractor, scorer): (Arc<dyn EntityExtractor>, Arc<dyn SimilarityScorer>) =
        match config.capability_timeout() {
            Some(limit) => {
                info!("Capability calls limited to {}ms", limit.as_millis());
                (
                    Arc::new(TimeoutExtractor::new(base, limit)?),
                    Arc::new(TimeoutScorer::new(scorer, limit)?),
                )
            }
            None => (base, scorer),
        };
    let extractor = CachedExtractor::with_default_capacity(extractor);

    let document = Document::new(text);
    let controller = IterationController::new(config.clone(), &extractor, scorer.as_ref(), english())?;
    let outcome = controller.run(&document)?;
    let DensityReport { rows } = controller.report(&outcome.records);

    let cache = extractor.stats();
    info!(
        "Extraction cache: {} entries, {} hits, {} misses",
        cache.entries, cache.hits, cache.misses
    );

    Ok(RunReport {
        document_hash: document.content_hash(),
        sentence_count: document.sentences().len(),
        config,
        initial_summary: outcome.initial_summary,
        records: outcome.records,
        density: rows,
        cache,
    })
}

fn print_text(report: &RunReport) {
    println!("Initial summary ({} sentences):", report.initial_summary.len());
    println!("{}", report.initial_summary);
    println!();

    for record in &report.records {
        println!("Iteration {}", record.iteration);
        println!("  Missing entities: {}", record.missing_entities.join(", "));
        if !record.skipped_entities.is_empty() {
            println!("  Not incorporated: {}", record.skipped_entities.join(", "));
        }
        if record.degraded {
            println!("  (entity extraction failed; summary unchanged)");
        }
        println!("  {}", record.summary);
        println!();
    }

    let table = DensityReport {
        rows: report.density.clone(),
    };
    print!("{}", table.render_table());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match cli::parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            cli::print_usage();
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}. Use 'densify --help' for usage.", message);
            std::process::exit(2);
        }
    };

    let config = options.apply(DensifyConfig::from_env()?)?;
    let text = cli::read_input(&options.input)?;

    // The pipeline is synchronous; keep it off the async workers
    let report = tokio::task::spawn_blocking(move || run_pipeline(text, config)).await??;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Alice met Bob in Paris. Bob likes cats. Cats are independent. \
                        Alice agrees with Bob. Paris is large.";

    #[test]
    fn test_run_pipeline_without_timeouts() {
        let config = DensifyConfig::new(0.4, 2).unwrap();
        let report = run_pipeline(TEXT.to_string(), config).unwrap();
        assert_eq!(report.sentence_count, 5);
        assert_eq!(report.initial_summary.len(), 2);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.density.len(), 2);
        // Document extracted once, reused by later passes.
        assert!(report.cache.hits > 0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["documentHash"].as_str().unwrap().len(), 64);
        assert_eq!(json["records"].as_array().unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_run_pipeline_with_timeouts() {
        let config = DensifyConfig {
            capability_timeout_ms: Some(5_000),
            ..DensifyConfig::new(0.4, 1).unwrap()
        };
        let report = tokio::task::spawn_blocking(move || run_pipeline(TEXT.to_string(), config))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].summary.len(), 2);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = run_pipeline(String::new(), DensifyConfig::default());
        assert!(err.is_err());
    }
}
