//! Similarity-guided sentence substitution.
//!
//! For each missing entity the densifier takes the first crude-split source
//! segment that mentions it and is not already in the summary, then
//! overwrites the summary sentence least similar to that segment. Summary
//! positions are the summary's own sentence slots, so the sentence count
//! never changes. A substitution can lower density, so successive passes
//! are not guaranteed to improve it.

use densify_core::{Result, SimilarityScorer};
use densify_ingest::{Document, Summary};
use tracing::{debug, warn};

/// One substitution performed for an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub entity: String,
    pub position: usize,
    pub removed: String,
    pub inserted: String,
}

/// Result of one densify call.
#[derive(Debug, Clone, PartialEq)]
pub struct DensifyOutcome {
    pub summary: Summary,
    pub replacements: Vec<Replacement>,
    /// Entities that found no candidate or hit a recoverable scorer failure.
    pub skipped: Vec<String>,
}

pub struct Densifier<'a> {
    scorer: &'a dyn SimilarityScorer,
    delimiter: char,
}

impl<'a> Densifier<'a> {
    pub fn new(scorer: &'a dyn SimilarityScorer, delimiter: char) -> Self {
        Self { scorer, delimiter }
    }

    /// Apply at most one substitution per entity, in the given order.
    ///
    /// Only non-recoverable scorer errors are returned; a recoverable one
    /// skips the entity and the remaining entities still run.
    pub fn densify(
        &self,
        document: &Document,
        summary: &Summary,
        entities: &[String],
    ) -> Result<DensifyOutcome> {
        let mut current = summary.clone();
        let mut replacements = Vec::new();
        let mut skipped = Vec::new();

        for entity in entities {
            let summary_text = current.text();
            let Some(candidate) = self.find_candidate(document, &summary_text, entity) else {
                debug!("No unused source sentence mentions {:?}", entity);
                skipped.push(entity.clone());
                continue;
            };

            let position = match self.least_similar(&current, candidate) {
                Ok(Some(position)) => position,
                Ok(None) => {
                    debug!("Summary has no sentences to replace for {:?}", entity);
                    skipped.push(entity.clone());
                    continue;
                }
                Err(e) if e.is_recoverable() => {
                    warn!("Skipping {:?}: {}", entity, e);
                    skipped.push(entity.clone());
                    continue;
                }
                Err(e) => return Err(e),
            };

            let inserted = format!("{}{}", candidate, self.delimiter);
            if let Some(removed) = current.replace(position, inserted.clone()) {
                debug!("Replaced sentence {} to add {:?}", position, entity);
                replacements.push(Replacement {
                    entity: entity.clone(),
                    position,
                    removed,
                    inserted,
                });
            }
        }

        Ok(DensifyOutcome {
            summary: current,
            replacements,
            skipped,
        })
    }

    /// First trimmed delimiter segment containing `entity` that does not
    /// already appear verbatim in the summary text.
    pub fn find_candidate<'d>(
        &self,
        document: &'d Document,
        summary_text: &str,
        entity: &str,
    ) -> Option<&'d str> {
        document
            .delimiter_segments(self.delimiter)
            .into_iter()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .find(|segment| segment.contains(entity) && !summary_text.contains(segment))
    }

    /// Position of the summary sentence least similar to `candidate`.
    /// The first position wins among equal scores.
    fn least_similar(&self, summary: &Summary, candidate: &str) -> Result<Option<usize>> {
        let mut best: Option<(usize, f64)> = None;
        for (position, sentence) in summary.sentences().iter().enumerate() {
            let score = self.scorer.similarity(candidate, sentence)?;
            if best.map_or(true, |(_, min)| score < min) {
                best = Some((position, score));
            }
        }
        Ok(best.map(|(position, _)| position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densify_core::Error;
    use densify_infer::BagOfWordsScorer;

    const SAMPLE: &str =
        "Alice met Bob. Bob likes cats. Cats are independent. Alice agrees with Bob.";

    fn summary(sentences: &[&str]) -> Summary {
        Summary::new(sentences.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_find_candidate_skips_sentences_already_in_summary() {
        let doc = Document::new(SAMPLE);
        let densifier = Densifier::new(&BagOfWordsScorer, '.');
        let text = "Alice met Bob. Cats are independent.";
        assert_eq!(
            densifier.find_candidate(&doc, text, "Alice"),
            Some("Alice agrees with Bob")
        );
        assert_eq!(densifier.find_candidate(&doc, text, "Zed"), None);
    }

    #[test]
    fn test_replaces_least_similar_sentence() {
        let doc = Document::new(SAMPLE);
        let densifier = Densifier::new(&BagOfWordsScorer, '.');
        let before = summary(&["Bob likes cats.", "Cats are independent."]);
        let outcome = densifier
            .densify(&doc, &before, &["Alice".to_string()])
            .unwrap();
        assert_eq!(
            outcome.summary.sentences(),
            &["Bob likes cats.".to_string(), "Alice met Bob.".to_string()]
        );
        assert_eq!(outcome.replacements.len(), 1);
        assert_eq!(outcome.replacements[0].removed, "Cats are independent.");
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_length_never_changes() {
        let doc = Document::new(SAMPLE);
        let densifier = Densifier::new(&BagOfWordsScorer, '.');
        let before = summary(&["Bob likes cats.", "Cats are independent."]);
        let entities = vec!["Alice".to_string(), "Cats".to_string(), "Nobody".to_string()];
        let outcome = densifier.densify(&doc, &before, &entities).unwrap();
        assert_eq!(outcome.summary.len(), before.len());
        assert_eq!(outcome.skipped, vec!["Nobody".to_string()]);
    }

    #[test]
    fn test_similarity_ties_pick_first_position() {
        let doc = Document::new("Zed arrives. One two. Three four.");
        let densifier = Densifier::new(&BagOfWordsScorer, '.');
        let before = summary(&["One two.", "Three four."]);
        let outcome = densifier.densify(&doc, &before, &["Zed".to_string()]).unwrap();
        assert_eq!(outcome.summary.sentences()[0], "Zed arrives.");
        assert_eq!(outcome.summary.sentences()[1], "Three four.");
    }

    #[test]
    fn test_empty_summary_is_left_alone() {
        let doc = Document::new(SAMPLE);
        let densifier = Densifier::new(&BagOfWordsScorer, '.');
        let outcome = densifier
            .densify(&doc, &Summary::default(), &["Alice".to_string()])
            .unwrap();
        assert!(outcome.summary.is_empty());
        assert_eq!(outcome.skipped, vec!["Alice".to_string()]);
    }

    struct Flaky;

    impl SimilarityScorer for Flaky {
        fn similarity(&self, a: &str, _b: &str) -> Result<f64> {
            if a.contains("Alice") {
                Err(Error::CapabilityUnavailable("scorer timeout".into()))
            } else {
                Ok(0.0)
            }
        }
    }

    #[test]
    fn test_recoverable_scorer_failure_skips_only_that_entity() {
        let doc = Document::new(SAMPLE);
        let densifier = Densifier::new(&Flaky, '.');
        let before = summary(&["Bob likes cats.", "Alice met Bob."]);
        let entities = vec!["Alice".to_string(), "Cats".to_string()];
        let outcome = densifier.densify(&doc, &before, &entities).unwrap();
        assert_eq!(outcome.skipped, vec!["Alice".to_string()]);
        assert_eq!(outcome.summary.sentences()[0], "Cats are independent.");
    }

    struct Fatal;

    impl SimilarityScorer for Fatal {
        fn similarity(&self, _a: &str, _b: &str) -> Result<f64> {
            Err(Error::Internal("corrupt model".into()))
        }
    }

    #[test]
    fn test_fatal_scorer_failure_propagates() {
        let doc = Document::new(SAMPLE);
        let densifier = Densifier::new(&Fatal, '.');
        let before = summary(&["Bob likes cats."]);
        let err = densifier.densify(&doc, &before, &["Alice".to_string()]);
        assert!(matches!(err, Err(Error::Internal(_))));
    }
}
