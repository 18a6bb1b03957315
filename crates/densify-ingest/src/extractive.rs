//! Frequency-based extractive summarization.

use densify_core::{Error, Result, StopwordSource};
use tracing::debug;

use crate::document::Document;
use crate::frequency::FrequencyTable;
use crate::summary::Summary;

/// Picks the top `⌊sentences × ratio⌋` sentences by frequency score.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    ratio: f64,
}

impl ExtractiveSummarizer {
    pub fn new(ratio: f64) -> Result<Self> {
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(Error::Configuration(format!(
                "ratio must be in (0, 1], got {}",
                ratio
            )));
        }
        Ok(Self { ratio })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Number of sentences kept for a document of `sentence_count` sentences.
    pub fn select_length(&self, sentence_count: usize) -> usize {
        (sentence_count as f64 * self.ratio).floor() as usize
    }

    /// Build the initial summary.
    ///
    /// Every sentence is scored, including those with no table hits, so
    /// the summary always has exactly `select_length` sentences. Output is
    /// ordered by descending score; equal scores keep document order.
    pub fn summarize(
        &self,
        document: &Document,
        stopwords: &dyn StopwordSource,
    ) -> Result<Summary> {
        let sentences = document.sentences();
        if sentences.is_empty() {
            return Err(Error::InvalidInput(
                "document contains no sentences".into(),
            ));
        }

        let table = FrequencyTable::build(document.text(), stopwords);
        let select_length = self.select_length(sentences.len());

        let mut scored: Vec<(usize, usize)> = sentences
            .iter()
            .map(|s| (table.score_sentence(&s.text), s.index))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        debug!(
            "Extractive step: {} sentences, {} table entries, keeping {}",
            sentences.len(),
            table.len(),
            select_length
        );

        let picked = scored
            .into_iter()
            .take(select_length)
            .map(|(_, index)| sentences[index].text.clone())
            .collect();
        Ok(Summary::new(picked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::english;

    const SAMPLE: &str =
        "Alice met Bob. Bob likes cats. Cats are independent. Alice agrees with Bob.";

    #[test]
    fn test_rejects_bad_ratio() {
        assert!(matches!(ExtractiveSummarizer::new(0.0), Err(Error::Configuration(_))));
        assert!(matches!(ExtractiveSummarizer::new(1.5), Err(Error::Configuration(_))));
        assert!(ExtractiveSummarizer::new(1.0).is_ok());
    }

    #[test]
    fn test_selects_floor_of_ratio() {
        let summarizer = ExtractiveSummarizer::new(0.3).unwrap();
        assert_eq!(summarizer.select_length(10), 3);
        assert_eq!(summarizer.select_length(4), 1);
        assert_eq!(summarizer.select_length(3), 0);
    }

    #[test]
    fn test_summary_ordered_by_score_then_position() {
        let doc = Document::new(SAMPLE);
        let summary = ExtractiveSummarizer::new(0.5)
            .unwrap()
            .summarize(&doc, english())
            .unwrap();
        assert_eq!(
            summary.sentences(),
            &["Bob likes cats.".to_string(), "Cats are independent.".to_string()]
        );
    }

    #[test]
    fn test_descending_score_not_reading_order() {
        let doc = Document::new("Dogs bark. Birds sing birds sing birds sing. Fish swim swim.");
        let summary = ExtractiveSummarizer::new(1.0)
            .unwrap()
            .summarize(&doc, english())
            .unwrap();
        assert_eq!(summary.sentences()[0], "Birds sing birds sing birds sing.");
        assert_eq!(summary.sentences()[1], "Fish swim swim.");
        assert_eq!(summary.sentences()[2], "Dogs bark.");
    }

    #[test]
    fn test_zero_length_selection_is_empty() {
        let doc = Document::new("One sentence here.");
        let summary = ExtractiveSummarizer::new(0.3)
            .unwrap()
            .summarize(&doc, english())
            .unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_empty_document_is_invalid() {
        let doc = Document::new("");
        let err = ExtractiveSummarizer::new(0.3).unwrap().summarize(&doc, english());
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_unscored_sentences_still_fill_the_summary() {
        // Every token is a stopword, so every score is zero.
        let doc = Document::new("It is. They are. We were.");
        let summary = ExtractiveSummarizer::new(1.0)
            .unwrap()
            .summarize(&doc, english())
            .unwrap();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary.sentences()[0], "It is.");
    }
}
