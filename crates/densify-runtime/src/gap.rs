//! Missing-entity analysis.
//!
//! Entities are compared as a multiset: every document mention whose surface
//! string is absent from the summary counts once, so an entity repeated in
//! the source ranks higher than one mentioned a single time.

use std::collections::{HashMap, HashSet};

use densify_core::{EntityExtractor, Result};
use densify_ingest::{Document, Summary};
use tracing::debug;

/// Multiset counter that remembers first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct EntityCounter {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl EntityCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: &str) {
        match self.index.get(entity) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(entity.to_string(), self.counts.len());
                self.counts.push((entity.to_string(), 1));
            }
        }
    }

    pub fn count(&self, entity: &str) -> usize {
        self.index.get(entity).map_or(0, |&slot| self.counts[slot].1)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` highest counts. Equal counts keep first-seen order.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.counts.clone();
        // sort_by is stable, which keeps insertion order among ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<'a> FromIterator<&'a str> for EntityCounter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counter = Self::new();
        for entity in iter {
            counter.add(entity);
        }
        counter
    }
}

/// Ranks document entities missing from a summary.
///
/// Pure with respect to its inputs: nothing is cached or retained between
/// calls beyond what the extractor itself does.
pub struct GapAnalyzer<'a> {
    extractor: &'a dyn EntityExtractor,
    limit: usize,
}

impl<'a> GapAnalyzer<'a> {
    pub fn new(extractor: &'a dyn EntityExtractor, limit: usize) -> Self {
        Self { extractor, limit }
    }

    /// Up to `limit` missing entities, most frequent first.
    pub fn missing_entities(&self, document: &Document, summary: &Summary) -> Result<Vec<String>> {
        let document_entities = self.extractor.extract(document.text())?;
        let summary_entities = self.extractor.extract(&summary.text())?;
        Ok(rank_missing(&document_entities, &summary_entities, self.limit))
    }
}

/// Count document mentions absent from the summary and keep the top `limit`.
pub fn rank_missing(document_entities: &[String], summary_entities: &[String], limit: usize) -> Vec<String> {
    let present: HashSet<&str> = summary_entities.iter().map(String::as_str).collect();
    let counter: EntityCounter = document_entities
        .iter()
        .map(String::as_str)
        .filter(|e| !present.contains(e))
        .collect();

    debug!(
        "Gap analysis: {} document mentions, {} distinct missing",
        document_entities.len(),
        counter.len()
    );

    counter
        .most_common(limit)
        .into_iter()
        .map(|(entity, _)| entity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use densify_core::Error;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counter_most_common_ties_keep_insertion_order() {
        let counter: EntityCounter = ["Cats", "Alice", "Bob", "Alice", "Bob", "Dan"]
            .into_iter()
            .collect();
        assert_eq!(counter.count("Alice"), 2);
        assert_eq!(counter.count("Zed"), 0);
        assert_eq!(
            counter.most_common(3),
            vec![("Alice".to_string(), 2), ("Bob".to_string(), 2), ("Cats".to_string(), 1)]
        );
    }

    #[test]
    fn test_repeats_weight_the_ranking() {
        let doc = strings(&["Alice", "Bob", "Cats", "Cats", "Dan", "Cats", "Dan"]);
        let summary = strings(&["Bob"]);
        assert_eq!(rank_missing(&doc, &summary, 3), vec!["Cats", "Dan", "Alice"]);
    }

    #[test]
    fn test_limit_and_no_gap() {
        let doc = strings(&["A1", "B2", "C3", "D4"]);
        assert_eq!(rank_missing(&doc, &[], 2), vec!["A1", "B2"]);
        assert!(rank_missing(&doc, &doc, 3).is_empty());
    }

    struct Broken;

    impl EntityExtractor for Broken {
        fn extract(&self, _text: &str) -> Result<Vec<String>> {
            Err(Error::CapabilityUnavailable("ner offline".into()))
        }
    }

    #[test]
    fn test_extractor_failure_propagates() {
        let analyzer = GapAnalyzer::new(&Broken, 3);
        let doc = Document::new("Alice met Bob.");
        let err = analyzer.missing_entities(&doc, &Summary::default());
        assert!(matches!(err, Err(Error::CapabilityUnavailable(_))));
    }
}
