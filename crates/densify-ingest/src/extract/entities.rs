//! Heuristic entity extraction from capitalized spans.
//!
//! Consecutive capitalized words form one mention ("Johnson Space Center").
//! A lower-case "of" may join two capitalized spans ("National Register of
//! Historic Places"). Attached punctuation ends a span, and leading
//! stopwords are dropped so sentence-initial "The" or "She" never count.
//! Mentions are returned in text order with repeats kept.

use densify_core::{EntityExtractor, Result, StopwordSource};

use crate::segment::split_sentences;
use crate::stopwords::english;

/// Capitalized-span entity extractor. Stateless and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl EntityExtractor for HeuristicExtractor {
    fn extract(&self, text: &str) -> Result<Vec<String>> {
        Ok(extract_mentions(text))
    }
}

/// A whitespace token split into its alphanumeric core and attached punctuation.
struct Word<'a> {
    core: &'a str,
    opens: bool,
    closes: bool,
}

impl<'a> Word<'a> {
    fn parse(raw: &'a str) -> Self {
        let start = raw.find(|c: char| c.is_alphanumeric()).unwrap_or(raw.len());
        let end = raw
            .rfind(|c: char| c.is_alphanumeric())
            .map_or(start, |i| i + raw[i..].chars().next().map_or(1, char::len_utf8));
        let mut core = &raw[start..end.max(start)];
        let mut trailing = &raw[end.max(start)..];

        // Dotted acronyms keep their final period: "U.S."
        if core.contains('.') && trailing.starts_with('.') {
            core = &raw[start..end + 1];
            trailing = &trailing[1..];
        }
        for suffix in ["'s", "’s"] {
            if let Some(stripped) = core.strip_suffix(suffix) {
                core = stripped;
            }
        }

        Self {
            core,
            opens: start > 0,
            closes: !trailing.is_empty(),
        }
    }

    fn is_capitalized(&self) -> bool {
        self.core.chars().next().is_some_and(char::is_uppercase)
    }
}

/// Extract entity mentions in text order.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let stopwords = english();
    let mut mentions = Vec::new();

    for sentence in split_sentences(text) {
        let words: Vec<Word> = sentence.split_whitespace().map(Word::parse).collect();
        let mut span: Vec<&str> = Vec::new();

        for (i, word) in words.iter().enumerate() {
            if word.core.is_empty() {
                flush(&mut span, &mut mentions, stopwords);
                continue;
            }
            if word.is_capitalized() {
                if word.opens {
                    flush(&mut span, &mut mentions, stopwords);
                }
                span.push(word.core);
                if word.closes {
                    flush(&mut span, &mut mentions, stopwords);
                }
            } else if word.core == "of"
                && !span.is_empty()
                && !word.opens
                && !word.closes
                && words
                    .get(i + 1)
                    .is_some_and(|next| next.is_capitalized() && !next.opens)
            {
                span.push(word.core);
            } else {
                flush(&mut span, &mut mentions, stopwords);
            }
        }
        flush(&mut span, &mut mentions, stopwords);
    }

    mentions
}

fn flush(span: &mut Vec<&str>, mentions: &mut Vec<String>, stopwords: &dyn StopwordSource) {
    let leading = span
        .iter()
        .take_while(|w| stopwords.is_stopword(&w.to_lowercase()))
        .count();
    let kept = &span[leading..];
    if !kept.is_empty() {
        mentions.push(kept.join(" "));
    }
    span.clear();
}
