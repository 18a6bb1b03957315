//! Sentence and word segmentation.
//!
//! Two sentence splitters live here and they are deliberately kept apart:
//!
//! - [`split_sentences`] is the linguistic splitter used for frequency
//!   scoring and initial extraction. It understands terminal punctuation,
//!   trailing quotes, abbreviations, and initials.
//! - [`split_on_delimiter`] is the crude single-character split used when
//!   looking for substitution candidates. It breaks on every occurrence of
//!   the delimiter, including the ones inside "U.S." or "3.5".
//!
//! The two do not agree on boundaries, and callers rely on that.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Word tokens: dotted acronyms, words with inner hyphens/apostrophes, or a
/// single non-space symbol.
static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[A-Za-z]\.){2,}|\w+(?:[-'’]\w+)*|[^\w\s]").expect("word pattern compiles")
});

/// Lower-cased tokens that end with a period without ending a sentence.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "corp",
        "ltd", "co", "no", "fig", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
        "sept", "oct", "nov", "dec", "approx", "dept", "est", "gen", "gov", "sen", "rep",
    ]
    .into_iter()
    .collect()
});

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 7] = ['"', '\'', '”', '’', ')', ']', '}'];
const OPENERS: [char; 6] = ['"', '\'', '“', '‘', '(', '['];

/// Split text into sentences, trimming surrounding whitespace.
///
/// A sentence ends at `.`, `!` or `?` (plus any trailing quotes or closing
/// brackets) followed by whitespace. A period does not end a sentence when
/// the token before it is a known abbreviation, a single-letter initial, or
/// a dotted acronym, or when the next word starts lower-case.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !TERMINATORS.contains(&c) {
            i += 1;
            continue;
        }

        // Swallow runs like `?!` or `."` into the terminator.
        let mut j = i + 1;
        while j < chars.len() && (TERMINATORS.contains(&chars[j].1) || CLOSERS.contains(&chars[j].1)) {
            j += 1;
        }
        let end = chars.get(j).map_or(text.len(), |&(p, _)| p);

        let at_boundary = match chars.get(j) {
            None => true,
            Some(&(_, next)) if next.is_whitespace() => {
                let following = chars[j..].iter().map(|&(_, ch)| ch).find(|ch| !ch.is_whitespace());
                c != '.' || period_ends_sentence(&text[start..pos], following)
            }
            Some(_) => false,
        };

        if at_boundary {
            let s = text[start..end].trim();
            if !s.is_empty() {
                sentences.push(s);
            }
            start = end;
        }
        i = j;
    }

    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}

fn period_ends_sentence(before: &str, following: Option<char>) -> bool {
    if following.is_some_and(|ch| ch.is_lowercase()) {
        return false;
    }
    let last = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|ch| OPENERS.contains(&ch));
    !is_abbreviation(last)
}

fn is_abbreviation(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let mut letters = token.chars();
    let single_initial = matches!((letters.next(), letters.next()), (Some(ch), None) if ch.is_alphabetic());
    single_initial || token.contains('.') || ABBREVIATIONS.contains(token.to_lowercase().as_str())
}

/// Split text into word tokens, keeping punctuation as standalone tokens.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Split on every occurrence of `delimiter`, without trimming or dropping
/// empty pieces.
pub fn split_on_delimiter(text: &str, delimiter: char) -> Vec<&str> {
    text.split(delimiter).collect()
}
