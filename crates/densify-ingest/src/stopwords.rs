//! English stopword list.

use std::collections::HashSet;

use densify_core::StopwordSource;
use once_cell::sync::Lazy;

/// Punctuation screened out of the frequency table. Membership is a
/// substring test, so multi-character tokens such as `()` also match.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~\n";

static ENGLISH: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
        "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him",
        "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its",
        "itself", "they", "them", "their", "theirs", "themselves", "what", "which", "who",
        "whom", "this", "that", "that'll", "these", "those", "am", "is", "are", "was",
        "were", "be", "been", "being", "have", "has", "had", "having", "do", "does", "did",
        "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
        "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
        "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
        "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
        "than", "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should",
        "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't",
        "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
        "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
        "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't", "wasn",
        "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Process-wide English stopword set, loaded once and never mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStopwords;

impl EnglishStopwords {
    pub fn len(&self) -> usize {
        ENGLISH.len()
    }

    pub fn is_empty(&self) -> bool {
        ENGLISH.is_empty()
    }
}

impl StopwordSource for EnglishStopwords {
    fn is_stopword(&self, word: &str) -> bool {
        ENGLISH.contains(word)
    }
}

/// Shared handle to the English stopword set.
pub fn english() -> &'static EnglishStopwords {
    static INSTANCE: EnglishStopwords = EnglishStopwords;
    &INSTANCE
}

/// Whether a lower-cased token counts as punctuation.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && PUNCTUATION.contains(token)
}
