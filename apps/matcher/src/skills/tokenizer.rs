use once_cell::sync::Lazy;
use regex::Regex;

/// Longest phrase, in tokens, the matcher considers.
pub const MAX_NGRAM: usize = 3;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word regex"));

/// Lowercases and turns every punctuation character into a space, so
/// `"ci/cd"` becomes `"ci cd"` rather than `"cicd"`. Whitespace, including
/// line breaks, is left in place.
pub fn normalize(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), " ").into_owned()
}

pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Lookup key of a phrase: normalized tokens joined by single spaces.
pub fn phrase_key(phrase: &str) -> String {
    tokenize(&normalize(phrase)).join(" ")
}

/// All contiguous 1..=`max_n` token phrases, shortest first.
pub fn ngrams<'a>(tokens: &'a [&'a str], max_n: usize) -> impl Iterator<Item = String> + 'a {
    (1..=max_n).flat_map(move |n| tokens.windows(n).map(|window| window.join(" ")))
}
