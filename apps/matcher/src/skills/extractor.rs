//! Skill extraction: finds vocabulary terms in free resume text.
//!
//! Two passes over the same text:
//! 1. Global sweep: every unigram, bigram and trigram of the normalized text is
//!    looked up in the vocabulary.
//! 2. Section mining: paragraphs that open with a skills heading are split into
//!    list fragments, and each fragment of plausible length is looked up too.
//!
//! With [`SectionMining::Vocabulary`] the second pass can only confirm what the
//! sweep already found. [`SectionMining::FreeText`] makes it additive by
//! accepting any skill-shaped fragment.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::ExtractedSkillSet;
use crate::skills::tokenizer::{ngrams, normalize, phrase_key, tokenize, MAX_NGRAM};
use crate::skills::vocabulary::SkillVocabulary;

pub const DEFAULT_FRAGMENT_MIN_CHARS: usize = 3;
pub const DEFAULT_FRAGMENT_MAX_CHARS: usize = 24;

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph regex"));

static SKILLS_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:technical\s+skills|skills|proficiencies|technologies)\b\s*:?")
        .expect("heading regex")
});

/// Commas, line breaks, bullets, and hyphen/plus markers between items.
static LIST_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\n•●]|\s[-+]\s").expect("list separator regex"));

/// How the skills-section pass decides a fragment is a skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMining {
    /// Fragment must be a vocabulary term.
    #[default]
    Vocabulary,
    /// Any fragment of one to three words that starts with a letter or digit.
    FreeText,
}

impl FromStr for SectionMining {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "vocabulary" => Ok(SectionMining::Vocabulary),
            "free_text" => Ok(SectionMining::FreeText),
            other => Err(format!(
                "unknown section mining mode '{other}' (expected vocabulary or free_text)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorOptions {
    pub section_mining: SectionMining,
    /// Accepted fragment length in characters, after trimming.
    pub fragment_chars: RangeInclusive<usize>,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            section_mining: SectionMining::default(),
            fragment_chars: DEFAULT_FRAGMENT_MIN_CHARS..=DEFAULT_FRAGMENT_MAX_CHARS,
        }
    }
}

/// Stateless extractor over a shared, read-only vocabulary.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: Arc<SkillVocabulary>,
    options: ExtractorOptions,
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new(SkillVocabulary::builtin())
    }
}

impl SkillExtractor {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self::with_options(vocabulary, ExtractorOptions::default())
    }

    pub fn with_options(vocabulary: Arc<SkillVocabulary>, options: ExtractorOptions) -> Self {
        Self {
            vocabulary,
            options,
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    /// Extracts the set of skills mentioned in `text`. Empty text yields an
    /// empty set.
    pub fn extract(&self, text: &str) -> ExtractedSkillSet {
        if text.trim().is_empty() {
            return ExtractedSkillSet::new();
        }

        let mut found = self.sweep_ngrams(text);
        let swept = found.len();
        found.extend(self.mine_skills_sections(text));

        debug!(
            ngram_matches = swept,
            section_additions = found.len() - swept,
            total = found.len(),
            "Extracted skills"
        );

        ExtractedSkillSet::from_normalized(found)
    }

    /// Same as [`extract`](Self::extract) for callers holding optional text.
    pub fn extract_opt(&self, text: Option<&str>) -> ExtractedSkillSet {
        text.map(|t| self.extract(t)).unwrap_or_default()
    }

    fn sweep_ngrams(&self, text: &str) -> BTreeSet<String> {
        let normalized = normalize(text);
        let tokens = tokenize(&normalized);

        ngrams(&tokens, MAX_NGRAM)
            .filter_map(|phrase| self.vocabulary.lookup(&phrase).map(str::to_string))
            .collect()
    }

    /// Splits on the lowercased text, before punctuation is stripped, so the
    /// commas and bullets separating list items are still there. Fragments
    /// are then normalized the same way as the sweep before lookup.
    fn mine_skills_sections(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase().replace("\r\n", "\n");
        let mut found = BTreeSet::new();

        for paragraph in PARAGRAPH_BREAK.split(&lowered) {
            let Some(heading) = SKILLS_HEADING.find(paragraph) else {
                continue;
            };
            let body = &paragraph[heading.end()..];

            for fragment in LIST_SEPARATOR.split(body) {
                let fragment = fragment
                    .trim()
                    .trim_start_matches(&['-', '+', '*'][..])
                    .trim();
                if !self.options.fragment_chars.contains(&fragment.chars().count()) {
                    continue;
                }
                if let Some(skill) = self.accept_fragment(fragment) {
                    found.insert(skill);
                }
            }
        }

        found
    }

    fn accept_fragment(&self, fragment: &str) -> Option<String> {
        let key = phrase_key(fragment);
        if let Some(term) = self.vocabulary.lookup(&key) {
            return Some(term.to_string());
        }

        match self.options.section_mining {
            SectionMining::Vocabulary => None,
            SectionMining::FreeText => {
                let words = key.split(' ').count();
                let starts_well = key.chars().next().is_some_and(char::is_alphanumeric);
                (starts_well && words <= MAX_NGRAM).then_some(key)
            }
        }
    }
}

/// Extracts skills with the built-in vocabulary and default options.
pub fn extract_skills(text: &str) -> ExtractedSkillSet {
    SkillExtractor::default().extract(text)
}
