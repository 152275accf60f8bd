use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

use crate::matching::DEFAULT_RECOMMEND_THRESHOLD;
use crate::skills::extractor::{DEFAULT_FRAGMENT_MAX_CHARS, DEFAULT_FRAGMENT_MIN_CHARS};
use crate::skills::{ExtractorOptions, SectionMining};

/// Runtime configuration for a calling layer, loaded from environment
/// variables. Every key is optional; library functions never read the
/// environment themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub vocabulary_path: Option<PathBuf>,
    pub section_mining: SectionMining,
    pub fragment_min_chars: usize,
    pub fragment_max_chars: usize,
    pub recommend_threshold: f64,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vocabulary_path: None,
            section_mining: SectionMining::default(),
            fragment_min_chars: DEFAULT_FRAGMENT_MIN_CHARS,
            fragment_max_chars: DEFAULT_FRAGMENT_MAX_CHARS,
            recommend_threshold: DEFAULT_RECOMMEND_THRESHOLD,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let section_mining = match lookup("SECTION_MINING") {
            Some(raw) => raw
                .parse::<SectionMining>()
                .map_err(anyhow::Error::msg)
                .context("SECTION_MINING is invalid")?,
            None => defaults.section_mining,
        };

        let config = Config {
            vocabulary_path: lookup("SKILL_VOCABULARY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            section_mining,
            fragment_min_chars: parse_or(
                &lookup,
                "SECTION_FRAGMENT_MIN",
                defaults.fragment_min_chars,
            )?,
            fragment_max_chars: parse_or(
                &lookup,
                "SECTION_FRAGMENT_MAX",
                defaults.fragment_max_chars,
            )?,
            recommend_threshold: parse_or(
                &lookup,
                "RECOMMEND_THRESHOLD",
                defaults.recommend_threshold,
            )?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        };

        ensure!(
            config.fragment_min_chars <= config.fragment_max_chars,
            "SECTION_FRAGMENT_MIN ({}) must not exceed SECTION_FRAGMENT_MAX ({})",
            config.fragment_min_chars,
            config.fragment_max_chars
        );
        ensure!(
            (0.0..=1.0).contains(&config.recommend_threshold),
            "RECOMMEND_THRESHOLD must be between 0 and 1, got {}",
            config.recommend_threshold
        );

        Ok(config)
    }

    pub fn extractor_options(&self) -> ExtractorOptions {
        ExtractorOptions {
            section_mining: self.section_mining,
            fragment_chars: self.fragment_min_chars..=self.fragment_max_chars,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
