use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::errors::ExtractError;
use crate::extraction::extract_text;
use crate::matching::{JobRanker, OverlapScorer};
use crate::models::{ExtractedSkillSet, RankedJobList, RequiredSkills};
use crate::skills::{SkillExtractor, SkillVocabulary};

/// Explicit context a calling layer passes to its handlers: the configured
/// extractor and ranker over one shared vocabulary. Cheap to clone and safe
/// to share across worker threads.
#[derive(Clone)]
pub struct MatchEngine {
    pub extractor: SkillExtractor,
    pub ranker: JobRanker,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            extractor: SkillExtractor::default(),
            ranker: JobRanker::default(),
        }
    }
}

impl MatchEngine {
    pub fn from_config(config: &Config) -> Result<Self> {
        let vocabulary = match &config.vocabulary_path {
            Some(path) => Arc::new(SkillVocabulary::with_terms_from_file(path).with_context(
                || format!("Failed to load skill vocabulary from {}", path.display()),
            )?),
            None => SkillVocabulary::builtin(),
        };

        info!(
            terms = vocabulary.len(),
            section_mining = ?config.section_mining,
            recommend_threshold = config.recommend_threshold,
            "Match engine initialized"
        );

        Ok(Self {
            extractor: SkillExtractor::with_options(vocabulary, config.extractor_options()),
            ranker: JobRanker::new(Arc::new(OverlapScorer), config.recommend_threshold),
        })
    }

    /// Reads a resume and returns the skills found in it.
    pub fn skills_from_file(
        &self,
        path: impl AsRef<Path>,
        declared: &str,
    ) -> Result<ExtractedSkillSet, ExtractError> {
        let text = extract_text(path, declared)?;
        Ok(self.extractor.extract(&text))
    }

    pub fn skills_from_text(&self, text: &str) -> ExtractedSkillSet {
        self.extractor.extract(text)
    }

    pub fn rank<J: RequiredSkills>(
        &self,
        candidate: &ExtractedSkillSet,
        jobs: Vec<J>,
    ) -> RankedJobList<J> {
        self.ranker.rank(candidate, jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;
    use crate::skills::SectionMining;

    #[test]
    fn test_from_config_applies_options() {
        let config = Config {
            section_mining: SectionMining::FreeText,
            recommend_threshold: 0.9,
            ..Config::default()
        };
        let engine = MatchEngine::from_config(&config).unwrap();
        assert_eq!(engine.extractor.options().section_mining, SectionMining::FreeText);
        assert_eq!(engine.ranker.recommend_threshold(), 0.9);
    }

    #[test]
    fn test_from_config_loads_extra_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terms.txt");
        std::fs::write(&path, "framework: htmx\n").unwrap();

        let config = Config {
            vocabulary_path: Some(path),
            ..Config::default()
        };
        let engine = MatchEngine::from_config(&config).unwrap();
        assert!(engine.skills_from_text("Built admin pages with HTMX").contains("htmx"));
    }

    #[test]
    fn test_from_config_missing_vocabulary_file_fails() {
        let config = Config {
            vocabulary_path: Some("/no/such/terms.txt".into()),
            ..Config::default()
        };
        let err = MatchEngine::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("/no/such/terms.txt"));
    }

    #[test]
    fn test_text_to_ranking() {
        let engine = MatchEngine::default();
        let skills = engine.skills_from_text("Rust and Kubernetes on AWS");
        let ranked = engine.rank(
            &skills,
            vec![
                Job::new("Data", &["python", "spark"]),
                Job::new("Platform", &["rust", "kubernetes", "aws", "terraform"]),
            ],
        );
        let scored = ranked.scored().unwrap();
        assert_eq!(scored[0].job.title, "Platform");
        assert_eq!(scored[0].match_score, 0.75);
    }

    #[tokio::test]
    async fn test_shared_engine_across_blocking_tasks() {
        let engine = MatchEngine::default();
        let resumes = ["Python and Django", "Go, Docker", "Rust on AWS", "nothing here"];

        let tasks: Vec<_> = resumes
            .iter()
            .map(|text| {
                let engine = engine.clone();
                let text = text.to_string();
                tokio::task::spawn_blocking(move || engine.skills_from_text(&text))
            })
            .collect();
        let missing = {
            let engine = engine.clone();
            tokio::task::spawn_blocking(move || engine.skills_from_file("/no/such/cv.pdf", "pdf"))
        };

        let mut found = Vec::new();
        for task in tasks {
            found.push(task.await.unwrap().into_vec());
        }
        assert_eq!(found[0], vec!["django", "python"]);
        assert_eq!(found[1], vec!["docker", "go"]);
        assert_eq!(found[2], vec!["aws", "rust"]);
        assert!(found[3].is_empty());

        assert!(matches!(missing.await.unwrap(), Err(ExtractError::Io { .. })));
    }
}
