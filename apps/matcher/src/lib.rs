//! Resume-to-job matching core.
//!
//! Document bytes → [`extraction`] → plain text → [`skills`] → skill set →
//! [`matching`] → ranked, annotated job list. Everything here is synchronous
//! and keeps no state between calls; the skill vocabulary is the only shared
//! data and is read-only after startup.

pub mod config;
pub mod engine;
pub mod errors;
pub mod extraction;
pub mod matching;
pub mod models;
pub mod skills;

pub use engine::MatchEngine;
pub use errors::ExtractError;
pub use extraction::{extract_text, extract_text_from_bytes, DocumentFormat};
pub use matching::{rank_jobs, score, JobRanker};
pub use models::{ExtractedSkillSet, Job, RankedJobList, RequiredSkills, ScoredJob};
pub use skills::{extract_skills, SkillExtractor, SkillVocabulary};
