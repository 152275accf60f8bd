// Skill extraction: vocabulary, tokenization and the two-pass extractor.
// The vocabulary is the only shared state and is never mutated after startup.

pub mod extractor;
pub mod tokenizer;
pub mod vocabulary;

pub use extractor::{extract_skills, ExtractorOptions, SectionMining, SkillExtractor};
pub use vocabulary::{SkillCategory, SkillVocabulary};
