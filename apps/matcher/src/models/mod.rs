pub mod job;
pub mod skills;

pub use job::{Job, RankedJobList, RequiredSkills, ScoredJob};
pub use skills::ExtractedSkillSet;
