// Scoring and ranking of job postings against an extracted skill set.
// Both are pure: no I/O, no state kept between calls.

pub mod ranker;
pub mod scorer;

pub use ranker::{rank_jobs, JobRanker, DEFAULT_RECOMMEND_THRESHOLD};
pub use scorer::{breakdown, score, MatchBreakdown, MatchScorer, OverlapScorer};
