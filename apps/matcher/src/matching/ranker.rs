use std::sync::Arc;

use tracing::debug;

use crate::matching::scorer::{MatchScorer, OverlapScorer};
use crate::models::{ExtractedSkillSet, RankedJobList, RequiredSkills, ScoredJob};

pub const DEFAULT_RECOMMEND_THRESHOLD: f64 = 0.5;

/// Scores every job against a candidate and orders them best-first.
#[derive(Clone)]
pub struct JobRanker {
    scorer: Arc<dyn MatchScorer>,
    recommend_threshold: f64,
}

impl Default for JobRanker {
    fn default() -> Self {
        Self::new(Arc::new(OverlapScorer), DEFAULT_RECOMMEND_THRESHOLD)
    }
}

impl JobRanker {
    /// `recommend_threshold` is clamped to `[0.0, 1.0]`.
    pub fn new(scorer: Arc<dyn MatchScorer>, recommend_threshold: f64) -> Self {
        Self {
            scorer,
            recommend_threshold: recommend_threshold.clamp(0.0, 1.0),
        }
    }

    pub fn with_threshold(recommend_threshold: f64) -> Self {
        Self::new(Arc::new(OverlapScorer), recommend_threshold)
    }

    pub fn recommend_threshold(&self) -> f64 {
        self.recommend_threshold
    }

    /// Ranks `jobs` by match score, highest first.
    ///
    /// With no candidate skills the jobs come back untouched, in input order,
    /// as [`RankedJobList::Unranked`]. Otherwise every job is annotated and
    /// the list is stable-sorted, so equal scores keep their input order.
    pub fn rank<J: RequiredSkills>(
        &self,
        candidate: &ExtractedSkillSet,
        jobs: Vec<J>,
    ) -> RankedJobList<J> {
        if candidate.is_empty() {
            debug!(jobs = jobs.len(), "No candidate skills; returning jobs unranked");
            return RankedJobList::Unranked(jobs);
        }

        let mut scored: Vec<ScoredJob<J>> = jobs
            .into_iter()
            .map(|job| {
                let raw = self.scorer.score(candidate, job.required_skills());
                let match_score = clamp_score(raw);
                ScoredJob {
                    job,
                    match_score,
                    is_recommended: match_score >= self.recommend_threshold,
                }
            })
            .collect();

        // `sort_by` is stable.
        scored.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));

        debug!(
            backend = self.scorer.backend(),
            jobs = scored.len(),
            recommended = scored.iter().filter(|s| s.is_recommended).count(),
            "Ranked jobs"
        );

        RankedJobList::Ranked(scored)
    }

    /// Like [`rank`](Self::rank) but leaves the caller's slice alone.
    pub fn rank_cloned<J: RequiredSkills + Clone>(
        &self,
        candidate: &ExtractedSkillSet,
        jobs: &[J],
    ) -> RankedJobList<J> {
        self.rank(candidate, jobs.to_vec())
    }
}

/// Pins a backend's score into `[0.0, 1.0]`; NaN counts as no match.
fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Ranks with the default overlap scorer and 0.5 threshold.
pub fn rank_jobs<J: RequiredSkills>(
    candidate: &ExtractedSkillSet,
    jobs: Vec<J>,
) -> RankedJobList<J> {
    JobRanker::default().rank(candidate, jobs)
}
