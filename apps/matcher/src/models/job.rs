use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Anything the ranker can score: a record that lists its required skills.
///
/// Implemented for [`Job`]; callers with their own job records implement it
/// on those instead of converting.
pub trait RequiredSkills {
    fn required_skills(&self) -> &[String];
}

/// A job posting as supplied by job storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Free text, not necessarily normalized.
    #[serde(default, alias = "skills")]
    pub required_skills: Vec<String>,
}

impl Job {
    pub fn new(title: impl Into<String>, required_skills: &[&str]) -> Self {
        Job {
            id: Uuid::new_v4(),
            title: title.into(),
            company: None,
            required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RequiredSkills for Job {
    fn required_skills(&self) -> &[String] {
        &self.required_skills
    }
}

/// A job record annotated by one ranking call. Never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredJob<J> {
    #[serde(flatten)]
    pub job: J,
    /// 0.0 to 1.0
    pub match_score: f64,
    pub is_recommended: bool,
}

/// Output of a ranking call.
///
/// `Unranked` hands the input back untouched when there were no candidate
/// skills to score against. Both variants serialize as a plain array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RankedJobList<J> {
    Unranked(Vec<J>),
    Ranked(Vec<ScoredJob<J>>),
}

impl<J> RankedJobList<J> {
    pub fn len(&self) -> usize {
        match self {
            RankedJobList::Unranked(jobs) => jobs.len(),
            RankedJobList::Ranked(jobs) => jobs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, RankedJobList::Ranked(_))
    }

    pub fn scored(&self) -> Option<&[ScoredJob<J>]> {
        match self {
            RankedJobList::Ranked(jobs) => Some(jobs),
            RankedJobList::Unranked(_) => None,
        }
    }

    /// Drops the annotations, keeping the (possibly reordered) job records.
    pub fn into_jobs(self) -> Vec<J> {
        match self {
            RankedJobList::Unranked(jobs) => jobs,
            RankedJobList::Ranked(jobs) => jobs.into_iter().map(|s| s.job).collect(),
        }
    }
}
