//! Match scoring: how much of one job's skill list a candidate covers.
//!
//! Default: `OverlapScorer` (exact, case-insensitive overlap ratio).
//!
//! `JobRanker` holds an `Arc<dyn MatchScorer>`, so another backend can be
//! swapped in without touching callers.

use serde::{Deserialize, Serialize};

use crate::models::ExtractedSkillSet;

/// Scores a candidate skill set against one job's required skills.
pub trait MatchScorer: Send + Sync {
    /// Returns a score in `[0.0, 1.0]`.
    fn score(&self, candidate: &ExtractedSkillSet, required: &[String]) -> f64;

    /// Short backend label for logs.
    fn backend(&self) -> &'static str;
}

/// Which required entries a candidate covers, and the resulting score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Fraction of required entries that equal some candidate skill after
/// lowercasing and trimming. No partial or substring credit.
pub struct OverlapScorer;

impl MatchScorer for OverlapScorer {
    fn score(&self, candidate: &ExtractedSkillSet, required: &[String]) -> f64 {
        score(candidate, required)
    }

    fn backend(&self) -> &'static str {
        "overlap"
    }
}

pub fn score(candidate: &ExtractedSkillSet, required: &[String]) -> f64 {
    if candidate.is_empty() || required.is_empty() {
        return 0.0;
    }
    let matched = required.iter().filter(|r| candidate.contains(r)).count();
    ratio(matched, required.len())
}

/// Scores like [`score`] and reports the matched and missing entries, in the
/// job's own order and spelling.
pub fn breakdown(candidate: &ExtractedSkillSet, required: &[String]) -> MatchBreakdown {
    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|r| candidate.contains(r));

    let score = if candidate.is_empty() || required.is_empty() {
        0.0
    } else {
        ratio(matched.len(), required.len())
    };

    MatchBreakdown {
        score,
        matched,
        missing,
    }
}

fn ratio(matched: usize, total: usize) -> f64 {
    (matched as f64 / total as f64).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> ExtractedSkillSet {
        items.iter().collect()
    }

    fn required(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(score(&ExtractedSkillSet::new(), &required(&["python"])), 0.0);
        assert_eq!(score(&skills(&["python"]), &[]), 0.0);
        assert_eq!(score(&ExtractedSkillSet::new(), &[]), 0.0);
    }

    #[test]
    fn test_partial_overlap_ratio() {
        let s = score(&skills(&["python", "sql"]), &required(&["python", "sql", "java"]));
        assert!((s - 2.0 / 3.0).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn test_full_overlap_is_one() {
        let s = score(&skills(&["javascript", "react", "css"]), &required(&["javascript", "react"]));
        assert_eq!(s, 1.0);
    }

    #[test]
    fn test_case_insensitive_exact_match_only() {
        let candidate = skills(&["python", "react"]);
        assert_eq!(score(&candidate, &required(&["Python ", "REACT"])), 1.0);
        assert_eq!(score(&candidate, &required(&["python3", "react native"])), 0.0);
    }

    #[test]
    fn test_duplicate_required_entries_each_count() {
        let s = score(&skills(&["go"]), &required(&["go", "Go", "rust"]));
        assert!((s - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_blank_required_entry_counts_against_score() {
        let s = score(&skills(&["go"]), &required(&["go", "  "]));
        assert_eq!(s, 0.5);
    }

    #[test]
    fn test_breakdown_partitions_requirements() {
        let report = breakdown(
            &skills(&["python", "sql"]),
            &required(&["Python", "Kafka", "SQL", "Java"]),
        );
        assert_eq!(report.matched, vec!["Python", "SQL"]);
        assert_eq!(report.missing, vec!["Kafka", "Java"]);
        assert_eq!(report.score, 0.5);
    }

    #[test]
    fn test_breakdown_with_no_candidate_skills() {
        let report = breakdown(&ExtractedSkillSet::new(), &required(&["rust"]));
        assert_eq!(report.score, 0.0);
        assert!(report.matched.is_empty());
        assert_eq!(report.missing, vec!["rust"]);
    }

    #[test]
    fn test_overlap_scorer_delegates() {
        let scorer = OverlapScorer;
        assert_eq!(scorer.backend(), "overlap");
        assert_eq!(scorer.score(&skills(&["docker"]), &required(&["docker"])), 1.0);
    }
}
