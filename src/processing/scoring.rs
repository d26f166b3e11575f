//! Score combination and verdict policy
//!
//! The weights and thresholds are fixed policy, isolated here as named
//! constants; `ScoringConfig` defaults to them and is the only override
//! point.

use crate::config::ScoringConfig;
use crate::processing::skills::SkillMatchOutcome;
use serde::{Deserialize, Serialize};

/// Contribution of the lexical skill-match ratio to the combined score.
pub const LEXICAL_WEIGHT: f32 = 60.0;
/// Contribution of the semantic similarity to the combined score.
pub const SEMANTIC_WEIGHT: f32 = 40.0;
pub const RECOMMEND_THRESHOLD: f32 = 70.0;
pub const INTERVIEW_THRESHOLD: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Recommended,
    ConsiderForInterview,
    NotSuitable,
}

impl Verdict {
    pub fn from_score(combined: f32, scoring: &ScoringConfig) -> Self {
        if combined >= scoring.recommend_threshold {
            Verdict::Recommended
        } else if combined >= scoring.interview_threshold {
            Verdict::ConsiderForInterview
        } else {
            Verdict::NotSuitable
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::Recommended => "✅ Recommended for Hiring",
            Verdict::ConsiderForInterview => "⚠️ Consider for Interview",
            Verdict::NotSuitable => "❌ Not Suitable",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Recommended => {
                "The candidate has strong project experience and relevant skills."
            }
            Verdict::ConsiderForInterview => {
                "The candidate demonstrates moderate alignment with the job requirements."
            }
            Verdict::NotSuitable => {
                "The resume lacks alignment with the job description and contains limited relevant content."
            }
        }
    }

    /// Accent color used by the HTML feedback block.
    pub fn color(&self) -> &'static str {
        match self {
            Verdict::Recommended => "#4CAF50",
            Verdict::ConsiderForInterview => "#FFC107",
            Verdict::NotSuitable => "#F44336",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Fraction of target skills found in the text, in [0, 1].
    pub lexical_ratio: f32,
    /// Cosine similarity between resume and job description embeddings.
    pub semantic_similarity: f32,
    /// Weighted blend, rounded to 2 decimals.
    pub combined: f32,
    /// True when semantic scoring failed and the score is lexical-only.
    pub semantic_degraded: bool,
}

/// Fraction of skill-list entries present in the text. Each entry counts by
/// its own match status, so duplicates weigh the ratio rather than skewing
/// it. Defined as 0 for an empty list.
pub fn lexical_ratio(outcome: &SkillMatchOutcome, skills: &[String]) -> f32 {
    if skills.is_empty() {
        return 0.0;
    }
    let matched_entries = skills
        .iter()
        .filter(|skill| outcome.matched.iter().any(|m| m == *skill))
        .count();
    matched_entries as f32 / skills.len() as f32
}

/// Blend lexical and semantic signals into the combined score. A missing
/// semantic similarity (failed or timed-out inference) degrades to a
/// lexical-only score with the `semantic_degraded` flag set, never to a
/// silent zero.
pub fn combine(
    lexical_ratio: f32,
    semantic_similarity: Option<f32>,
    scoring: &ScoringConfig,
) -> ScoreBreakdown {
    let lexical_part = lexical_ratio * scoring.lexical_weight;
    let (semantic_similarity, combined, semantic_degraded) = match semantic_similarity {
        Some(similarity) => (
            similarity,
            lexical_part + similarity * scoring.semantic_weight,
            false,
        ),
        None => (0.0, lexical_part, true),
    };

    ScoreBreakdown {
        lexical_ratio,
        semantic_similarity,
        combined: round2(combined),
        semantic_degraded,
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(matched: &[&str], missing: &[&str]) -> SkillMatchOutcome {
        SkillMatchOutcome {
            matched: matched.iter().map(|s| s.to_string()).collect(),
            missing: missing.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lexical_ratio_bounds() {
        let target = skills(&["Python", "Java"]);
        let ratio = lexical_ratio(&outcome(&["Python"], &["Java"]), &target);
        assert_eq!(ratio, 0.5);

        let ratio = lexical_ratio(&outcome(&[], &["Python", "Java"]), &target);
        assert_eq!(ratio, 0.0);

        let ratio = lexical_ratio(&outcome(&["Python", "Java"], &[]), &target);
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_lexical_ratio_empty_skill_set() {
        assert_eq!(lexical_ratio(&outcome(&[], &[]), &[]), 0.0);
    }

    #[test]
    fn test_lexical_ratio_counts_duplicate_entries() {
        let target = skills(&["Python", "Python", "Java", "SQL"]);
        let ratio = lexical_ratio(&outcome(&["Python"], &["Java", "SQL"]), &target);
        assert_eq!(ratio, 0.5);
    }

    #[test]
    fn test_combine_weighted_blend() {
        let scoring = ScoringConfig::default();
        let score = combine(0.5, Some(0.8), &scoring);

        assert_eq!(score.combined, 62.0);
        assert!(!score.semantic_degraded);
    }

    #[test]
    fn test_combine_rounds_to_two_decimals() {
        let scoring = ScoringConfig::default();
        let score = combine(1.0 / 3.0, Some(0.333_33), &scoring);
        let raw = (1.0_f32 / 3.0) * 60.0 + 0.333_33 * 40.0;

        assert_eq!(score.combined, (raw * 100.0).round() / 100.0);
        assert_ne!(score.combined, raw);
    }

    #[test]
    fn test_combine_degrades_without_semantic_score() {
        let scoring = ScoringConfig::default();
        let score = combine(0.5, None, &scoring);

        assert_eq!(score.combined, 30.0);
        assert_eq!(score.semantic_similarity, 0.0);
        assert!(score.semantic_degraded);
    }

    #[test]
    fn test_verdict_thresholds() {
        let scoring = ScoringConfig::default();
        assert_eq!(Verdict::from_score(70.0, &scoring), Verdict::Recommended);
        assert_eq!(Verdict::from_score(92.5, &scoring), Verdict::Recommended);
        assert_eq!(
            Verdict::from_score(69.99, &scoring),
            Verdict::ConsiderForInterview
        );
        assert_eq!(
            Verdict::from_score(40.0, &scoring),
            Verdict::ConsiderForInterview
        );
        assert_eq!(Verdict::from_score(39.99, &scoring), Verdict::NotSuitable);
        assert_eq!(Verdict::from_score(-5.0, &scoring), Verdict::NotSuitable);
    }

    #[test]
    fn test_scenario_lexical_half_match() {
        let scoring = ScoringConfig::default();
        let target = skills(&["Python", "Java"]);
        let matches = outcome(&["Python"], &["Java"]);
        let ratio = lexical_ratio(&matches, &target);
        let score = combine(ratio, Some(0.6), &scoring);

        // combined = 30 + semantic * 40
        assert_eq!(score.combined, 54.0);
    }
}
