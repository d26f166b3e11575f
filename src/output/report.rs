//! Report assembly: structured per-document results plus the rendered
//! feedback block
//!
//! The structured fields are canonical; `feedback_html` is a denormalized
//! presentation of the same data and must never be parsed back.

use crate::error::Result;
use crate::processing::profile::CandidateProfile;
use crate::processing::scoring::{ScoreBreakdown, Verdict};
use crate::processing::skills::SkillMatchOutcome;
use askama::Template;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NO_SKILLS: &str = "None";
pub const NO_PROJECTS: &str = "No projects found";

/// Terminal artifact for one scored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeReport {
    pub filename: String,
    pub profile: CandidateProfile,
    pub skill_match: SkillMatchOutcome,
    pub score: ScoreBreakdown,
    pub verdict: Verdict,
    pub feedback_html: String,
}

/// Per-document outcome: a scored report, or an inline error entry for a
/// document that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankOutcome {
    Ranked(ResumeReport),
    Failed { filename: String, error: String },
}

impl RankOutcome {
    pub fn filename(&self) -> &str {
        match self {
            RankOutcome::Ranked(report) => &report.filename,
            RankOutcome::Failed { filename, .. } => filename,
        }
    }

    pub fn combined_score(&self) -> Option<f32> {
        match self {
            RankOutcome::Ranked(report) => Some(report.score.combined),
            RankOutcome::Failed { .. } => None,
        }
    }
}

/// Result of a whole batch, sorted by combined score descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedReport {
    pub generated_at: DateTime<Utc>,
    pub embedding_model: String,
    pub entries: Vec<RankOutcome>,
}

/// One candidate's slice of a pairwise comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateComparison {
    pub filename: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub candidates: Vec<CandidateComparison>,
    /// Semantic similarity between the two candidate summaries.
    pub similarity: f32,
}

#[derive(Template)]
#[template(
    source = r#"<div style="font-family:Arial, sans-serif; line-height:1.6; border:1px solid #ccc; border-radius:10px; padding:15px; background:#f9f9f9;">
  <h2 style="color:#333;">📄 Candidate Analysis Report</h2>
  <p><strong>👤 Name:</strong> {{ name }}</p>
  <p><strong>📧 Email:</strong> {{ email }}</p>
  <p><strong>📱 Phone:</strong> {{ phone }}</p>
  <p><strong>🔗 LinkedIn:</strong> {{ linkedin }}</p>
  <p><strong>💻 GitHub:</strong> {{ github }}</p>
  <p><strong>📊 Match Score:</strong> {{ score }}%</p>
  <p><strong>✅ Matched Skills:</strong> <span style="color:green;">{{ matched }}</span></p>
  <p><strong>❌ Missing Skills:</strong> <span style="color:red;">{{ missing }}</span></p>
  <p><strong>🚀 Project Highlights:</strong> {{ projects }}</p>
  <hr style="margin:15px 0;">
  <h3 style="color:{{ verdict_color }};">{{ verdict_heading }}</h3>
  <p>{{ verdict_message }}</p>
</div>"#,
    ext = "html"
)]
struct FeedbackTemplate {
    name: String,
    email: String,
    phone: String,
    linkedin: String,
    github: String,
    score: String,
    matched: String,
    missing: String,
    projects: String,
    verdict_color: &'static str,
    verdict_heading: &'static str,
    verdict_message: &'static str,
}

/// Assemble the report for one document, rendering its feedback block.
pub fn build_report(
    filename: String,
    profile: CandidateProfile,
    skill_match: SkillMatchOutcome,
    score: ScoreBreakdown,
    verdict: Verdict,
) -> Result<ResumeReport> {
    let template = FeedbackTemplate {
        name: profile.name.clone(),
        email: profile.email.clone(),
        phone: profile.phone.clone(),
        linkedin: profile.linkedin.clone(),
        github: profile.github.clone(),
        score: format!("{:.2}", score.combined),
        matched: comma_join(&skill_match.matched),
        missing: comma_join(&skill_match.missing),
        projects: join_projects(&profile.project_highlights),
        verdict_color: verdict.color(),
        verdict_heading: verdict.headline(),
        verdict_message: verdict.message(),
    };
    let feedback_html = template.render().map_err(|e| {
        crate::error::ResumeRankerError::OutputFormatting(format!(
            "failed to render feedback block: {}",
            e
        ))
    })?;

    Ok(ResumeReport {
        filename,
        profile,
        skill_match,
        score,
        verdict,
        feedback_html,
    })
}

/// Template-based candidate summary for the pairwise compare mode.
pub fn candidate_summary(name: &str, skills: &[String], projects: &[String]) -> String {
    let skill_str = if skills.is_empty() {
        "various technologies".to_string()
    } else {
        skills.join(", ")
    };
    let project_str = if projects.is_empty() {
        "multiple domains".to_string()
    } else {
        projects[..projects.len().min(2)].join(", ")
    };

    format!(
        "{} is a skilled individual with experience in {}. \
         They have worked on projects such as {}. \
         The candidate demonstrates technical capabilities and a growth mindset.",
        name, skill_str, project_str
    )
}

fn comma_join(items: &[String]) -> String {
    if items.is_empty() {
        NO_SKILLS.to_string()
    } else {
        items.join(", ")
    }
}

fn join_projects(highlights: &[String]) -> String {
    if highlights.is_empty() {
        NO_PROJECTS.to_string()
    } else {
        highlights.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::profile::{NAME_NOT_FOUND, NOT_FOUND};

    fn sample_profile() -> CandidateProfile {
        CandidateProfile {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "1234567890".to_string(),
            linkedin: NOT_FOUND.to_string(),
            github: "https://github.com/janedoe".to_string(),
            project_highlights: vec!["Built a website".to_string()],
        }
    }

    fn sample_score() -> ScoreBreakdown {
        ScoreBreakdown {
            lexical_ratio: 0.5,
            semantic_similarity: 0.8,
            combined: 62.0,
            semantic_degraded: false,
        }
    }

    #[test]
    fn test_feedback_block_embeds_fields() {
        let report = build_report(
            "jane.pdf".to_string(),
            sample_profile(),
            SkillMatchOutcome {
                matched: vec!["Python".to_string()],
                missing: vec![],
            },
            sample_score(),
            Verdict::ConsiderForInterview,
        )
        .unwrap();

        assert!(report.feedback_html.contains("Jane Doe"));
        assert!(report.feedback_html.contains("jane@example.com"));
        assert!(report.feedback_html.contains("62.00%"));
        assert!(report.feedback_html.contains("Python"));
        assert!(report.feedback_html.contains("Built a website"));
        assert!(report.feedback_html.contains("Consider for Interview"));
        // empty missing list renders as the sentinel
        assert!(report.feedback_html.contains(NO_SKILLS));
    }

    #[test]
    fn test_feedback_block_sentinels() {
        let profile = CandidateProfile {
            name: NAME_NOT_FOUND.to_string(),
            email: NOT_FOUND.to_string(),
            phone: NOT_FOUND.to_string(),
            linkedin: NOT_FOUND.to_string(),
            github: NOT_FOUND.to_string(),
            project_highlights: vec![],
        };
        let report = build_report(
            "empty.pdf".to_string(),
            profile,
            SkillMatchOutcome {
                matched: vec![],
                missing: vec!["Rust".to_string()],
            },
            ScoreBreakdown {
                lexical_ratio: 0.0,
                semantic_similarity: 0.0,
                combined: 0.0,
                semantic_degraded: true,
            },
            Verdict::NotSuitable,
        )
        .unwrap();

        assert!(report.feedback_html.contains(NO_PROJECTS));
        assert!(report.feedback_html.contains("Not Suitable"));
    }

    #[test]
    fn test_candidate_summary_fallbacks() {
        let summary = candidate_summary("Jane Doe", &[], &[]);
        assert!(summary.contains("various technologies"));
        assert!(summary.contains("multiple domains"));

        let skills = vec!["Python".to_string(), "SQL".to_string()];
        let projects = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let summary = candidate_summary("Jane Doe", &skills, &projects);
        assert!(summary.contains("Python, SQL"));
        assert!(summary.contains("a, b"));
        assert!(!summary.contains("c,"));
    }

    #[test]
    fn test_rank_outcome_serialization_tags() {
        let failed = RankOutcome::Failed {
            filename: "broken.pdf".to_string(),
            error: "not a valid PDF".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["filename"], "broken.pdf");
    }
}
