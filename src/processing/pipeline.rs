//! Batch ranking and pairwise comparison
//!
//! One parameterized pipeline: the ranking path scores documents against a
//! job description, the compare path reuses the same extraction steps for
//! exactly two documents and reports the similarity between their summaries.

use crate::config::Config;
use crate::error::{Result, ResumeRankerError};
use crate::input::manager::SourceDocument;
use crate::input::pdf::ExtractedText;
use crate::output::report::{
    build_report, candidate_summary, CandidateComparison, ComparisonReport, RankOutcome,
    RankedReport,
};
use crate::processing::embeddings::EmbeddingEngine;
use crate::processing::profile::FieldExtractor;
use crate::processing::scoring::{self, Verdict};
use crate::processing::skills::{match_skills, SkillScanner};
use chrono::Utc;
use log::warn;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// One batch scoring request. Stateless: nothing outlives the call.
#[derive(Debug, Clone)]
pub struct RankRequest {
    pub job_description: String,
    pub skills: Vec<String>,
    pub documents: Vec<SourceDocument>,
}

pub struct RankingPipeline {
    engine: Arc<EmbeddingEngine>,
    extractor: Arc<FieldExtractor>,
    config: Config,
}

impl RankingPipeline {
    pub fn new(engine: Arc<EmbeddingEngine>, config: Config) -> Self {
        Self {
            engine,
            extractor: Arc::new(FieldExtractor::new()),
            config,
        }
    }

    /// Score a batch of documents against the job description and return
    /// them ranked by combined score, failures reported inline.
    pub async fn rank(&self, request: RankRequest) -> Result<RankedReport> {
        if request.job_description.trim().is_empty() {
            return Err(ResumeRankerError::InvalidInput(
                "job description is required".to_string(),
            ));
        }
        if request.skills.is_empty() {
            return Err(ResumeRankerError::InvalidInput(
                "skill list is required".to_string(),
            ));
        }

        let job_description = Arc::new(request.job_description);
        let skills = Arc::new(request.skills);
        let limit = Arc::new(Semaphore::new(
            self.config.processing.max_concurrent_documents.max(1),
        ));

        let mut handles = Vec::with_capacity(request.documents.len());
        for document in request.documents {
            let engine = Arc::clone(&self.engine);
            let extractor = Arc::clone(&self.extractor);
            let job_description = Arc::clone(&job_description);
            let skills = Arc::clone(&skills);
            let limit = Arc::clone(&limit);
            let scoring_config = self.config.scoring.clone();
            let parse_timeout = Duration::from_secs(self.config.processing.parse_timeout_secs);

            handles.push(tokio::spawn(async move {
                let _permit = limit.acquire_owned().await;
                score_document(
                    document,
                    &job_description,
                    &skills,
                    &engine,
                    &extractor,
                    &scoring_config,
                    parse_timeout,
                )
                .await
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for handle in handles {
            let outcome = handle.await.map_err(|e| {
                ResumeRankerError::DocumentParse(format!("scoring task aborted: {}", e))
            })?;
            outcomes.push(outcome);
        }

        Ok(RankedReport {
            generated_at: Utc::now(),
            embedding_model: self.engine.model_name().to_string(),
            entries: order_outcomes(outcomes),
        })
    }

    /// Legacy pairwise mode: profile, detected skills, and projects per
    /// document, plus the semantic similarity between the two generated
    /// summaries.
    pub async fn compare(&self, documents: Vec<SourceDocument>) -> Result<ComparisonReport> {
        if documents.len() != 2 {
            return Err(ResumeRankerError::InvalidInput(format!(
                "pairwise comparison requires exactly two documents, got {}",
                documents.len()
            )));
        }

        let scanner = SkillScanner::new()?;
        let parse_timeout = Duration::from_secs(self.config.processing.parse_timeout_secs);

        let mut candidates = Vec::with_capacity(2);
        for document in documents {
            let filename = document.filename.clone();
            let extracted = extract_with_timeout(document, parse_timeout).await?;
            let text = extracted.text();
            let profile = self.extractor.extract(&extracted);
            let skills = scanner.scan(&text);
            let summary =
                candidate_summary(&profile.name, &skills, &profile.project_highlights);

            candidates.push(CandidateComparison {
                filename,
                name: profile.name,
                email: profile.email,
                phone: profile.phone,
                skills,
                projects: profile.project_highlights,
                summary,
            });
        }

        let similarity = Arc::clone(&self.engine)
            .similarity(candidates[0].summary.clone(), candidates[1].summary.clone())
            .await?;

        Ok(ComparisonReport {
            candidates,
            similarity,
        })
    }
}

async fn score_document(
    document: SourceDocument,
    job_description: &str,
    skills: &[String],
    engine: &Arc<EmbeddingEngine>,
    extractor: &FieldExtractor,
    scoring_config: &crate::config::ScoringConfig,
    parse_timeout: Duration,
) -> RankOutcome {
    let filename = document.filename.clone();

    let extracted = match extract_with_timeout(document, parse_timeout).await {
        Ok(extracted) => extracted,
        Err(e) => {
            warn!("skipping {}: {}", filename, e);
            return RankOutcome::Failed {
                filename,
                error: e.to_string(),
            };
        }
    };

    let text = extracted.text();
    let profile = extractor.extract(&extracted);
    let skill_match = match_skills(&text, skills);
    let lexical_ratio = scoring::lexical_ratio(&skill_match, skills);

    // A failed or timed-out inference degrades to a lexical-only score with
    // the flag set, it does not sink the document.
    let semantic_similarity = match Arc::clone(engine)
        .similarity(text, job_description.to_string())
        .await
    {
        Ok(similarity) => Some(similarity),
        Err(e) => {
            warn!("semantic scoring failed for {}: {}", filename, e);
            None
        }
    };

    let score = scoring::combine(lexical_ratio, semantic_similarity, scoring_config);
    let verdict = Verdict::from_score(score.combined, scoring_config);

    match build_report(filename.clone(), profile, skill_match, score, verdict) {
        Ok(report) => RankOutcome::Ranked(report),
        Err(e) => RankOutcome::Failed {
            filename,
            error: e.to_string(),
        },
    }
}

async fn extract_with_timeout(
    document: SourceDocument,
    parse_timeout: Duration,
) -> Result<ExtractedText> {
    let filename = document.filename.clone();
    let task = tokio::task::spawn_blocking(move || document.extract());

    match tokio::time::timeout(parse_timeout, task).await {
        Err(_) => Err(ResumeRankerError::DocumentParse(format!(
            "parsing {} exceeded {}s",
            filename,
            parse_timeout.as_secs()
        ))),
        Ok(Err(join_error)) => Err(ResumeRankerError::DocumentParse(format!(
            "parser task failed for {}: {}",
            filename, join_error
        ))),
        Ok(Ok(extracted)) => extracted,
    }
}

/// Ranked entries first, sorted by combined score descending with stable
/// ties; failed entries follow in upload order.
pub fn order_outcomes(outcomes: Vec<RankOutcome>) -> Vec<RankOutcome> {
    let (mut ranked, failed): (Vec<_>, Vec<_>) = outcomes
        .into_iter()
        .partition(|o| matches!(o, RankOutcome::Ranked(_)));

    ranked.sort_by(|a, b| {
        let a = a.combined_score().unwrap_or(f32::NEG_INFINITY);
        let b = b.combined_score().unwrap_or(f32::NEG_INFINITY);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });

    ranked.extend(failed);
    ranked
}
