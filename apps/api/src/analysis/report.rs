//! One full analysis run: normalize the resume, score it, attach feedback.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::feedback::{build_feedback, MatchFeedback};
use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::scoring::{AnalysisError, MatchResult, MatchScorer, RoleScore, ScorerBackend};
use crate::models::role::{ResumeDocument, RoleCatalog};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub candidate_name: Option<String>,
    pub scorer_backend: ScorerBackend,
    pub result: MatchResult,
    /// Normalized scores, highest first.
    pub ranking: Vec<RoleScore>,
    /// Absent when no role scored above zero.
    pub feedback: Option<MatchFeedback>,
}

pub fn analyze_resume(
    raw_text: &str,
    candidate_name: Option<String>,
    roles: &RoleCatalog,
    normalizer: &TextNormalizer,
    scorer: &dyn MatchScorer,
) -> Result<AnalysisReport, AnalysisError> {
    let resume = ResumeDocument::new(raw_text, normalizer);
    let result = scorer.score(&resume.cleaned_text, roles)?;

    match &result.best_match {
        Some(best) => info!(
            best_role = %best.role,
            normalized_score = best.normalized_score,
            raw_score = best.raw_score,
            raw_total = result.raw_total(),
            normalized_total = result.normalized_total(),
            roles = roles.len(),
            "Resume analysis complete"
        ),
        None => tracing::warn!(
            roles = roles.len(),
            "Resume shares no terms with any role; no best match"
        ),
    }

    let feedback = result.best_match.as_ref().map(build_feedback);
    let ranking = result.ranked();

    Ok(AnalysisReport {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        candidate_name: candidate_name.filter(|n| !n.trim().is_empty()),
        scorer_backend: scorer.backend(),
        result,
        ranking,
        feedback,
    })
}
