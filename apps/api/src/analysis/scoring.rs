//! Match scoring — pluggable, trait-based scorer that measures a resume
//! against every role in a catalog.
//!
//! Default: `PairwiseTfidfScorer` (fresh two-document TF-IDF space per role).
//! Alternative: `SharedCorpusScorer` (one TF-IDF space over resume + all roles).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`, chosen at startup via config.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::tfidf::{cosine_similarity, pairwise_similarity, Corpus};
use crate::models::role::RoleCatalog;

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Scores for a single role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleScore {
    pub role: String,
    pub raw_score: u32,        // 0 – 100, rounded cosine similarity
    pub normalized_score: u32, // share of the raw total, 0 – 100
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BestMatch {
    pub role: String,
    pub normalized_score: u32,
    pub raw_score: u32,
}

/// Full result of one analysis. `scores` follows catalog order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub scores: Vec<RoleScore>,
    /// `None` when every raw score is zero.
    pub best_match: Option<BestMatch>,
}

impl MatchResult {
    #[cfg(test)]
    pub fn raw_score(&self, role: &str) -> Option<u32> {
        self.find(role).map(|s| s.raw_score)
    }

    #[cfg(test)]
    pub fn normalized_score(&self, role: &str) -> Option<u32> {
        self.find(role).map(|s| s.normalized_score)
    }

    pub fn raw_total(&self) -> u32 {
        self.scores.iter().map(|s| s.raw_score).sum()
    }

    pub fn normalized_total(&self) -> u32 {
        self.scores.iter().map(|s| s.normalized_score).sum()
    }

    /// Roles ordered by normalized score, highest first. Equal scores keep
    /// catalog order.
    pub fn ranked(&self) -> Vec<RoleScore> {
        let mut ranked = self.scores.clone();
        ranked.sort_by(|a, b| b.normalized_score.cmp(&a.normalized_score));
        ranked
    }

    #[cfg(test)]
    fn find(&self, role: &str) -> Option<&RoleScore> {
        self.scores.iter().find(|s| s.role == role)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Resume contains no scorable text")]
    EmptyResume,

    #[error("No job roles to compare against")]
    NoRoles,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerBackend {
    #[default]
    Pairwise,
    Shared,
}

impl ScorerBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScorerBackend::Pairwise => "pairwise",
            ScorerBackend::Shared => "shared",
        }
    }
}

impl fmt::Display for ScorerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScorerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pairwise" => Ok(ScorerBackend::Pairwise),
            "shared" => Ok(ScorerBackend::Shared),
            other => Err(format!(
                "unknown scorer '{other}' (expected 'pairwise' or 'shared')"
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. A backend only decides how similarity is measured;
/// percentage conversion, normalization and best-match selection are shared.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
pub trait MatchScorer: Send + Sync {
    fn backend(&self) -> ScorerBackend;

    /// Cosine similarity in [0, 1] for every role, in catalog order.
    fn similarities(&self, resume_clean: &str, roles: &RoleCatalog) -> Vec<f64>;

    fn score(
        &self,
        resume_clean: &str,
        roles: &RoleCatalog,
    ) -> Result<MatchResult, AnalysisError> {
        if roles.is_empty() {
            return Err(AnalysisError::NoRoles);
        }
        if resume_clean.trim().is_empty() {
            return Err(AnalysisError::EmptyResume);
        }

        let raw_scores: Vec<u32> = self
            .similarities(resume_clean, roles)
            .into_iter()
            .map(|sim| round_percent(sim * 100.0))
            .collect();

        for (role, raw) in roles.iter().zip(&raw_scores) {
            tracing::debug!(
                role = %role.name,
                raw_score = raw,
                backend = %self.backend(),
                "role scored"
            );
        }

        let normalized = normalize_scores(&raw_scores);
        let scores: Vec<RoleScore> = roles
            .iter()
            .zip(raw_scores.iter().zip(&normalized))
            .map(|(role, (&raw_score, &normalized_score))| RoleScore {
                role: role.name.clone(),
                raw_score,
                normalized_score,
            })
            .collect();

        let best_match = select_best(&scores);
        Ok(MatchResult { scores, best_match })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backends
// ────────────────────────────────────────────────────────────────────────────

/// Each role is compared in its own two-document corpus {resume, role}, so
/// IDF weights differ from role to role.
pub struct PairwiseTfidfScorer;

impl MatchScorer for PairwiseTfidfScorer {
    fn backend(&self) -> ScorerBackend {
        ScorerBackend::Pairwise
    }

    fn similarities(&self, resume_clean: &str, roles: &RoleCatalog) -> Vec<f64> {
        roles
            .iter()
            .map(|role| pairwise_similarity(resume_clean, &role.cleaned_text))
            .collect()
    }
}

/// One corpus over the resume and every role; all roles share a vocabulary
/// and IDF weights.
pub struct SharedCorpusScorer;

impl MatchScorer for SharedCorpusScorer {
    fn backend(&self) -> ScorerBackend {
        ScorerBackend::Shared
    }

    fn similarities(&self, resume_clean: &str, roles: &RoleCatalog) -> Vec<f64> {
        let corpus = Corpus::fit(
            std::iter::once(resume_clean).chain(roles.iter().map(|r| r.cleaned_text.as_str())),
        );
        let resume_vector = corpus.vectorize(resume_clean);
        roles
            .iter()
            .map(|role| cosine_similarity(&resume_vector, &corpus.vectorize(&role.cleaned_text)))
            .collect()
    }
}

pub fn scorer_for(backend: ScorerBackend) -> Arc<dyn MatchScorer> {
    match backend {
        ScorerBackend::Pairwise => Arc::new(PairwiseTfidfScorer),
        ScorerBackend::Shared => Arc::new(SharedCorpusScorer),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Percentages
// ────────────────────────────────────────────────────────────────────────────

/// Rounds to the nearest integer, ties to even (0.5 -> 0, 1.5 -> 2, 2.5 -> 2).
pub fn round_percent(value: f64) -> u32 {
    value.round_ties_even().clamp(0.0, 100.0) as u32
}

/// Rescales raw scores so they sum to ~100. A zero total yields all zeros.
pub fn normalize_scores(raw_scores: &[u32]) -> Vec<u32> {
    let total: u32 = raw_scores.iter().sum();
    if total == 0 {
        tracing::debug!(
            roles = raw_scores.len(),
            "all raw scores are zero; normalized scores set to zero"
        );
        return vec![0; raw_scores.len()];
    }
    raw_scores
        .iter()
        .map(|&raw| round_percent((raw as f64 / total as f64) * 100.0))
        .collect()
}

/// First role holding the strictly greatest normalized score. `None` when
/// nothing scored.
pub fn select_best(scores: &[RoleScore]) -> Option<BestMatch> {
    if scores.iter().all(|s| s.raw_score == 0) {
        return None;
    }

    let mut best: Option<&RoleScore> = None;
    for score in scores {
        if best.map_or(true, |b| score.normalized_score > b.normalized_score) {
            best = Some(score);
        }
    }

    best.map(|s| BestMatch {
        role: s.role.clone(),
        normalized_score: s.normalized_score,
        raw_score: s.raw_score,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
