use std::sync::Arc;

use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::scoring::MatchScorer;
use crate::config::Config;
use crate::models::role::RoleCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Roles loaded from the job description file at startup. Read-only.
    pub roles: Arc<RoleCatalog>,
    /// Normalizer built once from the configured stopword set.
    pub normalizer: TextNormalizer,
    /// Pluggable match scorer. Default: PairwiseTfidfScorer. Swap via SCORER env.
    pub scorer: Arc<dyn MatchScorer>,
}
