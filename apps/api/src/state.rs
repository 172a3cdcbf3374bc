use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::matching::TalentMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Built once at startup; owns the scorer chain and the completion client.
    pub matcher: Arc<TalentMatcher>,
    /// Same client the matcher holds, used directly for resume parsing.
    pub completion: Arc<dyn CompletionService>,
    pub config: Config,
}
