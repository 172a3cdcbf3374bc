//! Matching orchestrator.
//!
//! Flow per candidate: primary scorer → (recoverable error) fallback scorer →
//! (any error) `Evaluation::minimal()`. A `Rejected` candidate is logged and
//! left out of the results. Candidates are evaluated one at a time.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::llm_client::CompletionService;
use crate::matching::heuristic::HeuristicScorer;
use crate::matching::models::{CandidateRecord, JobSpec, MatchResult};
use crate::matching::requirements::{generate_job_spec, GeneratedJobSpec};
use crate::matching::scorer::{AiScorer, CandidateScorer, Evaluation, ScoringError};

/// Built once at startup and shared through `AppState`.
pub struct TalentMatcher {
    primary: Arc<dyn CandidateScorer>,
    fallback: Arc<dyn CandidateScorer>,
    completion: Arc<dyn CompletionService>,
}

impl TalentMatcher {
    /// AI scoring backed by `completion`, heuristic fallback.
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self::with_scorers(
            Arc::new(AiScorer::new(completion.clone())),
            Arc::new(HeuristicScorer),
            completion,
        )
    }

    pub fn with_scorers(
        primary: Arc<dyn CandidateScorer>,
        fallback: Arc<dyn CandidateScorer>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            primary,
            fallback,
            completion,
        }
    }

    /// Scores every candidate and returns at most `limit` results, best first.
    /// Equal scores keep their input order.
    pub async fn match_candidates(
        &self,
        job: &JobSpec,
        candidates: &[CandidateRecord],
        limit: usize,
    ) -> Vec<MatchResult> {
        info!(
            "Matching {} candidates to job: {}",
            candidates.len(),
            job.title
        );

        let mut matches = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.evaluate(job, candidate).await {
                Ok(evaluation) => matches.push(MatchResult::new(candidate, evaluation)),
                Err(e) => {
                    error!("Error evaluating candidate {}: {e}", candidate.name);
                }
            }
        }

        // sort_by is stable, so ties keep candidate order
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(limit);

        info!("Generated {} matches for job {}", matches.len(), job.title);
        matches
    }

    /// Numeric score only. A rejected candidate scores 0.
    pub async fn calculate_match_score(&self, job: &JobSpec, candidate: &CandidateRecord) -> f64 {
        match self.evaluate(job, candidate).await {
            Ok(evaluation) => evaluation.score,
            Err(e) => {
                error!("Error calculating match score: {e}");
                0.0
            }
        }
    }

    /// Runs the scorer chain for one candidate. Only a `Rejected` error escapes.
    pub async fn evaluate(
        &self,
        job: &JobSpec,
        candidate: &CandidateRecord,
    ) -> Result<Evaluation, ScoringError> {
        let primary_error = match self.primary.evaluate(job, candidate).await {
            Ok(evaluation) => return Ok(evaluation),
            Err(e) if !e.is_recoverable() => return Err(e),
            Err(e) => e,
        };

        warn!(
            "{:?} scoring failed for candidate {}, using {:?} fallback: {primary_error}",
            self.primary.backend(),
            candidate.id,
            self.fallback.backend()
        );

        match self.fallback.evaluate(job, candidate).await {
            Ok(evaluation) => Ok(evaluation),
            Err(e) if !e.is_recoverable() => Err(e),
            Err(e) => {
                error!("Error in fallback scoring for candidate {}: {e}", candidate.id);
                Ok(Evaluation::minimal())
            }
        }
    }

    pub async fn generate_job_requirements(&self, description: &str) -> GeneratedJobSpec {
        info!("Generating job requirements from description");
        generate_job_spec(self.completion.as_ref(), description).await
    }
}
