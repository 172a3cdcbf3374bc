//! Candidate scorers: a trait with two backends.
//!
//! `AiScorer` asks the completion service for a verdict; `HeuristicScorer`
//! (see `heuristic.rs`) computes one from skill overlap. The engine tries the
//! AI first and drops to the heuristic on any recoverable error.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::prompts::json_system;
use crate::llm_client::{strip_json_fences, CompletionService, LlmError, EVALUATION_SAMPLING};
use crate::matching::models::{CandidateRecord, JobSpec};
use crate::matching::profile::{format_candidate, format_job};
use crate::matching::prompts::{evaluation_prompt, EVALUATION_ROLE};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Which strategy produced an evaluation, reported for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringBackend {
    Ai,
    Heuristic,
    /// Fixed floor used when every strategy failed.
    Minimal,
}

/// Score, explanation and confidence for one candidate.
/// Only constructible through `new`, which clamps both numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    pub explanation: String,
    pub confidence: f64,
    pub backend: ScoringBackend,
}

impl Evaluation {
    pub fn new(
        score: f64,
        explanation: impl Into<String>,
        confidence: f64,
        backend: ScoringBackend,
    ) -> Self {
        Self {
            score: clamp_or_floor(score, 0.0, 100.0),
            explanation: explanation.into(),
            confidence: clamp_or_floor(confidence, 0.0, 1.0),
            backend,
        }
    }

    /// Result used when both strategies failed.
    pub fn minimal() -> Self {
        Self::new(
            25.0,
            "Unable to evaluate candidate match",
            0.3,
            ScoringBackend::Minimal,
        )
    }
}

/// Clamps into `[lo, hi]`; NaN becomes `lo`.
fn clamp_or_floor(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

#[derive(Debug, Error)]
pub enum ScoringError {
    /// Timeout, connectivity, non-2xx or missing credentials.
    #[error("completion service failed: {0}")]
    Service(#[from] LlmError),

    /// The reply was not a usable evaluation.
    #[error("malformed evaluation: {0}")]
    Malformed(String),

    /// The scorer refuses this candidate outright. Not retried on another
    /// backend, so the candidate is left out of the ranking.
    ///
    /// Neither built-in scorer raises it. `parse_evaluation` stringifies a
    /// non-string `explanation` instead of refusing the reply, and every other
    /// AI failure is `Service` or `Malformed`, which fall through to the
    /// heuristic. It exists for custom `CandidateScorer` implementations.
    #[allow(dead_code)]
    #[error("candidate rejected: {0}")]
    Rejected(String),
}

impl ScoringError {
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ScoringError::Rejected(_))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to add a scoring backend. `TalentMatcher` holds two of them
/// as `Arc<dyn CandidateScorer>`: a primary and a fallback.
#[async_trait]
pub trait CandidateScorer: Send + Sync {
    fn backend(&self) -> ScoringBackend;

    async fn evaluate(
        &self,
        job: &JobSpec,
        candidate: &CandidateRecord,
    ) -> Result<Evaluation, ScoringError>;
}

// ────────────────────────────────────────────────────────────────────────────
// AiScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct AiScorer {
    completion: Arc<dyn CompletionService>,
    system: String,
}

impl AiScorer {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            system: json_system(EVALUATION_ROLE),
        }
    }
}

#[async_trait]
impl CandidateScorer for AiScorer {
    fn backend(&self) -> ScoringBackend {
        ScoringBackend::Ai
    }

    async fn evaluate(
        &self,
        job: &JobSpec,
        candidate: &CandidateRecord,
    ) -> Result<Evaluation, ScoringError> {
        let prompt = evaluation_prompt(&format_job(job), &format_candidate(candidate));

        let reply = self
            .completion
            .complete(&self.system, &prompt, EVALUATION_SAMPLING)
            .await?;

        parse_evaluation(&reply)
    }
}

/// Decodes an evaluation reply. `strengths`, `concerns` and `recommendation`
/// may be present but are not read.
pub fn parse_evaluation(reply: &str) -> Result<Evaluation, ScoringError> {
    let value: Value = serde_json::from_str(strip_json_fences(reply))
        .map_err(|e| ScoringError::Malformed(format!("reply is not JSON: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| ScoringError::Malformed("reply is not a JSON object".to_string()))?;

    let score = numeric_field(object.get("score"), "score", 0.0)?;
    let confidence = numeric_field(object.get("confidence"), "confidence", 0.5)?;
    let explanation = match object.get("explanation") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => "No explanation provided".to_string(),
        Some(other) => other.to_string(),
    };

    Ok(Evaluation::new(score, explanation, confidence, ScoringBackend::Ai))
}

/// Accepts a JSON number or a numeric string; a missing key yields `default`.
fn numeric_field(value: Option<&Value>, name: &str, default: f64) -> Result<f64, ScoringError> {
    let number = match value {
        None => return Ok(default),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(ScoringError::Malformed(format!(
            "'{name}' is not a finite number: {}",
            value.map(Value::to_string).unwrap_or_default()
        ))),
    }
}
