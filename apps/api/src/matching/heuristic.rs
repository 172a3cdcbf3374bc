//! Deterministic fallback scorer. No external calls.
//!
//! Points:
//! - skills: |required ∩ candidate| / |required| × 70 (0 when either set is empty)
//! - experience: +20 when the candidate has any free-text experience
//! - base: +10
//!
//! The total is capped at 100 and reported with confidence 0.6.

use async_trait::async_trait;

use crate::candidates::skills::normalized_skill_set;
use crate::matching::models::{CandidateRecord, JobSpec};
use crate::matching::scorer::{CandidateScorer, Evaluation, ScoringBackend, ScoringError};

const SKILL_POINTS: f64 = 70.0;
const EXPERIENCE_POINTS: f64 = 20.0;
const BASE_POINTS: f64 = 10.0;
const MAX_SCORE: f64 = 100.0;
const HEURISTIC_CONFIDENCE: f64 = 0.6;

pub struct HeuristicScorer;

#[async_trait]
impl CandidateScorer for HeuristicScorer {
    fn backend(&self) -> ScoringBackend {
        ScoringBackend::Heuristic
    }

    async fn evaluate(
        &self,
        job: &JobSpec,
        candidate: &CandidateRecord,
    ) -> Result<Evaluation, ScoringError> {
        heuristic_evaluation(job, candidate)
    }
}

pub fn heuristic_evaluation(
    job: &JobSpec,
    candidate: &CandidateRecord,
) -> Result<Evaluation, ScoringError> {
    let mut score = 0.0_f64;
    let mut explanation_parts = Vec::new();

    let required = normalized_skill_set(&job.required_skills);
    let offered = normalized_skill_set(&candidate.skills);

    if !required.is_empty() && !offered.is_empty() {
        let overlap = required.intersection(&offered).count();
        score += overlap as f64 / required.len() as f64 * SKILL_POINTS;
        explanation_parts.push(format!(
            "Skills match: {overlap}/{} required skills",
            required.len()
        ));
    }

    if candidate.has_experience() {
        score += EXPERIENCE_POINTS;
        explanation_parts.push("Candidate has relevant experience".to_string());
    }

    score += BASE_POINTS;

    if !score.is_finite() {
        return Err(ScoringError::Malformed(format!(
            "heuristic produced a non-finite score for candidate {}",
            candidate.id
        )));
    }

    let explanation = if explanation_parts.is_empty() {
        "Basic compatibility assessment".to_string()
    } else {
        explanation_parts.join("; ")
    };

    Ok(Evaluation::new(
        score.min(MAX_SCORE),
        explanation,
        HEURISTIC_CONFIDENCE,
        ScoringBackend::Heuristic,
    ))
}
