use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::candidates::repository::{get_all_candidates, get_candidate};
use crate::candidates::skills::parse_skill_field;
use crate::errors::AppError;
use crate::jobs::repository::get_job;
use crate::matching::category::MatchCategory;
use crate::matching::models::{CandidateRecord, JobSpec, MatchResult};
use crate::matching::repository::{get_matches_for_job, upsert_match};
use crate::matching::requirements::GeneratedJobSpec;
use crate::models::matching::StoredMatchRow;
use crate::state::AppState;

const DEFAULT_STORED_MATCH_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobMatchesResponse {
    pub job_id: i64,
    pub job_title: String,
    pub candidates_evaluated: usize,
    pub matches: Vec<MatchResult>,
}

/// Stored match with the candidate's skills decoded and the category re-derived.
#[derive(Debug, Serialize)]
pub struct StoredMatchResponse {
    pub id: i64,
    pub candidate_id: i64,
    pub job_id: i64,
    pub score: f64,
    pub explanation: String,
    pub confidence: f64,
    pub match_category: MatchCategory,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_skills: Vec<String>,
    pub candidate_experience: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StoredMatchRow> for StoredMatchResponse {
    fn from(row: StoredMatchRow) -> Self {
        Self {
            match_category: MatchCategory::from_score(row.score),
            candidate_skills: parse_skill_field(&row.candidate_skills),
            id: row.id,
            candidate_id: row.candidate_id,
            job_id: row.job_id,
            score: row.score,
            explanation: row.explanation,
            confidence: row.confidence,
            candidate_name: row.candidate_name,
            candidate_email: row.candidate_email,
            candidate_experience: row.candidate_experience,
            linkedin_url: row.linkedin_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchScoreResponse {
    pub job_id: i64,
    pub candidate_id: i64,
    pub score: f64,
    pub match_category: MatchCategory,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequirementsRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateRequirementsResponse {
    pub success: bool,
    pub requirements: GeneratedJobSpec,
}

/// GET /api/v1/jobs/:id/match?limit=
///
/// Scores every candidate against the job, stores the results and returns
/// the top `limit` (default from config).
pub async fn handle_match_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<JobMatchesResponse>, AppError> {
    let job_row = get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let limit = params.limit.unwrap_or(state.config.default_match_limit);

    let job = JobSpec::from(&job_row);
    let candidates: Vec<CandidateRecord> = get_all_candidates(&state.db)
        .await?
        .iter()
        .map(CandidateRecord::from)
        .collect();

    let matches = state.matcher.match_candidates(&job, &candidates, limit).await;

    for result in &matches {
        if let Err(e) = upsert_match(
            &state.db,
            result.candidate_id,
            job_id,
            result.score,
            &result.explanation,
            result.confidence,
        )
        .await
        {
            warn!(
                "Failed to store match for candidate {} on job {job_id}: {e}",
                result.candidate_id
            );
        }
    }

    info!(
        "Job {job_id}: returned {} of {} candidates",
        matches.len(),
        candidates.len()
    );

    Ok(Json(JobMatchesResponse {
        job_id,
        job_title: job_row.title,
        candidates_evaluated: candidates.len(),
        matches,
    }))
}

/// GET /api/v1/jobs/:id/matches?limit=
pub async fn handle_stored_matches(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Vec<StoredMatchResponse>>, AppError> {
    get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let limit = params.limit.unwrap_or(DEFAULT_STORED_MATCH_LIMIT);
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    let rows = get_matches_for_job(&state.db, job_id, limit).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/jobs/:id/score/:candidate_id
///
/// Scores a single candidate without storing the result.
pub async fn handle_match_score(
    State(state): State<AppState>,
    Path((job_id, candidate_id)): Path<(i64, i64)>,
) -> Result<Json<MatchScoreResponse>, AppError> {
    let job_row = get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let candidate_row = get_candidate(&state.db, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let score = state
        .matcher
        .calculate_match_score(&JobSpec::from(&job_row), &CandidateRecord::from(&candidate_row))
        .await;

    Ok(Json(MatchScoreResponse {
        job_id,
        candidate_id,
        score,
        match_category: MatchCategory::from_score(score),
    }))
}

/// POST /api/v1/jobs/generate-requirements
pub async fn handle_generate_requirements(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequirementsRequest>,
) -> Result<Json<GenerateRequirementsResponse>, AppError> {
    let description = request.description.trim();
    if description.is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty".to_string(),
        ));
    }

    let requirements = state.matcher.generate_job_requirements(description).await;
    Ok(Json(GenerateRequirementsResponse {
        success: true,
        requirements,
    }))
}
