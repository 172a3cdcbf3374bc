use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::candidates::repository::get_candidate;
use crate::errors::AppError;
use crate::interests::repository::upsert_interest;
use crate::jobs::repository::get_job;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InterestRequest {
    pub candidate_id: i64,
    pub job_id: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InterestResponse {
    pub success: bool,
    pub message: String,
    pub interest_id: i64,
}

/// POST /api/v1/interests
///
/// Records that a candidate is interested in a job.
pub async fn handle_express_interest(
    State(state): State<AppState>,
    Json(request): Json<InterestRequest>,
) -> Result<Json<InterestResponse>, AppError> {
    get_candidate(&state.db, request.candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", request.candidate_id)))?;
    get_job(&state.db, request.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", request.job_id)))?;

    let interest = upsert_interest(
        &state.db,
        request.candidate_id,
        request.job_id,
        "interested",
        request.notes.as_deref(),
    )
    .await?;

    info!(
        "Interest recorded: candidate {} -> job {}",
        request.candidate_id, request.job_id
    );

    Ok(Json(InterestResponse {
        success: true,
        message: "Interest recorded successfully".to_string(),
        interest_id: interest.id,
    }))
}
