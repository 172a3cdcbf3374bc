use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::candidates::skills::{parse_skill_field, SkillsInput};
use crate::errors::AppError;
use crate::jobs::repository::{get_all_jobs, get_job, insert_job, NewJob};
use crate::models::job::JobRow;
use crate::state::AppState;

const DEFAULT_JOB_TYPE: &str = "Full-time";

#[derive(Debug, Deserialize)]
pub struct JobRequest {
    pub title: String,
    pub requirements: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    #[serde(default)]
    pub required_skills: SkillsInput,
    pub experience_level: Option<String>,
    /// Structured requirements (e.g. a generated spec) kept verbatim.
    pub raw_requirements: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub requirements: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: String,
    pub required_skills: Vec<String>,
    pub experience_level: Option<String>,
    pub raw_requirements: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<JobRow> for JobResponse {
    fn from(row: JobRow) -> Self {
        Self {
            required_skills: parse_skill_field(&row.required_skills),
            raw_requirements: row
                .raw_requirements
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            id: row.id,
            title: row.title,
            requirements: row.requirements,
            company: row.company,
            location: row.location,
            salary_range: row.salary_range,
            job_type: row.job_type,
            experience_level: row.experience_level,
            created_at: row.created_at,
        }
    }
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    let title = required(&request.title, "title")?;
    let company = required(&request.company, "company")?;
    let requirements = required(&request.requirements, "requirements")?;
    let job_type = optional(request.job_type.as_deref()).unwrap_or(DEFAULT_JOB_TYPE);
    let required_skills = request.required_skills.into_canonical();

    let row = insert_job(
        &state.db,
        NewJob {
            title,
            requirements,
            company,
            location: optional(request.location.as_deref()),
            salary_range: optional(request.salary_range.as_deref()),
            job_type,
            required_skills: &required_skills,
            experience_level: optional(request.experience_level.as_deref()),
            raw_requirements: request.raw_requirements.as_ref(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobResponse>>, AppError> {
    let rows = get_all_jobs(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
) -> Result<Json<JobResponse>, AppError> {
    let row = get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(row.into()))
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
