use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::candidates::linkedin::{
    fallback_profile, is_valid_linkedin_url, LinkedInProfile, NOT_FETCHED_REASON,
};
use crate::candidates::repository::{get_all_candidates, get_candidate, upsert_candidate, NewCandidate};
use crate::candidates::resume::{extract_skills, parse_resume, ParsedResume};
use crate::candidates::skills::{canonicalize, parse_skill_field, SkillsInput};
use crate::errors::AppError;
use crate::interests::repository::get_candidate_interests;
use crate::models::candidate::CandidateRow;
use crate::models::interest::CandidateInterestRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CandidateRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub skills: SkillsInput,
    pub experience: Option<String>,
    pub resume_path: Option<String>,
    pub linkedin_url: Option<String>,
    /// Structured profile (summary, experience entries) kept verbatim.
    pub raw_data: Option<serde_json::Value>,
}

/// Candidate as returned to clients: skills decoded, raw profile parsed.
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub resume_path: Option<String>,
    pub linkedin_url: Option<String>,
    pub raw_data: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CandidateRow> for CandidateResponse {
    fn from(row: CandidateRow) -> Self {
        Self {
            skills: parse_skill_field(&row.skills),
            raw_data: row
                .raw_data
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            id: row.id,
            name: row.name,
            email: row.email,
            experience: row.experience,
            resume_path: row.resume_path,
            linkedin_url: row.linkedin_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpsertCandidateResponse {
    pub candidate: CandidateResponse,
    pub created: bool,
}

/// POST /api/v1/candidates
///
/// Creates a candidate, or refreshes the one with the same email.
pub async fn handle_upsert_candidate(
    State(state): State<AppState>,
    Json(request): Json<CandidateRequest>,
) -> Result<(StatusCode, Json<UpsertCandidateResponse>), AppError> {
    let name = request.name.trim();
    let email = request.email.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(format!("'{email}' is not a valid email")));
    }

    let skills = request.skills.into_canonical();
    let experience = request
        .experience
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    let (row, created) = upsert_candidate(
        &state.db,
        NewCandidate {
            name,
            email: &email,
            skills: &skills,
            experience,
            resume_path: request.resume_path.as_deref(),
            linkedin_url: request.linkedin_url.as_deref(),
            raw_data: request.raw_data.as_ref(),
        },
    )
    .await?;

    Ok((
        status_for(created),
        Json(UpsertCandidateResponse {
            candidate: row.into(),
            created,
        }),
    ))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateResponse>>, AppError> {
    let rows = get_all_candidates(&state.db).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<i64>,
) -> Result<Json<CandidateResponse>, AppError> {
    let row = get_candidate(&state.db, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    Ok(Json(row.into()))
}

/// GET /api/v1/candidates/:id/interests
pub async fn handle_candidate_interests(
    State(state): State<AppState>,
    Path(candidate_id): Path<i64>,
) -> Result<Json<Vec<CandidateInterestRow>>, AppError> {
    let interests = get_candidate_interests(&state.db, candidate_id).await?;
    Ok(Json(interests))
}

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub text: String,
    /// Used when the resume itself carries no address.
    pub email: Option<String>,
    pub resume_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub success: bool,
    pub message: String,
    pub candidate_id: Option<i64>,
    pub parsed_data: ParsedResume,
    pub created: bool,
}

#[derive(Debug, Deserialize)]
pub struct ImportLinkedInRequest {
    pub profile_url: String,
    /// Replaces the placeholder address derived from the profile name.
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportLinkedInResponse {
    pub success: bool,
    pub message: String,
    pub candidate_id: i64,
    pub profile_data: LinkedInProfile,
    pub created: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: Vec<String>,
}

fn usable_email(raw: Option<&str>) -> Option<String> {
    raw.map(|e| e.trim().to_lowercase()).filter(|e| e.contains('@'))
}

fn status_for(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// POST /api/v1/candidates/parse-resume
///
/// Structures resume text with the AI service and stores the candidate under
/// the resume's email, or the request's when the resume has none. When the
/// resume cannot be parsed nothing is stored.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<(StatusCode, Json<ParseResumeResponse>), AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("resume text cannot be empty".to_string()));
    }

    let parsed = parse_resume(state.completion.as_ref(), text).await;
    if parsed.is_unavailable() {
        warn!("Resume could not be parsed; nothing stored");
        return Ok((
            StatusCode::OK,
            Json(ParseResumeResponse {
                success: false,
                message: "Resume could not be parsed; nothing was stored".to_string(),
                candidate_id: None,
                parsed_data: parsed,
                created: false,
            }),
        ));
    }

    let email = usable_email(Some(parsed.email.as_str()))
        .or_else(|| usable_email(request.email.as_deref()))
        .ok_or_else(|| {
            AppError::Validation(
                "the resume has no email address; supply one with the request".to_string(),
            )
        })?;
    let name = if parsed.name.is_empty() {
        "Unknown"
    } else {
        parsed.name.as_str()
    };
    let raw_data = serde_json::to_value(&parsed).map_err(anyhow::Error::from)?;

    let (row, created) = upsert_candidate(
        &state.db,
        NewCandidate {
            name,
            email: &email,
            skills: &parsed.skills,
            experience: Some(parsed.summary.as_str()).filter(|s| !s.is_empty()),
            resume_path: request.resume_path.as_deref(),
            linkedin_url: None,
            raw_data: Some(&raw_data),
        },
    )
    .await?;

    info!("Stored candidate {} from resume (created: {created})", row.id);

    let message = if created {
        "Resume parsed and candidate created"
    } else {
        "Resume parsed and candidate updated"
    };
    Ok((
        status_for(created),
        Json(ParseResumeResponse {
            success: true,
            message: message.to_string(),
            candidate_id: Some(row.id),
            parsed_data: parsed,
            created,
        }),
    ))
}

/// POST /api/v1/candidates/import-linkedin
pub async fn handle_import_linkedin(
    State(state): State<AppState>,
    Json(request): Json<ImportLinkedInRequest>,
) -> Result<(StatusCode, Json<ImportLinkedInResponse>), AppError> {
    let url = request.profile_url.trim();
    if !is_valid_linkedin_url(url) {
        return Err(AppError::Validation(format!(
            "'{url}' is not a LinkedIn profile URL"
        )));
    }

    let profile = fallback_profile(url, NOT_FETCHED_REASON);
    let email = usable_email(request.email.as_deref()).unwrap_or_else(|| profile.email.clone());
    let skills = canonicalize(profile.skills.iter().cloned());
    let raw_data = serde_json::to_value(&profile).map_err(anyhow::Error::from)?;

    let (row, created) = upsert_candidate(
        &state.db,
        NewCandidate {
            name: &profile.name,
            email: &email,
            skills: &skills,
            experience: Some(profile.summary.as_str()),
            resume_path: None,
            linkedin_url: Some(url),
            raw_data: Some(&raw_data),
        },
    )
    .await?;

    info!("Imported LinkedIn profile {url} as candidate {}", row.id);

    let message = if created {
        "LinkedIn profile imported"
    } else {
        "LinkedIn profile updated"
    };
    Ok((
        status_for(created),
        Json(ImportLinkedInResponse {
            success: true,
            message: message.to_string(),
            candidate_id: row.id,
            profile_data: profile,
            created,
        }),
    ))
}

/// POST /api/v1/candidates/extract-skills
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<ExtractSkillsRequest>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let skills = extract_skills(state.completion.as_ref(), text).await;
    Ok(Json(ExtractSkillsResponse { skills }))
}
