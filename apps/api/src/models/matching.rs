use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub candidate_id: i64,
    pub job_id: i64,
    pub score: f64,
    pub explanation: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

/// Stored match joined with the candidate's contact details.
#[derive(Debug, Clone, FromRow)]
pub struct StoredMatchRow {
    pub id: i64,
    pub candidate_id: i64,
    pub job_id: i64,
    pub score: f64,
    pub explanation: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_skills: String,
    pub candidate_experience: Option<String>,
    pub linkedin_url: Option<String>,
}
