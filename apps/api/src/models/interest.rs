use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterestRow {
    pub id: i64,
    pub candidate_id: i64,
    pub job_id: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Interest joined with the job it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateInterestRow {
    pub id: i64,
    pub candidate_id: i64,
    pub job_id: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
}
