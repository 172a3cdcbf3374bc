use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `candidates` table. `skills` and `raw_data` hold JSON text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub skills: String,
    pub experience: Option<String>,
    pub resume_path: Option<String>,
    pub linkedin_url: Option<String>,
    pub raw_data: Option<String>,
    pub created_at: DateTime<Utc>,
}
