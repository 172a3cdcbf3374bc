use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `jobs` table. `required_skills` holds a JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub requirements: String,
    pub company: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: String,
    pub required_skills: String,
    pub experience_level: Option<String>,
    pub raw_requirements: Option<String>,
    pub created_at: DateTime<Utc>,
}
