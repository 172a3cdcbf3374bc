use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::candidates::skills::encode_skills;
use crate::models::candidate::CandidateRow;

/// Fields written when creating or refreshing a candidate.
pub struct NewCandidate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub skills: &'a [String],
    pub experience: Option<&'a str>,
    pub resume_path: Option<&'a str>,
    pub linkedin_url: Option<&'a str>,
    pub raw_data: Option<&'a serde_json::Value>,
}

/// Inserts a candidate, or updates the existing one with the same email.
/// Returns the stored row and `true` when a new row was created.
pub async fn upsert_candidate(
    pool: &SqlitePool,
    candidate: NewCandidate<'_>,
) -> Result<(CandidateRow, bool)> {
    let skills = encode_skills(candidate.skills)?;
    let raw_data = candidate.raw_data.map(serde_json::to_string).transpose()?;

    let existing = get_candidate_by_email(pool, candidate.email).await?;

    if let Some(existing) = existing {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            UPDATE candidates
            SET name = ?1, skills = ?2, experience = ?3, resume_path = ?4,
                linkedin_url = ?5, raw_data = ?6
            WHERE id = ?7
            RETURNING *
            "#,
        )
        .bind(candidate.name)
        .bind(&skills)
        .bind(candidate.experience)
        .bind(candidate.resume_path)
        .bind(candidate.linkedin_url)
        .bind(&raw_data)
        .bind(existing.id)
        .fetch_one(pool)
        .await?;

        info!("Updated candidate {} ({})", row.id, row.email);
        return Ok((row, false));
    }

    let row = sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (name, email, skills, experience, resume_path, linkedin_url, raw_data, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        RETURNING *
        "#,
    )
    .bind(candidate.name)
    .bind(candidate.email)
    .bind(&skills)
    .bind(candidate.experience)
    .bind(candidate.resume_path)
    .bind(candidate.linkedin_url)
    .bind(&raw_data)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    info!("Created candidate {} ({})", row.id, row.email);
    Ok((row, true))
}

pub async fn get_all_candidates(pool: &SqlitePool) -> Result<Vec<CandidateRow>> {
    let rows = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get_candidate(pool: &SqlitePool, candidate_id: i64) -> Result<Option<CandidateRow>> {
    let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = ?1")
        .bind(candidate_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn get_candidate_by_email(pool: &SqlitePool, email: &str) -> Result<Option<CandidateRow>> {
    let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE email = ?1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
