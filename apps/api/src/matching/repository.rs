use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::matching::{MatchRow, StoredMatchRow};

/// Stores a candidate's score for a job, replacing any earlier result.
pub async fn upsert_match(
    pool: &SqlitePool,
    candidate_id: i64,
    job_id: i64,
    score: f64,
    explanation: &str,
    confidence: f64,
) -> Result<MatchRow> {
    let row = sqlx::query_as::<_, MatchRow>(
        r#"
        INSERT INTO matches (candidate_id, job_id, score, explanation, confidence, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT (candidate_id, job_id) DO UPDATE SET
            score = excluded.score,
            explanation = excluded.explanation,
            confidence = excluded.confidence,
            created_at = excluded.created_at
        RETURNING *
        "#,
    )
    .bind(candidate_id)
    .bind(job_id)
    .bind(score)
    .bind(explanation)
    .bind(confidence)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Stored matches for a job with candidate details, best score first.
pub async fn get_matches_for_job(
    pool: &SqlitePool,
    job_id: i64,
    limit: i64,
) -> Result<Vec<StoredMatchRow>> {
    let rows = sqlx::query_as::<_, StoredMatchRow>(
        r#"
        SELECT m.id, m.candidate_id, m.job_id, m.score, m.explanation, m.confidence, m.created_at,
               c.name AS candidate_name, c.email AS candidate_email,
               c.skills AS candidate_skills, c.experience AS candidate_experience,
               c.linkedin_url
        FROM matches m
        JOIN candidates c ON m.candidate_id = c.id
        WHERE m.job_id = ?1
        ORDER BY m.score DESC, m.id ASC
        LIMIT ?2
        "#,
    )
    .bind(job_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
