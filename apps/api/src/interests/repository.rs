use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::interest::{CandidateInterestRow, InterestRow};

/// Records (or replaces) a candidate's interest in a job.
pub async fn upsert_interest(
    pool: &SqlitePool,
    candidate_id: i64,
    job_id: i64,
    status: &str,
    notes: Option<&str>,
) -> Result<InterestRow> {
    let row = sqlx::query_as::<_, InterestRow>(
        r#"
        INSERT INTO interests (candidate_id, job_id, status, notes, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT (candidate_id, job_id) DO UPDATE SET
            status = excluded.status,
            notes = excluded.notes,
            created_at = excluded.created_at
        RETURNING *
        "#,
    )
    .bind(candidate_id)
    .bind(job_id)
    .bind(status)
    .bind(notes)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// All jobs a candidate has shown interest in, newest first.
pub async fn get_candidate_interests(
    pool: &SqlitePool,
    candidate_id: i64,
) -> Result<Vec<CandidateInterestRow>> {
    let rows = sqlx::query_as::<_, CandidateInterestRow>(
        r#"
        SELECT i.id, i.candidate_id, i.job_id, i.status, i.notes, i.created_at,
               j.title, j.company, j.location
        FROM interests i
        JOIN jobs j ON i.job_id = j.id
        WHERE i.candidate_id = ?1
        ORDER BY i.created_at DESC, i.id DESC
        "#,
    )
    .bind(candidate_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
