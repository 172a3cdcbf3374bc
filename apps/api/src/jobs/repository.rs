use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::candidates::skills::encode_skills;
use crate::models::job::JobRow;

pub struct NewJob<'a> {
    pub title: &'a str,
    pub requirements: &'a str,
    pub company: &'a str,
    pub location: Option<&'a str>,
    pub salary_range: Option<&'a str>,
    pub job_type: &'a str,
    pub required_skills: &'a [String],
    pub experience_level: Option<&'a str>,
    pub raw_requirements: Option<&'a serde_json::Value>,
}

pub async fn insert_job(pool: &SqlitePool, job: NewJob<'_>) -> Result<JobRow> {
    let required_skills = encode_skills(job.required_skills)?;
    let raw_requirements = job
        .raw_requirements
        .map(serde_json::to_string)
        .transpose()?;

    let row = sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (title, requirements, company, location, salary_range, job_type,
             required_skills, experience_level, raw_requirements, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        RETURNING *
        "#,
    )
    .bind(job.title)
    .bind(job.requirements)
    .bind(job.company)
    .bind(job.location)
    .bind(job.salary_range)
    .bind(job.job_type)
    .bind(&required_skills)
    .bind(job.experience_level)
    .bind(&raw_requirements)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    info!("Created job {} ({} at {})", row.id, row.title, row.company);
    Ok(row)
}

pub async fn get_all_jobs(pool: &SqlitePool) -> Result<Vec<JobRow>> {
    let rows = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get_job(pool: &SqlitePool, job_id: i64) -> Result<Option<JobRow>> {
    let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = ?1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
