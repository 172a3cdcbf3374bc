//! Inputs and outputs of a matching call.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::candidates::skills::parse_skill_field;
use crate::matching::category::MatchCategory;
use crate::matching::insights::{extract_development_areas, extract_key_strengths};
use crate::matching::scorer::{Evaluation, ScoringBackend};
use crate::models::candidate::CandidateRow;
use crate::models::job::JobRow;

/// Job opening as seen by the matcher. Immutable for the duration of a call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub title: String,
    pub company: String,
    pub requirements: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub experience_level: Option<String>,
    pub location: Option<String>,
}

impl From<&JobRow> for JobSpec {
    fn from(row: &JobRow) -> Self {
        Self {
            title: row.title.clone(),
            company: row.company.clone(),
            requirements: row.requirements.clone(),
            required_skills: parse_skill_field(&row.required_skills),
            experience_level: row.experience_level.clone(),
            location: row.location.clone(),
        }
    }
}

/// One prior position from a structured profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
}

/// Structured profile data captured at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
}

/// Applicant as seen by the matcher. `skills` is already canonical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub raw_profile: Option<RawProfile>,
}

impl CandidateRecord {
    /// True when the experience field is present and non-empty. Whitespace
    /// counts; blank submissions are dropped before they are stored.
    pub fn has_experience(&self) -> bool {
        self.experience.as_deref().is_some_and(|e| !e.is_empty())
    }

    pub fn summary(&self) -> Option<&str> {
        self.raw_profile
            .as_ref()
            .and_then(|p| p.summary.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

impl From<&CandidateRow> for CandidateRecord {
    fn from(row: &CandidateRow) -> Self {
        let raw_profile = row.raw_data.as_deref().and_then(|raw| {
            serde_json::from_str::<RawProfile>(raw)
                .map_err(|e| warn!("Ignoring unreadable profile data for candidate {}: {e}", row.id))
                .ok()
        });

        Self {
            id: row.id,
            name: row.name.clone(),
            email: row.email.clone(),
            skills: parse_skill_field(&row.skills),
            experience: row.experience.clone(),
            raw_profile,
        }
    }
}

/// Scored outcome of one candidate against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_skills: Vec<String>,
    pub candidate_experience: Option<String>,
    /// 0 – 100
    pub score: f64,
    pub explanation: String,
    /// 0.0 – 1.0
    pub confidence: f64,
    pub match_category: MatchCategory,
    pub key_strengths: Vec<String>,
    pub areas_for_development: Vec<String>,
    pub scorer_backend: ScoringBackend,
}

impl MatchResult {
    pub fn new(candidate: &CandidateRecord, evaluation: Evaluation) -> Self {
        Self {
            candidate_id: candidate.id,
            candidate_name: if candidate.name.trim().is_empty() {
                "Unknown".to_string()
            } else {
                candidate.name.clone()
            },
            candidate_email: candidate.email.clone(),
            candidate_skills: candidate.skills.clone(),
            candidate_experience: candidate.experience.clone(),
            score: evaluation.score,
            match_category: MatchCategory::from_score(evaluation.score),
            key_strengths: extract_key_strengths(&evaluation.explanation),
            areas_for_development: extract_development_areas(&evaluation.explanation),
            confidence: evaluation.confidence,
            explanation: evaluation.explanation,
            scorer_backend: evaluation.backend,
        }
    }
}
