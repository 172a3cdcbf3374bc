//! Skill canonicalisation.
//!
//! Candidate skills arrive as a JSON list, a JSON-encoded list inside a string,
//! or a comma-separated string. They are reduced to one ordered,
//! case-insensitively de-duplicated `Vec<String>` at ingestion and stored as a
//! JSON array. Reads go through the same tolerant decoder so older rows load.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm_client::lenient::value_text;

/// Skills as accepted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

impl Default for SkillsInput {
    fn default() -> Self {
        SkillsInput::List(Vec::new())
    }
}

impl SkillsInput {
    pub fn into_canonical(self) -> Vec<String> {
        match self {
            SkillsInput::List(items) => canonicalize(items),
            SkillsInput::Text(raw) => parse_skill_field(&raw),
        }
    }
}

/// Decodes a stored or submitted skill string: JSON list first, then commas.
pub fn parse_skill_field(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw.trim()) {
        Ok(items) => canonicalize(items),
        Err(_) => canonicalize(raw.split(',').map(String::from)),
    }
}

/// Skills from an untyped JSON value such as an AI reply field. A list keeps
/// its scalar entries; a string goes through `parse_skill_field`.
pub fn skills_from_value(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => canonicalize(items.iter().filter_map(value_text)),
        Some(Value::String(raw)) => parse_skill_field(raw),
        _ => Vec::new(),
    }
}

/// Trims entries, drops blanks and removes case-insensitive duplicates,
/// keeping the first spelling seen.
pub fn canonicalize<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(normalize_skill(s)))
        .collect()
}

/// Comparison key for a skill: trimmed and lowercased.
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Normalized set used for overlap scoring.
pub fn normalized_skill_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect()
}

/// JSON array text for the `skills`/`required_skills` columns.
pub fn encode_skills(skills: &[String]) -> serde_json::Result<String> {
    serde_json::to_string(skills)
}
