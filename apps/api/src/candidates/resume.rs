//! Resume parser: plain resume text in, structured candidate profile out.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::candidates::prompts::{RESUME_PROMPT_TEMPLATE, RESUME_ROLE, SKILLS_SYSTEM};
use crate::candidates::skills::skills_from_value;
use crate::llm_client::lenient::{extract_object, object_list, text, Object};
use crate::llm_client::prompts::json_system;
use crate::llm_client::{complete_json, CompletionService, RESUME_SAMPLING, SKILLS_SAMPLING};

const UNKNOWN_NAME: &str = "Unknown";
const PARSE_FAILED_SUMMARY: &str =
    "Resume parsing failed. Please try uploading again or contact support.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeExperience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeEducation {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Profile extracted from a resume. Serialized as the candidate's `raw_data`,
/// where `summary` and `experience` feed the evaluation prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience: Vec<ResumeExperience>,
    pub education: Vec<ResumeEducation>,
    pub summary: String,
}

impl ParsedResume {
    /// Placeholder returned when the service fails or the reply holds no object.
    pub fn unavailable() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            summary: PARSE_FAILED_SUMMARY.to_string(),
            ..Default::default()
        }
    }

    pub fn is_unavailable(&self) -> bool {
        *self == Self::unavailable()
    }

    fn from_reply(reply: &Object) -> Self {
        let field = |object: &Object, key: &str| text(object, key).unwrap_or_default();

        Self {
            name: field(reply, "name"),
            email: field(reply, "email"),
            phone: field(reply, "phone"),
            skills: skills_from_value(reply.get("skills")),
            experience: object_list(reply, "experience")
                .into_iter()
                .map(|entry| ResumeExperience {
                    title: field(entry, "title"),
                    company: field(entry, "company"),
                    duration: field(entry, "duration"),
                    description: field(entry, "description"),
                })
                .collect(),
            education: object_list(reply, "education")
                .into_iter()
                .map(|entry| ResumeEducation {
                    degree: field(entry, "degree"),
                    institution: field(entry, "institution"),
                    year: field(entry, "year"),
                })
                .collect(),
            summary: field(reply, "summary"),
        }
    }
}

/// Asks the AI service to structure a resume. Never fails: a transport error
/// or a reply with no recoverable JSON object yields `ParsedResume::unavailable`.
pub async fn parse_resume(completion: &dyn CompletionService, resume_text: &str) -> ParsedResume {
    let prompt = RESUME_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let system = json_system(RESUME_ROLE);

    let reply = match completion.complete(&system, &prompt, RESUME_SAMPLING).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Resume parsing failed: {e}");
            return ParsedResume::unavailable();
        }
    };

    match extract_object(&reply) {
        Some(object) => {
            let parsed = ParsedResume::from_reply(&object);
            info!(
                "Parsed resume for {} ({} skills)",
                parsed.name,
                parsed.skills.len()
            );
            parsed
        }
        None => {
            warn!("Resume reply held no JSON object");
            ParsedResume::unavailable()
        }
    }
}

/// Pulls a skill list out of arbitrary text. Anything but a JSON array
/// yields an empty list.
pub async fn extract_skills(completion: &dyn CompletionService, input: &str) -> Vec<String> {
    match complete_json::<Value>(completion, SKILLS_SYSTEM, input, SKILLS_SAMPLING).await {
        Ok(value @ Value::Array(_)) => skills_from_value(Some(&value)),
        Ok(_) => {
            warn!("Skill extraction reply was not a JSON array");
            Vec::new()
        }
        Err(e) => {
            warn!("Skill extraction failed: {e}");
            Vec::new()
        }
    }
}
