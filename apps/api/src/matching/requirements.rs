//! Requirement generator: free text in, structured job spec out.

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::candidates::skills::skills_from_value;
use crate::llm_client::lenient::{text, text_list, Object};
use crate::llm_client::prompts::json_system;
use crate::llm_client::{complete_json, CompletionService, GENERATION_SAMPLING};
use crate::matching::prompts::{JOB_SPEC_PROMPT_TEMPLATE, JOB_SPEC_ROLE};

/// Characters of the submitted description kept in the stub's `company_context`.
const CONTEXT_PREVIEW_CHARS: usize = 200;

const DEFAULT_TITLE: &str = "Position";

/// Structured job specification produced from a free-text request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedJobSpec {
    pub title: String,
    pub required_skills: Vec<String>,
    pub experience_level: Option<String>,
    pub responsibilities: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub company_context: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

impl GeneratedJobSpec {
    /// Minimal record returned when the AI reply is unusable.
    pub fn stub(input: &str) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            required_skills: Vec::new(),
            experience_level: Some("Mid".to_string()),
            responsibilities: Vec::new(),
            nice_to_have: Vec::new(),
            company_context: Some(preview(input)),
            location: Some("Remote".to_string()),
            job_type: Some("Full-time".to_string()),
        }
    }

    /// Reads whatever the model supplied. Missing or `null` fields become
    /// empty; skills given as one string are split like submitted skills.
    fn from_reply(reply: &Object) -> Self {
        Self {
            title: text(reply, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            required_skills: skills_from_value(reply.get("required_skills")),
            experience_level: text(reply, "experience_level"),
            responsibilities: text_list(reply, "responsibilities"),
            nice_to_have: skills_from_value(reply.get("nice_to_have")),
            company_context: text(reply, "company_context"),
            location: text(reply, "location"),
            job_type: text(reply, "job_type"),
        }
    }
}

/// Asks the AI service for a job spec. Never fails: transport errors and
/// replies that are not a JSON object both yield `GeneratedJobSpec::stub`.
pub async fn generate_job_spec(
    completion: &dyn CompletionService,
    description: &str,
) -> GeneratedJobSpec {
    let prompt = JOB_SPEC_PROMPT_TEMPLATE.replace("{description}", description);
    let system = json_system(JOB_SPEC_ROLE);

    match complete_json::<Value>(completion, &system, &prompt, GENERATION_SAMPLING).await {
        Ok(Value::Object(reply)) => {
            let spec = GeneratedJobSpec::from_reply(&reply);
            info!("Generated job requirements for: {}", spec.title);
            spec
        }
        Ok(other) => {
            warn!("Job requirement reply was not an object ({other}), using stub");
            GeneratedJobSpec::stub(description)
        }
        Err(e) => {
            warn!("Job requirement generation fell back to stub: {e}");
            GeneratedJobSpec::stub(description)
        }
    }
}

fn preview(input: &str) -> String {
    if input.chars().count() > CONTEXT_PREVIEW_CHARS {
        let head: String = input.chars().take(CONTEXT_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::ScriptedCompletion;
    use crate::llm_client::LlmError;

    #[tokio::test]
    async fn test_valid_reply_is_returned() {
        let service = ScriptedCompletion::replying(
            r#"{
                "title": "Senior Rust Engineer",
                "required_skills": ["Rust", "Tokio"],
                "experience_level": "Senior",
                "responsibilities": ["Own the ingest pipeline"],
                "nice_to_have": ["Kafka"],
                "company_context": "Fintech scale-up",
                "location": null,
                "job_type": "Full-time"
            }"#,
        );

        let spec = generate_job_spec(&service, "We need a senior Rust person").await;
        assert_eq!(spec.title, "Senior Rust Engineer");
        assert_eq!(spec.required_skills, vec!["Rust", "Tokio"]);
        assert_eq!(spec.location, None);
        assert!(service.prompts.lock().unwrap()[0]
            .1
            .contains("We need a senior Rust person"));
    }

    #[tokio::test]
    async fn test_partial_reply_uses_defaults() {
        let service = ScriptedCompletion::replying(r#"{"title": "Designer"}"#);
        let spec = generate_job_spec(&service, "designer").await;
        assert_eq!(spec.title, "Designer");
        assert!(spec.required_skills.is_empty());
    }

    #[tokio::test]
    async fn test_null_fields_keep_the_rest_of_the_reply() {
        let service = ScriptedCompletion::replying(
            r#"{
                "title": "Senior Rust Engineer",
                "required_skills": ["Rust", null],
                "experience_level": null,
                "responsibilities": null,
                "nice_to_have": null,
                "company_context": null,
                "location": null,
                "job_type": "Contract"
            }"#,
        );

        let spec = generate_job_spec(&service, "Rust contractor wanted").await;
        assert_eq!(spec.title, "Senior Rust Engineer");
        assert_eq!(spec.required_skills, vec!["Rust"]);
        assert!(spec.nice_to_have.is_empty());
        assert!(spec.responsibilities.is_empty());
        assert_eq!(spec.experience_level, None);
        assert_eq!(spec.job_type.as_deref(), Some("Contract"));
    }

    #[tokio::test]
    async fn test_string_skills_are_split() {
        let service = ScriptedCompletion::replying(
            r#"{"title": "Data Analyst", "required_skills": "SQL, Python"}"#,
        );
        let spec = generate_job_spec(&service, "analyst").await;
        assert_eq!(spec.title, "Data Analyst");
        assert_eq!(spec.required_skills, vec!["SQL", "Python"]);
    }

    #[tokio::test]
    async fn test_null_title_falls_back_to_position() {
        let service = ScriptedCompletion::replying(r#"{"title": null, "required_skills": ["Go"]}"#);
        let spec = generate_job_spec(&service, "go dev").await;
        assert_eq!(spec.title, "Position");
        assert_eq!(spec.required_skills, vec!["Go"]);
        assert_eq!(spec.location, None);
    }

    #[tokio::test]
    async fn test_non_object_json_yields_stub() {
        let service = ScriptedCompletion::replying(r#"["Rust", "Go"]"#);
        let spec = generate_job_spec(&service, "polyglot").await;
        assert_eq!(spec, GeneratedJobSpec::stub("polyglot"));
    }

    #[tokio::test]
    async fn test_invalid_json_yields_stub() {
        let service = ScriptedCompletion::replying("Sure! Here is your job spec: ...");
        let spec = generate_job_spec(&service, "Looking for a data analyst").await;
        assert_eq!(spec, GeneratedJobSpec::stub("Looking for a data analyst"));
        assert_eq!(spec.title, "Position");
        assert_eq!(spec.experience_level.as_deref(), Some("Mid"));
        assert_eq!(spec.company_context.as_deref(), Some("Looking for a data analyst"));
    }

    #[tokio::test]
    async fn test_transport_error_yields_stub() {
        let service = ScriptedCompletion::new(vec![Err(LlmError::NotConfigured)]);
        let spec = generate_job_spec(&service, "anything").await;
        assert_eq!(spec.title, "Position");
    }

    #[test]
    fn test_stub_truncates_long_input_to_200_chars() {
        let input = "é".repeat(250);
        let context = GeneratedJobSpec::stub(&input).company_context.unwrap();
        assert!(context.ends_with("..."));
        assert_eq!(context.chars().count(), 203);
    }

    #[test]
    fn test_stub_keeps_exactly_200_chars_untouched() {
        let input = "a".repeat(200);
        assert_eq!(GeneratedJobSpec::stub(&input).company_context.unwrap(), input);
    }
}
