// Prompt constants for candidate evaluation and job-spec generation.

/// Role description for candidate evaluation. Wrapped with the JSON-only rule
/// from `llm_client::prompts` before sending.
pub const EVALUATION_ROLE: &str = "You are a senior technical recruiter who assesses how well a \
    candidate fits a job opening.

Weigh the evidence as follows:
1. Technical skill alignment: 40%
2. Relevance of prior experience: 30%
3. Match between past roles and this role: 20%
4. Overall qualifications: 10%

Report a score from 0 to 100, a concise explanation covering strengths and concerns, \
and a recommendation (Strong Match / Good Match / Potential Match / Poor Match). \
Base the assessment on what the profile states; do not assume missing facts.";

/// Evaluation prompt. Both summaries are inserted in one pass, so braces
/// inside job or candidate text are never treated as placeholders.
pub fn evaluation_prompt(job_summary: &str, candidate_summary: &str) -> String {
    format!(
        r#"JOB:
{job_summary}
CANDIDATE:
{candidate_summary}
Evaluate the candidate against the job. Return a JSON object with this schema:
{{
  "score": 85,
  "explanation": "Concise analysis of fit",
  "strengths": ["strength"],
  "concerns": ["concern"],
  "recommendation": "Strong Match",
  "confidence": 0.9
}}

"score" is a number from 0 to 100. "confidence" is a number from 0.0 to 1.0."#
    )
}

/// Role description for turning free text into a structured job spec.
pub const JOB_SPEC_ROLE: &str = "You turn informal hiring requests into structured job \
    specifications. Extract only what the text supports.";

/// Job-spec prompt template. Replace `{description}`.
pub const JOB_SPEC_PROMPT_TEMPLATE: &str = r#"Convert the hiring request below into a JSON object with this schema:
{
  "title": "Job Title",
  "required_skills": ["skill"],
  "experience_level": "Junior | Mid | Senior",
  "responsibilities": ["responsibility"],
  "nice_to_have": ["skill"],
  "company_context": "One or two sentences about the company or team",
  "location": "Location if mentioned, otherwise null",
  "job_type": "Full-time | Part-time | Contract"
}

HIRING REQUEST:
{description}"#;
