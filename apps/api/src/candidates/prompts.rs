// Prompt constants for resume parsing and skill extraction.

/// Role description for resume parsing. Wrapped with the JSON-only rule
/// from `llm_client::prompts` before sending.
pub const RESUME_ROLE: &str = "You are an expert resume parser. You extract structured \
    candidate information from resume text. Use only what the resume states; \
    leave a field empty when the resume does not mention it.";

/// Resume prompt template. Replace `{resume_text}`.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Return a JSON object with this schema:
{
  "name": "Full name",
  "email": "email@example.com",
  "phone": "Phone number",
  "skills": ["skill"],
  "experience": [
    {"title": "Job title", "company": "Company", "duration": "2020-2023", "description": "What they did"}
  ],
  "education": [
    {"degree": "Degree", "institution": "School", "year": "2018"}
  ],
  "summary": "Two or three sentences summarising the candidate"
}

Parse this resume:

{resume_text}"#;

/// Complete system prompt for skill extraction. The reply is a bare array,
/// so the object-oriented JSON rule is not appended.
pub const SKILLS_SYSTEM: &str = r#"Extract all technical skills, programming languages, frameworks, tools and relevant professional skills from the text the user sends.

Focus on:
- Programming languages (Python, JavaScript, Java)
- Frameworks and libraries (React, Django, Spring)
- Tools and platforms (AWS, Docker, Git)
- Technical skills (Machine Learning, Database Design)
- Professional skills (Project Management, Leadership)

Respond with a JSON array of strings only, for example ["Python", "React", "AWS"]. Do NOT use markdown code fences."#;
