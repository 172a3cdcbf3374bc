//! LinkedIn import.
//!
//! Profiles are not fetched from LinkedIn. A validated profile URL is turned
//! into a placeholder profile whose name comes from the URL slug, so the
//! candidate can be stored and enriched later.

use reqwest::Url;
use serde::Serialize;

pub const NOT_FETCHED_REASON: &str = "profile fetching is not enabled";

const FALLBACK_NAME: &str = "LinkedIn User";
const FALLBACK_SKILLS: [&str; 5] = [
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
    "Professional Skills",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileExperience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileEducation {
    pub school: String,
    pub degree: String,
    pub year: String,
}

/// Imported profile. Serialized as the candidate's `raw_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedInProfile {
    pub url: String,
    pub name: String,
    pub title: String,
    pub location: String,
    pub summary: String,
    pub experience: Vec<ProfileExperience>,
    pub education: Vec<ProfileEducation>,
    pub skills: Vec<String>,
    pub email: String,
    pub is_fallback: bool,
    pub fetch_error: String,
}

/// A LinkedIn member URL: http(s), a `linkedin.com` host and an `/in/` path.
pub fn is_valid_linkedin_url(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw.trim()) else {
        return false;
    };
    let host_ok = url
        .host_str()
        .is_some_and(|host| host == "linkedin.com" || host.ends_with(".linkedin.com"));

    matches!(url.scheme(), "http" | "https") && host_ok && url.path().contains("/in/")
}

/// Placeholder profile for `url`, recording why nothing was fetched.
pub fn fallback_profile(url: &str, reason: &str) -> LinkedInProfile {
    let name = name_from_url(url).unwrap_or_else(|| FALLBACK_NAME.to_string());

    LinkedInProfile {
        url: url.trim().to_string(),
        email: generate_email(&name),
        title: "Professional".to_string(),
        location: "Location Not Available".to_string(),
        summary: format!(
            "Profile information could not be retrieved ({reason}). This is a fallback profile."
        ),
        experience: vec![ProfileExperience {
            title: "Professional Role".to_string(),
            company: "Various Companies".to_string(),
            duration: "Recent".to_string(),
            description: "Professional experience not available due to privacy settings."
                .to_string(),
        }],
        education: vec![ProfileEducation {
            school: "Educational Institution".to_string(),
            degree: "Degree".to_string(),
            year: "Recent".to_string(),
        }],
        skills: FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect(),
        is_fallback: true,
        fetch_error: reason.to_string(),
        name,
    }
}

/// Display name from the last path segment: `john-doe` becomes `John Doe`.
fn name_from_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let slug = url.path_segments()?.filter(|s| !s.is_empty()).next_back()?;

    let name = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Placeholder address: `first.last@email.com`, `name@email.com` or
/// `user@email.com` depending on how many words the name has.
pub fn generate_email(name: &str) -> String {
    let lower = name.to_lowercase();
    let parts: Vec<&str> = lower.split_whitespace().collect();

    match parts.as_slice() {
        [] => "user@email.com".to_string(),
        [only] => format!("{only}@email.com"),
        [first, .., last] => format!("{first}.{last}@email.com"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_member_urls() {
        assert!(is_valid_linkedin_url("https://www.linkedin.com/in/john-doe"));
        assert!(is_valid_linkedin_url("https://linkedin.com/in/jane/"));
        assert!(is_valid_linkedin_url(" http://uk.linkedin.com/in/sam "));
    }

    #[test]
    fn test_rejects_other_urls() {
        assert!(!is_valid_linkedin_url("https://www.linkedin.com/company/acme"));
        assert!(!is_valid_linkedin_url("https://notlinkedin.com/in/john"));
        assert!(!is_valid_linkedin_url("https://example.com/in/john"));
        assert!(!is_valid_linkedin_url("ftp://linkedin.com/in/john"));
        assert!(!is_valid_linkedin_url("linkedin.com/in/john"));
        assert!(!is_valid_linkedin_url(""));
    }

    #[test]
    fn test_fallback_profile_derives_name_and_email_from_slug() {
        let profile = fallback_profile("https://www.linkedin.com/in/john-doe/", "offline");
        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.email, "john.doe@email.com");
        assert!(profile.is_fallback);
        assert_eq!(
            profile.summary,
            "Profile information could not be retrieved (offline). This is a fallback profile."
        );
        assert_eq!(profile.skills.len(), 5);
        assert_eq!(profile.experience[0].company, "Various Companies");
    }

    #[test]
    fn test_fallback_name_normalises_case() {
        let profile = fallback_profile("https://linkedin.com/in/MARY-ann-SMITH", "x");
        assert_eq!(profile.name, "Mary Ann Smith");
        assert_eq!(profile.email, "mary.smith@email.com");
    }

    #[test]
    fn test_unparseable_url_uses_generic_name() {
        let profile = fallback_profile("not a url", "x");
        assert_eq!(profile.name, "LinkedIn User");
        assert_eq!(profile.email, "linkedin.user@email.com");
    }

    #[test]
    fn test_generate_email_by_word_count() {
        assert_eq!(generate_email("Ada Lovelace"), "ada.lovelace@email.com");
        assert_eq!(generate_email("Plato"), "plato@email.com");
        assert_eq!(generate_email("   "), "user@email.com");
    }
}
