//! Keyword-derived strength and gap lists attached to every match.

const MAX_STRENGTHS: usize = 3;
const MAX_DEVELOPMENT_AREAS: usize = 2;

pub fn extract_key_strengths(explanation: &str) -> Vec<String> {
    let text = explanation.to_lowercase();
    let mut strengths = Vec::new();
    if text.contains("strong") {
        strengths.push("Strong technical skills".to_string());
    }
    if text.contains("experience") {
        strengths.push("Relevant experience".to_string());
    }
    if text.contains("match") {
        strengths.push("Good role alignment".to_string());
    }
    strengths.truncate(MAX_STRENGTHS);
    strengths
}

pub fn extract_development_areas(explanation: &str) -> Vec<String> {
    let text = explanation.to_lowercase();
    let mut areas = Vec::new();
    if text.contains("lack") || text.contains("missing") {
        areas.push("Some skill gaps identified".to_string());
    }
    if text.contains("junior") {
        areas.push("Could benefit from more experience".to_string());
    }
    areas.truncate(MAX_DEVELOPMENT_AREAS);
    areas
}
