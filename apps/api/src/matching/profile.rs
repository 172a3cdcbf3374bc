//! Renders jobs and candidates into the plain-text blocks the AI scorer reads.

use std::fmt::Write;

use crate::matching::models::{CandidateRecord, JobSpec};

/// Prior positions included in a candidate block.
const MAX_WORK_HISTORY: usize = 3;

pub fn format_job(job: &JobSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Title: {}", or_unknown(&job.title));
    let _ = writeln!(out, "Company: {}", or_unknown(&job.company));

    if !job.requirements.trim().is_empty() {
        let _ = writeln!(out, "Requirements: {}", job.requirements.trim());
    }
    if !job.required_skills.is_empty() {
        let _ = writeln!(out, "Required Skills: {}", job.required_skills.join(", "));
    }
    if let Some(level) = non_blank(job.experience_level.as_deref()) {
        let _ = writeln!(out, "Experience Level: {level}");
    }
    if let Some(location) = non_blank(job.location.as_deref()) {
        let _ = writeln!(out, "Location: {location}");
    }
    out
}

pub fn format_candidate(candidate: &CandidateRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", or_unknown(&candidate.name));

    if !candidate.skills.is_empty() {
        let _ = writeln!(out, "Skills: {}", candidate.skills.join(", "));
    }
    if let Some(experience) = non_blank(candidate.experience.as_deref()) {
        let _ = writeln!(out, "Experience: {experience}");
    }
    if let Some(summary) = candidate.summary() {
        let _ = writeln!(out, "Summary: {}", summary.trim());
    }

    let history = candidate
        .raw_profile
        .as_ref()
        .map(|p| p.experience.as_slice())
        .unwrap_or_default();
    if !history.is_empty() {
        out.push_str("Work Experience:\n");
        for entry in history.iter().take(MAX_WORK_HISTORY) {
            let _ = writeln!(
                out,
                "- {} at {} ({})",
                entry.title, entry.company, entry.duration
            );
        }
    }
    out
}

fn or_unknown(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        "Unknown"
    } else {
        value
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
