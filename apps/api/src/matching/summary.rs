//! Summary Generator: a short recruiter-facing explanation of a `ScoreBreakdown`.
//!
//! Sentences, each appended only when its rule fires:
//! 1. opening by total score: > 0.8 top-tier, > 0.6 promising, else low match
//! 2. up to 3 matched skills
//! 3. up to 3 required skills that were not matched
//! 4. semantic remark: > 0.7 strong alignment, < 0.4 divergence, else nothing

use std::collections::HashSet;

use crate::matching::engine::ScoreBreakdown;

const TOP_TIER_THRESHOLD: f64 = 0.8;
const PROMISING_THRESHOLD: f64 = 0.6;
const STRONG_ALIGNMENT_THRESHOLD: f64 = 0.7;
const DIVERGENCE_THRESHOLD: f64 = 0.4;
const MAX_LISTED_SKILLS: usize = 3;

pub fn summarize(breakdown: &ScoreBreakdown, job_required_skills: &[String]) -> String {
    let percent = (breakdown.total_score * 100.0) as i64;
    let mut sentences = Vec::with_capacity(4);

    sentences.push(opening_sentence(breakdown.total_score, percent));

    if !breakdown.matched_skills.is_empty() {
        sentences.push(format!(
            "Brings relevant expertise in {}.",
            first_n(&breakdown.matched_skills)
        ));
    }

    let missing = missing_skills(&breakdown.matched_skills, job_required_skills);
    if !missing.is_empty() {
        sentences.push(format!(
            "However, appears to lack specific mention of: {}.",
            first_n(&missing)
        ));
    }

    if breakdown.semantic_score > STRONG_ALIGNMENT_THRESHOLD {
        sentences.push("Contextual analysis suggests strong domain alignment.".to_string());
    } else if breakdown.semantic_score < DIVERGENCE_THRESHOLD {
        sentences.push("Resume context differs significantly from the job description.".to_string());
    }

    sentences.join(" ")
}

fn opening_sentence(total: f64, percent: i64) -> String {
    if total > TOP_TIER_THRESHOLD {
        format!("Top-tier candidate with a strong {percent}% match score.")
    } else if total > PROMISING_THRESHOLD {
        format!("Promising candidate with a {percent}% match.")
    } else {
        format!("Low match probability ({percent}%). Candidate may not be suitable.")
    }
}

/// Required skills absent from `matched`, compared case-insensitively, in job order.
/// Case-duplicates collapse to their first entry, keeping that entry's casing.
fn missing_skills(matched: &[String], required: &[String]) -> Vec<String> {
    let matched: HashSet<String> = matched.iter().map(|s| s.to_lowercase()).collect();
    let mut seen = HashSet::new();
    required
        .iter()
        .filter(|s| {
            let key = s.to_lowercase();
            !matched.contains(&key) && seen.insert(key)
        })
        .cloned()
        .collect()
}

fn first_n(items: &[String]) -> String {
    items
        .iter()
        .take(MAX_LISTED_SKILLS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(total: f64, semantic: f64, matched: &[&str]) -> ScoreBreakdown {
        ScoreBreakdown {
            total_score: total,
            semantic_score: semantic,
            skill_score: 0.0,
            matched_skills: matched.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn required(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_top_tier_opening() {
        let summary = summarize(&breakdown(0.82, 0.5, &[]), &[]);
        assert!(summary.starts_with("Top-tier candidate"), "{summary}");
    }

    #[test]
    fn test_low_match_opening() {
        let summary = summarize(&breakdown(0.55, 0.5, &[]), &[]);
        assert!(summary.starts_with("Low match probability"), "{summary}");
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(summarize(&breakdown(0.8, 0.5, &[]), &[]).starts_with("Promising candidate"));
        assert!(summarize(&breakdown(0.6, 0.5, &[]), &[]).starts_with("Low match probability"));
    }

    #[test]
    fn test_percent_truncates() {
        let summary = summarize(&breakdown(0.25, 0.5, &[]), &[]);
        assert_eq!(
            summary,
            "Low match probability (25%). Candidate may not be suitable."
        );
    }

    #[test]
    fn test_lists_at_most_three_matched_and_missing() {
        let summary = summarize(
            &breakdown(0.7, 0.5, &["python", "nlp", "flask", "sql"]),
            &required(&["Python", "NLP", "Flask", "SQL", "Docker", "AWS", "Git", "Azure"]),
        );
        assert!(summary.contains("Brings relevant expertise in python, nlp, flask."));
        assert!(summary.contains("lack specific mention of: Docker, AWS, Git."));
        assert!(!summary.contains("sql,"));
        assert!(!summary.contains("Azure"));
    }

    #[test]
    fn test_missing_is_case_insensitive() {
        let summary = summarize(
            &breakdown(0.7, 0.5, &["python"]),
            &required(&["PYTHON", "Docker"]),
        );
        assert!(summary.contains("lack specific mention of: Docker."));
        assert!(!summary.contains("PYTHON"));
    }

    #[test]
    fn test_missing_collapses_case_duplicates() {
        let summary = summarize(
            &breakdown(0.5, 0.5, &["python"]),
            &required(&["Docker", "docker", "Python", "DOCKER"]),
        );
        assert!(summary.contains("lack specific mention of: Docker."), "{summary}");
        assert!(!summary.contains("docker"));
    }

    #[test]
    fn test_semantic_remarks() {
        assert!(summarize(&breakdown(0.5, 0.71, &[]), &[]).ends_with("strong domain alignment."));
        assert!(summarize(&breakdown(0.5, 0.39, &[]), &[])
            .ends_with("differs significantly from the job description."));
    }

    #[test]
    fn test_middle_semantic_band_is_silent() {
        let summary = summarize(&breakdown(0.5, 0.55, &[]), &[]);
        assert_eq!(
            summary,
            "Low match probability (50%). Candidate may not be suitable."
        );
    }

    #[test]
    fn test_full_summary_order() {
        let summary = summarize(
            &breakdown(0.9, 0.8, &["python"]),
            &required(&["Python", "Docker"]),
        );
        assert_eq!(
            summary,
            "Top-tier candidate with a strong 90% match score. \
             Brings relevant expertise in python. \
             However, appears to lack specific mention of: Docker. \
             Contextual analysis suggests strong domain alignment."
        );
    }
}
