//! Match Aggregator: folds semantic similarity and skill overlap into one score.
//!
//! total = round(semantic × similarity_weight + skill × skill_weight, 4)
//!
//! Weights are not normalized. Callers that need a total in [0, 1] must pass
//! weights summing to 1; the total is passed through unclamped.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::similarity::cosine_similarity;
use crate::matching::MatchError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub similarity: f64,
    pub skills: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            similarity: 0.7,
            skills: 0.3,
        }
    }
}

impl MatchWeights {
    /// Rejects negative or non-finite weights. The sum is left to the caller.
    pub fn validate(self) -> Result<Self, MatchError> {
        for (name, w) in [("similarity", self.similarity), ("skills", self.skills)] {
            if !w.is_finite() || w < 0.0 {
                return Err(MatchError::InvalidWeights(format!(
                    "{name} weight must be a non-negative number, got {w}"
                )));
            }
        }
        Ok(self)
    }
}

/// Explainable result for one (candidate, job) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total_score: f64,
    pub semantic_score: f64,
    pub skill_score: f64,
    /// Lowercased, in the job's required-skill order.
    pub matched_skills: Vec<String>,
}

/// Scores a candidate against a job.
///
/// The total is computed from the unrounded sub-scores; each reported
/// sub-score is then rounded to 4 digits.
pub fn score(
    candidate_skills: &[String],
    candidate_vector: &[f32],
    job_skills: &[String],
    job_vector: &[f32],
    weights: &MatchWeights,
) -> Result<ScoreBreakdown, MatchError> {
    let semantic = cosine_similarity(candidate_vector, job_vector)?;
    let (skill, matched_skills) = skill_overlap(candidate_skills, job_skills);

    let total = semantic * weights.similarity + skill * weights.skills;

    Ok(ScoreBreakdown {
        total_score: round4(total),
        semantic_score: round4(semantic),
        skill_score: round4(skill),
        matched_skills,
    })
}

/// Case-insensitive |candidate ∩ required| / |required|.
/// A job with no required skills scores 0.0.
pub fn skill_overlap(candidate_skills: &[String], job_skills: &[String]) -> (f64, Vec<String>) {
    let candidate: HashSet<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();

    let mut seen = HashSet::new();
    let required: Vec<String> = job_skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| seen.insert(s.clone()))
        .collect();

    if required.is_empty() {
        return (0.0, Vec::new());
    }

    let matched: Vec<String> = required
        .iter()
        .filter(|s| candidate.contains(*s))
        .cloned()
        .collect();

    (matched.len() as f64 / required.len() as f64, matched)
}

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
