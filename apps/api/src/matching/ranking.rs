//! Candidate ranking: score every candidate against one job, then sort.
//!
//! Each candidate is scored independently on the rayon pool. A candidate whose
//! scoring fails is logged and left out; it never aborts the batch.
//! Order: `total_score` descending, then `candidate_id` ascending.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::matching::engine::{score, MatchWeights, ScoreBreakdown};
use crate::matching::summary::summarize;

/// What the ranker needs to know about a stored resume.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: Uuid,
    pub skills: Vec<String>,
    /// Raw stored vector; its width is checked at scoring time.
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub candidate_id: Uuid,
    pub breakdown: ScoreBreakdown,
    pub summary: String,
}

pub fn rank_candidates(
    job_embedding: &[f32],
    job_skills: &[String],
    candidates: &[Candidate],
    weights: &MatchWeights,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .par_iter()
        .filter_map(|candidate| {
            match score(
                &candidate.skills,
                &candidate.embedding,
                job_skills,
                job_embedding,
                weights,
            ) {
                Ok(breakdown) => {
                    let summary = summarize(&breakdown, job_skills);
                    Some(RankedCandidate {
                        candidate_id: candidate.id,
                        breakdown,
                        summary,
                    })
                }
                Err(e) => {
                    warn!("Skipping candidate {} during ranking: {e}", candidate.id);
                    None
                }
            }
        })
        .collect();

    ranked.sort_by(compare_ranked);
    debug!(
        "Ranked {} of {} candidates",
        ranked.len(),
        candidates.len()
    );
    ranked
}

fn compare_ranked(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.breakdown
        .total_score
        .total_cmp(&a.breakdown.total_score)
        .then_with(|| a.candidate_id.cmp(&b.candidate_id))
}
