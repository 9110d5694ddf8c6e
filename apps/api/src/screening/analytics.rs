use std::collections::HashMap;

use serde::Serialize;

pub const TOP_SKILLS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub skill_distribution: Vec<SkillCount>,
    pub total_candidates: usize,
    pub total_jobs: i64,
}

/// Most common skills across resumes. Equal counts keep first-appearance order.
pub fn skill_distribution(skill_lists: &[Vec<String>], top: usize) -> Vec<SkillCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<SkillCount> = Vec::new();

    for skill in skill_lists.iter().flatten() {
        match index.get(skill.as_str()) {
            Some(&i) => counts[i].value += 1,
            None => {
                index.insert(skill.as_str(), counts.len());
                counts.push(SkillCount {
                    name: skill.clone(),
                    value: 1,
                });
            }
        }
    }

    // stable sort keeps insertion order among ties
    counts.sort_by(|a, b| b.value.cmp(&a.value));
    counts.truncate(top);
    counts
}
