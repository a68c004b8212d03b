use serde::{Deserialize, Serialize};

use super::domain::JobDescriptionId;
use super::repository::JobAnalysisRecord;

/// Suggested portfolio edits for a stored job analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOptimization {
    pub job_id: JobDescriptionId,
    pub job_title: String,
    pub skill_updates: Vec<String>,
    pub project_highlights: Vec<String>,
    pub profile_updates: Vec<String>,
}

/// Builds recommendations from results scoring above `emphasis_threshold`.
pub fn recommend(record: &JobAnalysisRecord, emphasis_threshold: u8) -> JobOptimization {
    let skill_updates = record
        .report
        .skill_highlights
        .iter()
        .filter(|highlight| highlight.score > emphasis_threshold)
        .map(|highlight| format!("Emphasize {} - {}", highlight.label, highlight.reason))
        .collect();

    let project_highlights = record
        .report
        .project_rankings
        .iter()
        .filter(|ranking| ranking.score > emphasis_threshold)
        .map(|ranking| format!("Feature {} - {}", ranking.label, ranking.reason))
        .collect();

    let profile_updates = vec![
        format!(
            "Update bio to emphasize experience relevant to {}",
            record.job.job_title
        ),
        "Highlight recent projects that align with job requirements".to_string(),
        "Update skills section to prioritize most relevant technologies".to_string(),
        "Consider adding case studies for top-ranked projects".to_string(),
    ];

    JobOptimization {
        job_id: record.job.id,
        job_title: record.job.job_title.clone(),
        skill_updates,
        project_highlights,
        profile_updates,
    }
}
