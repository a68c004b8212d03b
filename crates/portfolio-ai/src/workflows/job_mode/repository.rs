use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::JobAnalysis;
use super::domain::{JobDescriptionId, ProjectCatalogEntry, SkillCatalogEntry};
use super::relevance::RelevanceReport;

pub const DEFAULT_JOB_TITLE: &str = "Untitled Position";
pub const DEFAULT_COMPANY: &str = "Unknown Company";

/// Job description as persisted with an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredJobDescription {
    pub id: JobDescriptionId,
    pub job_title: String,
    pub company: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// Repository record bundling the posting, its analysis, and ranked results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAnalysisRecord {
    pub job: StoredJobDescription,
    pub analysis: JobAnalysis,
    pub report: RelevanceReport,
}

impl JobAnalysisRecord {
    pub fn summary_view(&self) -> JobAnalysisSummaryView {
        JobAnalysisSummaryView {
            id: self.job.id,
            job_title: self.job.job_title.clone(),
            company: self.job.company.clone(),
            created_at: self.job.created_at,
            highlighted_skills: self.report.skill_highlights.len(),
            recommended_projects: self.report.recommended_projects.len(),
            best_project_score: self
                .report
                .project_rankings
                .first()
                .map(|ranking| ranking.score),
        }
    }
}

/// Compact listing entry for the job history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobAnalysisSummaryView {
    pub id: JobDescriptionId,
    pub job_title: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
    pub highlighted_skills: usize,
    pub recommended_projects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_project_score: Option<u8>,
}

/// Source of the active portfolio catalog.
pub trait PortfolioCatalog: Send + Sync {
    fn active_skills(&self) -> Result<Vec<SkillCatalogEntry>, RepositoryError>;
    fn active_projects(&self) -> Result<Vec<ProjectCatalogEntry>, RepositoryError>;
}

/// Storage abstraction for analysis runs.
pub trait JobAnalysisRepository: Send + Sync {
    fn insert(&self, record: JobAnalysisRecord) -> Result<JobAnalysisRecord, RepositoryError>;
    fn update(&self, record: JobAnalysisRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: JobDescriptionId) -> Result<Option<JobAnalysisRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<JobAnalysisRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
