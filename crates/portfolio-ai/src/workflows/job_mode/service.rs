use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::analysis::{HeuristicJobAnalyzer, JobAnalysis, JobAnalyzer};
use super::domain::{JobDescription, JobDescriptionId};
use super::optimization::{recommend, JobOptimization};
use super::relevance::{RelevanceConfig, RelevanceEngine, RelevanceError};
use super::repository::{
    JobAnalysisRecord, JobAnalysisRepository, PortfolioCatalog, RepositoryError,
    StoredJobDescription, DEFAULT_COMPANY, DEFAULT_JOB_TITLE,
};

/// Job posting submitted for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSubmission {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub description: String,
}

impl From<JobSubmission> for JobDescription {
    fn from(value: JobSubmission) -> Self {
        Self {
            job_title: value.job_title,
            company: value.company,
            description: value.description,
        }
    }
}

/// Service composing the catalog, the relevance engine, and analysis storage.
pub struct JobModeService<C, R> {
    catalog: Arc<C>,
    repository: Arc<R>,
    analyzer: Arc<dyn JobAnalyzer>,
    engine: Arc<RelevanceEngine>,
    sequence: AtomicU64,
}

impl<C, R> JobModeService<C, R>
where
    C: PortfolioCatalog + 'static,
    R: JobAnalysisRepository + 'static,
{
    pub fn new(catalog: Arc<C>, repository: Arc<R>, config: RelevanceConfig) -> Self {
        Self {
            catalog,
            repository,
            analyzer: Arc::new(HeuristicJobAnalyzer),
            engine: Arc::new(RelevanceEngine::new(config)),
            sequence: AtomicU64::new(1),
        }
    }

    /// Use `analyzer` ahead of the keyword heuristic.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn JobAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn engine(&self) -> &RelevanceEngine {
        &self.engine
    }

    /// Score the catalog against a posting and persist the run.
    pub fn analyze(
        &self,
        submission: JobSubmission,
        now: DateTime<Utc>,
    ) -> Result<JobAnalysisRecord, JobModeServiceError> {
        let job = JobDescription::from(submission);
        if job.is_blank() {
            return Err(RelevanceError::EmptyJobDescription.into());
        }

        let skills = self.catalog.active_skills()?;
        let projects = self.catalog.active_projects()?;
        let report = self.engine.run(&job, &skills, &projects, now)?;

        for rejected in &report.rejected {
            warn!(subject = ?rejected.subject, error = %rejected.error, "catalog entry skipped");
        }

        let analysis = self.analysis_for(&job.description);
        let id = JobDescriptionId(self.sequence.fetch_add(1, Ordering::Relaxed));
        let record = JobAnalysisRecord {
            job: StoredJobDescription {
                id,
                job_title: non_blank_or(job.job_title, DEFAULT_JOB_TITLE),
                company: non_blank_or(job.company, DEFAULT_COMPANY),
                description: job.description,
                created_at: now,
                active: true,
            },
            analysis,
            report,
        };

        let stored = self.repository.insert(record)?;
        info!(
            job_id = stored.job.id.0,
            highlights = stored.report.skill_highlights.len(),
            recommended = stored.report.recommended_projects.len(),
            "job analysis recorded"
        );
        Ok(stored)
    }

    /// Active analyses, newest first.
    pub fn history(&self) -> Result<Vec<JobAnalysisRecord>, JobModeServiceError> {
        let mut records: Vec<_> = self
            .repository
            .list()?
            .into_iter()
            .filter(|record| record.job.active)
            .collect();
        records.sort_by(|left, right| {
            right
                .job
                .created_at
                .cmp(&left.job.created_at)
                .then_with(|| right.job.id.cmp(&left.job.id))
        });
        Ok(records)
    }

    pub fn get(&self, id: JobDescriptionId) -> Result<JobAnalysisRecord, JobModeServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Hide an analysis from the history without discarding it.
    pub fn deactivate(&self, id: JobDescriptionId) -> Result<(), JobModeServiceError> {
        let mut record = self.get(id)?;
        if record.job.active {
            record.job.active = false;
            self.repository.update(record)?;
            info!(job_id = id.0, "job analysis deactivated");
        }
        Ok(())
    }

    pub fn optimize(&self, id: JobDescriptionId) -> Result<JobOptimization, JobModeServiceError> {
        let record = self.get(id)?;
        let threshold = self.engine.config().thresholds.optimization_emphasis;
        Ok(recommend(&record, threshold))
    }

    fn analysis_for(&self, description: &str) -> JobAnalysis {
        match self.analyzer.analyze(description) {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(error = %err, "analysis provider failed, using keyword heuristic");
                HeuristicJobAnalyzer.analysis(description)
            }
        }
    }
}

fn non_blank_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            debug!(fallback, "using placeholder for missing job field");
            fallback.to_string()
        }
    }
}

/// Error raised by the job mode service.
#[derive(Debug, thiserror::Error)]
pub enum JobModeServiceError {
    #[error(transparent)]
    InvalidInput(#[from] RelevanceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
