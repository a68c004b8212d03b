//! AI job mode: ranks portfolio skills and projects against a job posting.
//!
//! The relevance engine is the deterministic baseline used whenever the
//! external text-generation service is unavailable; its output has the same
//! shape (score plus reason per subject) as the service-backed path.

pub mod analysis;
pub mod domain;
pub mod optimization;
pub mod relevance;
pub mod repository;
pub mod router;
pub mod service;
pub mod signals;

#[cfg(test)]
mod tests;

pub use analysis::{AnalysisError, AnalysisSource, HeuristicJobAnalyzer, JobAnalysis, JobAnalyzer};
pub use domain::{
    CatalogEntryError, ExperienceLevel, Industry, JobDescription, JobDescriptionId,
    ProjectCatalogEntry, ProjectCategory, ProjectId, SkillCatalogEntry, SkillId, SubjectRef,
};
pub use optimization::JobOptimization;
pub use relevance::{
    ProjectRanking, RejectedEntry, RelevanceConfig, RelevanceEngine, RelevanceError,
    RelevanceReport, RelevanceResult, SkillHighlight,
};
pub use repository::{
    JobAnalysisRecord, JobAnalysisRepository, JobAnalysisSummaryView, PortfolioCatalog,
    RepositoryError, StoredJobDescription,
};
pub use router::job_mode_router;
pub use service::{JobModeService, JobModeServiceError, JobSubmission};
pub use signals::TextSignalExtractor;
