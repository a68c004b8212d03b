use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::workflows::job_mode::analysis::{AnalysisError, JobAnalysis, JobAnalyzer};
use crate::workflows::job_mode::domain::{
    JobDescription, JobDescriptionId, ProjectCatalogEntry, ProjectCategory, ProjectId,
    SkillCatalogEntry, SkillId,
};
use crate::workflows::job_mode::repository::{
    JobAnalysisRecord, JobAnalysisRepository, PortfolioCatalog, RepositoryError,
};
use crate::workflows::job_mode::{JobModeService, JobSubmission, RelevanceConfig};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 13, 10, 35, 12)
        .single()
        .expect("valid timestamp")
}

pub(super) fn skill(id: u64, name: &str, category: Option<&str>, level: i32) -> SkillCatalogEntry {
    SkillCatalogEntry {
        id: SkillId(id),
        name: name.to_string(),
        category: category.map(str::to_string),
        proficiency_level: level,
    }
}

pub(super) fn project(
    id: u64,
    title: &str,
    technologies: &str,
    category: ProjectCategory,
    difficulty: i32,
    age_days: i64,
) -> ProjectCatalogEntry {
    ProjectCatalogEntry {
        id: ProjectId(id),
        title: title.to_string(),
        technologies_used: Some(technologies.to_string()),
        category,
        difficulty_level: difficulty,
        created_date: now() - Duration::days(age_days),
    }
}

pub(super) fn skills() -> Vec<SkillCatalogEntry> {
    vec![
        skill(1, "Python", Some("Programming"), 9),
        skill(2, "SQL", Some("Data"), 7),
        skill(3, "Docker", Some("DevOps"), 5),
        skill(4, "Figma", Some("Design"), 6),
        skill(5, "Machine Learning", Some("AI"), 8),
    ]
}

pub(super) fn projects() -> Vec<ProjectCatalogEntry> {
    vec![
        project(
            10,
            "Churn Predictor",
            "Python, scikit-learn, SQL",
            ProjectCategory::MachineLearning,
            7,
            200,
        ),
        project(
            11,
            "Portfolio Site",
            "C#, ASP.NET, HTML, CSS",
            ProjectCategory::WebDevelopment,
            4,
            900,
        ),
        project(
            12,
            "Sales Dashboard",
            "Tableau, Excel",
            ProjectCategory::DataScience,
            3,
            400,
        ),
    ]
}

pub(super) const DATA_SCIENTIST_POSTING: &str = "Senior data scientist for a healthcare startup. \
    You will build machine learning models in Python, write SQL against our warehouse, \
    and present analytics to clinicians. Docker experience is a plus.";

pub(super) fn job() -> JobDescription {
    JobDescription::from(submission())
}

pub(super) fn submission() -> JobSubmission {
    JobSubmission {
        job_title: Some("Senior Data Scientist".to_string()),
        company: Some("Helix Health".to_string()),
        description: DATA_SCIENTIST_POSTING.to_string(),
    }
}

#[derive(Clone)]
pub(super) struct FixedCatalog {
    pub(super) skills: Vec<SkillCatalogEntry>,
    pub(super) projects: Vec<ProjectCatalogEntry>,
}

impl Default for FixedCatalog {
    fn default() -> Self {
        Self {
            skills: skills(),
            projects: projects(),
        }
    }
}

impl PortfolioCatalog for FixedCatalog {
    fn active_skills(&self) -> Result<Vec<SkillCatalogEntry>, RepositoryError> {
        Ok(self.skills.clone())
    }

    fn active_projects(&self) -> Result<Vec<ProjectCatalogEntry>, RepositoryError> {
        Ok(self.projects.clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<BTreeMap<JobDescriptionId, JobAnalysisRecord>>>,
}

impl JobAnalysisRepository for MemoryRepository {
    fn insert(&self, record: JobAnalysisRecord) -> Result<JobAnalysisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.job.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: JobAnalysisRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.job.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: JobDescriptionId) -> Result<Option<JobAnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<JobAnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl JobAnalysisRepository for UnavailableRepository {
    fn insert(&self, _record: JobAnalysisRecord) -> Result<JobAnalysisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: JobAnalysisRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: JobDescriptionId) -> Result<Option<JobAnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<JobAnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct OfflineAnalyzer;

impl JobAnalyzer for OfflineAnalyzer {
    fn analyze(&self, _description: &str) -> Result<JobAnalysis, AnalysisError> {
        Err(AnalysisError::Unavailable("quota exceeded".to_string()))
    }
}

pub(super) struct GarbledAnalyzer;

impl JobAnalyzer for GarbledAnalyzer {
    fn analyze(&self, _description: &str) -> Result<JobAnalysis, AnalysisError> {
        Err(AnalysisError::Malformed("expected a JSON object".to_string()))
    }
}

pub(super) fn service() -> JobModeService<FixedCatalog, MemoryRepository> {
    JobModeService::new(
        Arc::new(FixedCatalog::default()),
        Arc::new(MemoryRepository::default()),
        RelevanceConfig::default(),
    )
}
