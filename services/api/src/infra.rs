use chrono::{DateTime, Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use portfolio_ai::error::AppError;
use portfolio_ai::workflows::job_mode::{
    JobAnalysisRecord, JobAnalysisRepository, JobDescriptionId, PortfolioCatalog,
    ProjectCatalogEntry, ProjectCategory, ProjectId, RepositoryError, SkillCatalogEntry, SkillId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobAnalysisRepository {
    records: Arc<Mutex<BTreeMap<JobDescriptionId, JobAnalysisRecord>>>,
}

impl InMemoryJobAnalysisRepository {
    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, BTreeMap<JobDescriptionId, JobAnalysisRecord>>, RepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("analysis store lock poisoned".to_string()))
    }
}

impl JobAnalysisRepository for InMemoryJobAnalysisRepository {
    fn insert(&self, record: JobAnalysisRecord) -> Result<JobAnalysisRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.job.id, record.clone());
        Ok(record)
    }

    fn update(&self, record: JobAnalysisRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard.get_mut(&record.job.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: JobDescriptionId) -> Result<Option<JobAnalysisRecord>, RepositoryError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<JobAnalysisRecord>, RepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}

/// Portfolio catalog export, as produced by the admin area.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StaticCatalog {
    #[serde(default)]
    pub(crate) skills: Vec<SkillCatalogEntry>,
    #[serde(default)]
    pub(crate) projects: Vec<ProjectCatalogEntry>,
}

impl StaticCatalog {
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let catalog: Self = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            skills = catalog.skills.len(),
            projects = catalog.projects.len(),
            "portfolio catalog loaded"
        );
        Ok(catalog)
    }

    /// Catalog from `path` when given, otherwise the bundled sample.
    pub(crate) fn load(path: Option<&Path>, now: DateTime<Utc>) -> Result<Self, AppError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::sample(now)),
        }
    }

    pub(crate) fn sample(now: DateTime<Utc>) -> Self {
        let skill = |id, name: &str, category: &str, level| SkillCatalogEntry {
            id: SkillId(id),
            name: name.to_string(),
            category: Some(category.to_string()),
            proficiency_level: level,
        };
        let project =
            |id, title: &str, technologies: &str, category, difficulty, age_days| ProjectCatalogEntry {
                id: ProjectId(id),
                title: title.to_string(),
                technologies_used: Some(technologies.to_string()),
                category,
                difficulty_level: difficulty,
                created_date: now - Duration::days(age_days),
            };

        Self {
            skills: vec![
                skill(1, "Python", "Programming", 9),
                skill(2, "Machine Learning", "AI", 8),
                skill(3, "SQL", "Data", 7),
                skill(4, "React", "Frontend", 6),
                skill(5, "Docker", "DevOps", 5),
                skill(6, "C#", "Backend", 7),
                skill(7, "Public Speaking", "Communication", 6),
            ],
            projects: vec![
                project(
                    1,
                    "Kaggle Leaderboard Tracker",
                    "Python, Pandas, SQL",
                    ProjectCategory::DataScience,
                    6,
                    120,
                ),
                project(
                    2,
                    "Sentiment Chatbot",
                    "Python, PyTorch, FastAPI",
                    ProjectCategory::Nlp,
                    8,
                    300,
                ),
                project(
                    3,
                    "Portfolio Website",
                    "C#, ASP.NET Core, HTML, CSS",
                    ProjectCategory::WebDevelopment,
                    5,
                    60,
                ),
                project(
                    4,
                    "Retina Scan Classifier",
                    "Python, TensorFlow, OpenCV",
                    ProjectCategory::ComputerVision,
                    9,
                    900,
                ),
            ],
        }
    }
}

impl PortfolioCatalog for StaticCatalog {
    fn active_skills(&self) -> Result<Vec<SkillCatalogEntry>, RepositoryError> {
        Ok(self.skills.clone())
    }

    fn active_projects(&self) -> Result<Vec<ProjectCatalogEntry>, RepositoryError> {
        Ok(self.projects.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use portfolio_ai::workflows::job_mode::{
        CatalogEntryError, JobDescription, JobModeService, JobSubmission, RelevanceConfig,
        RelevanceEngine,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn catalog_parses_admin_export() {
        let catalog: StaticCatalog = serde_json::from_str(
            r#"{
                "skills": [
                    { "id": 1, "name": "Python", "category": "Programming", "proficiency_level": 9 }
                ],
                "projects": [
                    {
                        "id": 4,
                        "title": "Chatbot",
                        "technologies_used": "Python, Rasa",
                        "category": "NLP",
                        "difficulty_level": 6,
                        "created_date": "2024-05-01T00:00:00Z"
                    }
                ]
            }"#,
        )
        .expect("catalog parses");

        assert_eq!(catalog.skills[0].id, SkillId(1));
        assert_eq!(catalog.projects[0].category, ProjectCategory::Nlp);
    }

    #[test]
    fn out_of_range_levels_are_skipped_not_fatal() {
        let catalog: StaticCatalog = serde_json::from_str(
            r#"{
                "skills": [
                    { "id": 1, "name": "Python", "proficiency_level": 9 },
                    { "id": 2, "name": "SQL", "proficiency_level": 300 }
                ],
                "projects": [
                    {
                        "id": 5,
                        "title": "Legacy Scraper",
                        "technologies_used": "Python",
                        "category": "Other",
                        "difficulty_level": -2,
                        "created_date": "2024-05-01T00:00:00Z"
                    }
                ]
            }"#,
        )
        .expect("catalog parses despite bad levels");

        let report = RelevanceEngine::default()
            .run(
                &JobDescription::new("Python and SQL engineer"),
                &catalog.skills,
                &catalog.projects,
                now(),
            )
            .expect("report builds");

        assert_eq!(
            report
                .rejected
                .iter()
                .map(|entry| entry.error.clone())
                .collect::<Vec<_>>(),
            vec![
                CatalogEntryError::ProficiencyOutOfRange(300),
                CatalogEntryError::DifficultyOutOfRange(-2),
            ]
        );
        assert_eq!(report.skill_highlights.len(), 1);
        assert_eq!(report.skill_highlights[0].subject_id, SkillId(1));
        assert!(report.project_rankings.is_empty());
    }

    #[test]
    fn in_memory_repository_round_trips_through_service() {
        let repository = Arc::new(InMemoryJobAnalysisRepository::default());
        let service = JobModeService::new(
            Arc::new(StaticCatalog::sample(now())),
            repository.clone(),
            RelevanceConfig::default(),
        );

        let record = service
            .analyze(
                JobSubmission {
                    job_title: Some("NLP Engineer".to_string()),
                    company: None,
                    description: "NLP engineer building a chatbot in Python".to_string(),
                },
                now(),
            )
            .expect("analysis runs");

        assert_eq!(
            record.report.project_rankings[0].label,
            "Sentiment Chatbot"
        );
        assert_eq!(repository.list().expect("store reachable").len(), 1);
        assert!(matches!(
            repository.insert(record),
            Err(RepositoryError::Conflict)
        ));
    }
}
