use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest proficiency/difficulty level accepted by the relevance engine.
pub const MIN_LEVEL: i32 = 1;
/// Highest proficiency/difficulty level accepted by the relevance engine.
pub const MAX_LEVEL: i32 = 10;

/// Identifier assigned to a job description by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobDescriptionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub u64);

/// Job posting a scoring run is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescription {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub description: String,
}

impl JobDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            job_title: None,
            company: None,
            description: description.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }
}

/// A skill claimed on the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCatalogEntry {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub proficiency_level: i32,
}

impl SkillCatalogEntry {
    pub fn validate(&self) -> Result<(), CatalogEntryError> {
        if self.name.trim().is_empty() {
            return Err(CatalogEntryError::EmptySkillName);
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.proficiency_level) {
            return Err(CatalogEntryError::ProficiencyOutOfRange(
                self.proficiency_level,
            ));
        }
        Ok(())
    }
}

/// A project showcased on the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCatalogEntry {
    pub id: ProjectId,
    pub title: String,
    /// Comma separated technology list as entered in the admin area.
    #[serde(default)]
    pub technologies_used: Option<String>,
    pub category: ProjectCategory,
    pub difficulty_level: i32,
    pub created_date: DateTime<Utc>,
}

impl ProjectCatalogEntry {
    /// Trimmed, non-empty technology tokens in the order they were entered.
    pub fn technologies(&self) -> impl Iterator<Item = &str> {
        self.technologies_used
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    pub fn validate(&self) -> Result<(), CatalogEntryError> {
        if self.title.trim().is_empty() {
            return Err(CatalogEntryError::EmptyProjectTitle);
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.difficulty_level) {
            return Err(CatalogEntryError::DifficultyOutOfRange(
                self.difficulty_level,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectCategory {
    MachineLearning,
    DataScience,
    WebDevelopment,
    MobileApp,
    Research,
    #[serde(rename = "NLP")]
    Nlp,
    ComputerVision,
    DataAnalysis,
    Other,
}

impl ProjectCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MachineLearning => "Machine Learning",
            Self::DataScience => "Data Science",
            Self::WebDevelopment => "Web Development",
            Self::MobileApp => "Mobile App",
            Self::Research => "Research",
            Self::Nlp => "NLP",
            Self::ComputerVision => "Computer Vision",
            Self::DataAnalysis => "Data Analysis",
            Self::Other => "Other",
        }
    }
}

/// Seniority inferred from a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Senior,
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
}

impl ExperienceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Senior => "Senior",
            Self::Junior => "Junior",
            Self::MidLevel => "Mid-level",
        }
    }
}

/// Industry inferred from a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Finance,
    Healthcare,
    #[serde(rename = "E-commerce")]
    ECommerce,
    Startup,
    Technology,
}

impl Industry {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Finance => "Finance",
            Self::Healthcare => "Healthcare",
            Self::ECommerce => "E-commerce",
            Self::Startup => "Startup",
            Self::Technology => "Technology",
        }
    }
}

/// Points at a catalog entry without borrowing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum SubjectRef {
    Skill(SkillId),
    Project(ProjectId),
}

/// Reasons a single catalog entry is excluded from a scoring run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum CatalogEntryError {
    #[error("skill name is empty")]
    EmptySkillName,
    #[error("project title is empty")]
    EmptyProjectTitle,
    #[error("proficiency level {0} outside 1-10")]
    ProficiencyOutOfRange(i32),
    #[error("difficulty level {0} outside 1-10")]
    DifficultyOutOfRange(i32),
}
