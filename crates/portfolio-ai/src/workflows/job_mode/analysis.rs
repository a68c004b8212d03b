use serde::{Deserialize, Serialize};

use super::domain::{ExperienceLevel, Industry};
use super::signals::TextSignalExtractor;

const KEY_SKILL_SEEDS: &[&str] = &["skill", "experience", "knowledge", "proficient"];
const TECHNOLOGY_SEEDS: &[&str] = &["python", "javascript", "react", "angular", "sql", "aws", "azure"];

/// Structured reading of a job posting stored alongside the relevance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub key_skills: Vec<String>,
    pub technologies: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub industry: Industry,
    pub source: AnalysisSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Produced by an external text-generation service.
    External,
    Heuristic,
}

/// Pluggable analyzer, typically backed by a generative AI service.
pub trait JobAnalyzer: Send + Sync {
    fn analyze(&self, description: &str) -> Result<JobAnalysis, AnalysisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis provider unavailable: {0}")]
    Unavailable(String),
    #[error("analysis provider returned malformed output: {0}")]
    Malformed(String),
}

/// Keyword-driven analyzer used when no external provider is configured or
/// the provider fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicJobAnalyzer;

impl HeuristicJobAnalyzer {
    pub fn analysis(&self, description: &str) -> JobAnalysis {
        let text = TextSignalExtractor::new(description);
        JobAnalysis {
            key_skills: text.extract(KEY_SKILL_SEEDS.iter().copied()),
            technologies: text.extract(TECHNOLOGY_SEEDS.iter().copied()),
            experience_level: text.experience_level(),
            industry: text.industry(),
            source: AnalysisSource::Heuristic,
        }
    }
}

impl JobAnalyzer for HeuristicJobAnalyzer {
    fn analyze(&self, description: &str) -> Result<JobAnalysis, AnalysisError> {
        Ok(self.analysis(description))
    }
}
