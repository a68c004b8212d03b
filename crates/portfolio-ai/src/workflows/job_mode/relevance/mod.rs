mod config;
mod projects;
mod skills;

pub use config::{
    CategoryKeywords, ProjectWeights, ReasonTable, ReasonTier, RelevanceConfig,
    RelevanceThresholds, SkillWeights,
};
pub use projects::{score_project, ProjectRelevanceScorer};
pub use skills::{score_skill, SkillRelevanceScorer};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    CatalogEntryError, JobDescription, ProjectCatalogEntry, ProjectId, SkillCatalogEntry, SkillId,
    SubjectRef,
};
use super::signals::TextSignalExtractor;

/// Upper bound of every relevance score.
pub const MAX_RELEVANCE_SCORE: u8 = 100;

/// Factors that can contribute points to a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceFactor {
    SeedSkillMatch,
    SkillMention,
    CategoryMention,
    Proficiency,
    TechnologyMatch,
    CategoryKeyword,
    Difficulty,
    Recency,
}

/// Discrete contribution to a relevance score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RelevanceFactor,
    pub points: u32,
    pub notes: String,
}

/// Clamped score together with the components that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: u8,
    pub components: Vec<ScoreComponent>,
}

impl ScoreCard {
    pub fn from_components(components: Vec<ScoreComponent>) -> Self {
        let total = components
            .iter()
            .fold(0u32, |sum, component| sum.saturating_add(component.points));
        let score = total.min(u32::from(MAX_RELEVANCE_SCORE)) as u8;
        Self { score, components }
    }
}

/// Score and justification for one catalog entry in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceResult<I> {
    pub subject_id: I,
    /// Skill name or project title at the time of scoring.
    pub label: String,
    pub score: u8,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ScoreComponent>,
}

pub type SkillHighlight = RelevanceResult<SkillId>;
pub type ProjectRanking = RelevanceResult<ProjectId>;

/// Catalog entry skipped because it failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedEntry {
    pub subject: SubjectRef,
    pub error: CatalogEntryError,
}

/// Ranked output of a relevance run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelevanceReport {
    /// Seed skills found in the posting.
    pub extracted_skills: Vec<String>,
    /// Skills above the highlight threshold, best first.
    pub skill_highlights: Vec<SkillHighlight>,
    /// Every valid project, best first.
    pub project_rankings: Vec<ProjectRanking>,
    pub recommended_projects: Vec<ProjectRanking>,
    pub top_skills: Vec<SkillHighlight>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelevanceError {
    #[error("job description text is empty")]
    EmptyJobDescription,
}

/// Stateless engine ranking portfolio skills and projects for a posting.
#[derive(Debug, Clone, Default)]
pub struct RelevanceEngine {
    config: RelevanceConfig,
}

impl RelevanceEngine {
    pub fn new(config: RelevanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RelevanceConfig {
        &self.config
    }

    pub fn run(
        &self,
        job: &JobDescription,
        skills: &[SkillCatalogEntry],
        projects: &[ProjectCatalogEntry],
        now: DateTime<Utc>,
    ) -> Result<RelevanceReport, RelevanceError> {
        if job.is_blank() {
            return Err(RelevanceError::EmptyJobDescription);
        }

        let text = TextSignalExtractor::new(&job.description);
        let thresholds = self.config.thresholds;
        let mut rejected = Vec::new();

        let skill_scorer = SkillRelevanceScorer::new(&self.config, &text);
        let mut skill_highlights = Vec::new();
        for skill in skills {
            if let Err(error) = skill.validate() {
                rejected.push(RejectedEntry {
                    subject: SubjectRef::Skill(skill.id),
                    error,
                });
                continue;
            }

            let card = skill_scorer.score(skill);
            if card.score > thresholds.highlight {
                skill_highlights.push(SkillHighlight {
                    subject_id: skill.id,
                    label: skill.name.clone(),
                    score: card.score,
                    reason: skill_scorer.reason(card.score).to_string(),
                    components: card.components,
                });
            }
        }

        let project_scorer = ProjectRelevanceScorer::new(&self.config, &text, now);
        let mut project_rankings = Vec::new();
        for project in projects {
            if let Err(error) = project.validate() {
                rejected.push(RejectedEntry {
                    subject: SubjectRef::Project(project.id),
                    error,
                });
                continue;
            }

            let card = project_scorer.score(project);
            project_rankings.push(ProjectRanking {
                subject_id: project.id,
                label: project.title.clone(),
                score: card.score,
                reason: project_scorer.reason(card.score).to_string(),
                components: card.components,
            });
        }

        sort_by_score(&mut skill_highlights);
        sort_by_score(&mut project_rankings);

        let top_skills = above(&skill_highlights, thresholds.top_skill);
        let recommended_projects = above(&project_rankings, thresholds.recommended_project);

        Ok(RelevanceReport {
            extracted_skills: skill_scorer.extracted_skills().to_vec(),
            skill_highlights,
            project_rankings,
            recommended_projects,
            top_skills,
            rejected,
        })
    }
}

// `sort_by` is stable, so equal scores keep catalog order.
fn sort_by_score<I>(results: &mut [RelevanceResult<I>]) {
    results.sort_by(|left, right| right.score.cmp(&left.score));
}

fn above<I: Clone>(results: &[RelevanceResult<I>], threshold: u8) -> Vec<RelevanceResult<I>> {
    results
        .iter()
        .filter(|result| result.score > threshold)
        .cloned()
        .collect()
}
