use chrono::{DateTime, Months, Utc};

use super::super::domain::{ProjectCatalogEntry, MAX_LEVEL, MIN_LEVEL};
use super::super::signals::TextSignalExtractor;
use super::config::RelevanceConfig;
use super::{RelevanceFactor, ScoreCard, ScoreComponent};

/// Scores catalog projects against one job description at a fixed `now`.
pub struct ProjectRelevanceScorer<'a> {
    config: &'a RelevanceConfig,
    job: &'a TextSignalExtractor,
    recency_cutoff: Option<DateTime<Utc>>,
}

impl<'a> ProjectRelevanceScorer<'a> {
    pub fn new(config: &'a RelevanceConfig, job: &'a TextSignalExtractor, now: DateTime<Utc>) -> Self {
        let recency_cutoff =
            now.checked_sub_months(Months::new(config.project_weights.recency_window_months));
        Self {
            config,
            job,
            recency_cutoff,
        }
    }

    pub fn score(&self, project: &ProjectCatalogEntry) -> ScoreCard {
        let weights = &self.config.project_weights;
        let mut components = Vec::new();

        for technology in project.technologies() {
            if self.job.mentions(technology) {
                components.push(ScoreComponent {
                    factor: RelevanceFactor::TechnologyMatch,
                    points: weights.technology_match,
                    notes: format!("uses {technology}"),
                });
            }
        }

        for keyword in self.config.keywords_for(project.category) {
            if self.job.mentions(keyword) {
                components.push(ScoreComponent {
                    factor: RelevanceFactor::CategoryKeyword,
                    points: weights.category_keyword,
                    notes: format!(
                        "{} project matches keyword '{keyword}'",
                        project.category.label()
                    ),
                });
            }
        }

        let difficulty = project.difficulty_level.clamp(MIN_LEVEL, MAX_LEVEL);
        components.push(ScoreComponent {
            factor: RelevanceFactor::Difficulty,
            points: difficulty.unsigned_abs().saturating_mul(weights.difficulty_multiplier),
            notes: format!("difficulty {difficulty}/{MAX_LEVEL}"),
        });

        let recent = self
            .recency_cutoff
            .map_or(true, |cutoff| project.created_date > cutoff);
        if recent {
            components.push(ScoreComponent {
                factor: RelevanceFactor::Recency,
                points: weights.recency_bonus,
                notes: format!(
                    "created within the last {} months",
                    weights.recency_window_months
                ),
            });
        }

        ScoreCard::from_components(components)
    }

    pub fn reason(&self, score: u8) -> &'a str {
        self.config.project_reasons.reason_for(score)
    }
}

/// Scores a single project against raw job text.
pub fn score_project(
    config: &RelevanceConfig,
    project: &ProjectCatalogEntry,
    job_text: &str,
    now: DateTime<Utc>,
) -> u8 {
    let job = TextSignalExtractor::new(job_text);
    ProjectRelevanceScorer::new(config, &job, now)
        .score(project)
        .score
}
