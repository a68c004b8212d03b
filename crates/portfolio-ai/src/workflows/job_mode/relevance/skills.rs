use super::super::domain::{SkillCatalogEntry, MAX_LEVEL, MIN_LEVEL};
use super::super::signals::{equals_ignore_case, TextSignalExtractor};
use super::config::RelevanceConfig;
use super::{RelevanceFactor, ScoreCard, ScoreComponent};

/// Scores catalog skills against one job description.
///
/// Seed skills are extracted once at construction so a whole catalog can be
/// scored without rescanning the posting for them.
pub struct SkillRelevanceScorer<'a> {
    config: &'a RelevanceConfig,
    job: &'a TextSignalExtractor,
    extracted: Vec<String>,
}

impl<'a> SkillRelevanceScorer<'a> {
    pub fn new(config: &'a RelevanceConfig, job: &'a TextSignalExtractor) -> Self {
        let extracted = job.extract(config.seed_skills.iter().map(String::as_str));
        Self {
            config,
            job,
            extracted,
        }
    }

    /// Seed skills found in the job description.
    pub fn extracted_skills(&self) -> &[String] {
        &self.extracted
    }

    pub fn score(&self, skill: &SkillCatalogEntry) -> ScoreCard {
        let weights = &self.config.skill_weights;
        let mut components = Vec::new();

        if self
            .extracted
            .iter()
            .any(|seed| equals_ignore_case(seed, &skill.name))
        {
            components.push(ScoreComponent {
                factor: RelevanceFactor::SeedSkillMatch,
                points: weights.seed_match,
                notes: format!("{} is a commonly requested skill in the posting", skill.name),
            });
        }

        if self.job.mentions(&skill.name) {
            components.push(ScoreComponent {
                factor: RelevanceFactor::SkillMention,
                points: weights.name_mention,
                notes: format!("posting mentions {}", skill.name),
            });
        }

        if let Some(category) = skill.category.as_deref().filter(|value| !value.is_empty()) {
            if self.job.mentions(category) {
                components.push(ScoreComponent {
                    factor: RelevanceFactor::CategoryMention,
                    points: weights.category_mention,
                    notes: format!("posting mentions category {category}"),
                });
            }
        }

        let proficiency = skill.proficiency_level.clamp(MIN_LEVEL, MAX_LEVEL);
        components.push(ScoreComponent {
            factor: RelevanceFactor::Proficiency,
            points: proficiency.unsigned_abs().saturating_mul(weights.proficiency_multiplier),
            notes: format!("proficiency {proficiency}/{MAX_LEVEL}"),
        });

        ScoreCard::from_components(components)
    }

    pub fn reason(&self, score: u8) -> &'a str {
        self.config.skill_reasons.reason_for(score)
    }
}

/// Scores a single skill against raw job text.
pub fn score_skill(config: &RelevanceConfig, skill: &SkillCatalogEntry, job_text: &str) -> u8 {
    let job = TextSignalExtractor::new(job_text);
    SkillRelevanceScorer::new(config, &job).score(skill).score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::job_mode::domain::SkillId;

    fn skill(name: &str, category: Option<&str>, proficiency_level: i32) -> SkillCatalogEntry {
        SkillCatalogEntry {
            id: SkillId(1),
            name: name.to_string(),
            category: category.map(str::to_string),
            proficiency_level,
        }
    }

    #[test]
    fn seed_match_and_mention_both_fire() {
        let config = RelevanceConfig::default();
        let score = score_skill(
            &config,
            &skill("Python", Some("Backend"), 8),
            "Python developer needed",
        );
        assert_eq!(score, 96);
        assert_eq!(
            config.skill_reasons.reason_for(score),
            "Highly relevant skill mentioned prominently in job requirements"
        );
    }

    #[test]
    fn unrelated_skill_keeps_only_proficiency_points() {
        let config = RelevanceConfig::default();
        let score = score_skill(&config, &skill("Rust", None, 1), "We need a barista");
        assert_eq!(score, 2);
    }

    #[test]
    fn non_seed_skill_gets_mention_and_category() {
        let config = RelevanceConfig::default();
        let job = TextSignalExtractor::new("Terraform experience on a cloud platform team");
        let scorer = SkillRelevanceScorer::new(&config, &job);

        let card = scorer.score(&skill("terraform", Some("Cloud"), 5));

        assert_eq!(card.score, 30 + 20 + 10);
        assert!(card
            .components
            .iter()
            .all(|component| component.factor != RelevanceFactor::SeedSkillMatch));
    }

    #[test]
    fn seed_match_ignores_case_of_catalog_name() {
        let config = RelevanceConfig::default();
        let job = TextSignalExtractor::new("docker swarm rollouts");
        let scorer = SkillRelevanceScorer::new(&config, &job);

        let card = scorer.score(&skill("DOCKER", None, 5));

        assert_eq!(card.score, 50 + 30 + 10);
        assert!(card
            .components
            .iter()
            .any(|component| component.factor == RelevanceFactor::SeedSkillMatch));
    }

    #[test]
    fn name_containing_a_seed_is_only_a_mention() {
        let config = RelevanceConfig::default();
        let job = TextSignalExtractor::new("Write Pythonic code with Python 3");
        let scorer = SkillRelevanceScorer::new(&config, &job);

        let card = scorer.score(&skill("Pythonic", None, 4));

        assert_eq!(card.score, 30 + 8);
        assert!(card
            .components
            .iter()
            .all(|component| component.factor != RelevanceFactor::SeedSkillMatch));
    }

    #[test]
    fn empty_category_is_ignored() {
        let config = RelevanceConfig::default();
        let score = score_skill(&config, &skill("Go", Some(""), 3), "golang services");
        assert_eq!(score, 30 + 6);
    }

    #[test]
    fn score_saturates_at_one_hundred() {
        let mut config = RelevanceConfig::default();
        config.skill_weights.proficiency_multiplier = u32::MAX;
        let score = score_skill(&config, &skill("SQL", Some("Data"), 10), "SQL and data");
        assert_eq!(score, 100);
    }
}
