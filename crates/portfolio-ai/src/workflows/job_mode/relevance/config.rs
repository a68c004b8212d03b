use serde::{Deserialize, Serialize};

use super::super::domain::ProjectCategory;

/// Tunable inputs of the relevance heuristic.
///
/// `Default` reproduces the published weights; a JSON file may override any
/// subset of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceConfig {
    /// Common technology names used for the exact-match skill bonus.
    pub seed_skills: Vec<String>,
    pub skill_weights: SkillWeights,
    pub project_weights: ProjectWeights,
    /// Ordered per-category keyword lists; categories absent here add nothing.
    pub category_keywords: Vec<CategoryKeywords>,
    pub thresholds: RelevanceThresholds,
    pub skill_reasons: ReasonTable,
    pub project_reasons: ReasonTable,
}

impl RelevanceConfig {
    pub fn keywords_for(&self, category: ProjectCategory) -> &[String] {
        self.category_keywords
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.keywords.as_slice())
            .unwrap_or_default()
    }
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            seed_skills: owned(&[
                "Python",
                "JavaScript",
                "C#",
                "Java",
                "SQL",
                "React",
                "Angular",
                "Vue.js",
                "Machine Learning",
                "Data Science",
                "AI",
                "AWS",
                "Azure",
                "Docker",
                "Kubernetes",
                "Git",
                "Agile",
                "Scrum",
                "REST API",
                "GraphQL",
                "MongoDB",
                "PostgreSQL",
            ]),
            skill_weights: SkillWeights::default(),
            project_weights: ProjectWeights::default(),
            category_keywords: vec![
                CategoryKeywords::new(
                    ProjectCategory::MachineLearning,
                    &[
                        "machine learning",
                        "ML",
                        "AI",
                        "neural network",
                        "deep learning",
                    ],
                ),
                CategoryKeywords::new(
                    ProjectCategory::DataScience,
                    &["data science", "analytics", "visualization", "statistics"],
                ),
                CategoryKeywords::new(
                    ProjectCategory::WebDevelopment,
                    &["web", "frontend", "backend", "full stack", "HTML", "CSS"],
                ),
                CategoryKeywords::new(
                    ProjectCategory::MobileApp,
                    &["mobile", "app", "iOS", "Android", "React Native", "Flutter"],
                ),
                CategoryKeywords::new(
                    ProjectCategory::Nlp,
                    &["NLP", "natural language", "text processing", "chatbot"],
                ),
                CategoryKeywords::new(
                    ProjectCategory::ComputerVision,
                    &["computer vision", "image processing", "OpenCV", "CNN"],
                ),
            ],
            thresholds: RelevanceThresholds::default(),
            skill_reasons: ReasonTable::new(
                &[
                    (
                        80,
                        "Highly relevant skill mentioned prominently in job requirements",
                    ),
                    (60, "Relevant skill that matches job description"),
                    (40, "Potentially relevant skill based on category match"),
                ],
                "Skill may be indirectly relevant",
            ),
            project_reasons: ReasonTable::new(
                &[
                    (80, "Excellent match - technologies and domain align perfectly"),
                    (60, "Good match - several relevant technologies used"),
                    (40, "Moderate match - some relevant aspects"),
                ],
                "Limited relevance but demonstrates general capabilities",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillWeights {
    pub seed_match: u32,
    pub name_mention: u32,
    pub category_mention: u32,
    pub proficiency_multiplier: u32,
}

impl Default for SkillWeights {
    fn default() -> Self {
        Self {
            seed_match: 50,
            name_mention: 30,
            category_mention: 20,
            proficiency_multiplier: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectWeights {
    pub technology_match: u32,
    pub category_keyword: u32,
    pub difficulty_multiplier: u32,
    pub recency_bonus: u32,
    /// Projects created within this many months before `now` earn the bonus.
    pub recency_window_months: u32,
}

impl Default for ProjectWeights {
    fn default() -> Self {
        Self {
            technology_match: 20,
            category_keyword: 15,
            difficulty_multiplier: 5,
            recency_bonus: 10,
            recency_window_months: 24,
        }
    }
}

/// Exclusive lower bounds for surfacing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceThresholds {
    pub highlight: u8,
    pub top_skill: u8,
    pub recommended_project: u8,
    pub optimization_emphasis: u8,
}

impl Default for RelevanceThresholds {
    fn default() -> Self {
        Self {
            highlight: 30,
            top_skill: 50,
            recommended_project: 60,
            optimization_emphasis: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: ProjectCategory,
    pub keywords: Vec<String>,
}

impl CategoryKeywords {
    pub fn new(category: ProjectCategory, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: owned(keywords),
        }
    }
}

/// Maps a score to a justification string; tiers are checked in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonTable {
    pub tiers: Vec<ReasonTier>,
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonTier {
    /// The tier applies when the score is strictly greater than this value.
    pub above: u8,
    pub reason: String,
}

impl ReasonTable {
    pub fn new(tiers: &[(u8, &str)], fallback: &str) -> Self {
        Self {
            tiers: tiers
                .iter()
                .map(|(above, reason)| ReasonTier {
                    above: *above,
                    reason: reason.to_string(),
                })
                .collect(),
            fallback: fallback.to_string(),
        }
    }

    pub fn reason_for(&self, score: u8) -> &str {
        self.tiers
            .iter()
            .find(|tier| score > tier.above)
            .map(|tier| tier.reason.as_str())
            .unwrap_or(&self.fallback)
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
