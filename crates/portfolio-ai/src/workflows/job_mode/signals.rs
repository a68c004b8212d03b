use super::domain::{ExperienceLevel, Industry};

/// Ordered trigger table; the first rule with any matching trigger wins.
pub type TriggerTable<T> = &'static [(T, &'static [&'static str])];

pub const EXPERIENCE_TRIGGERS: TriggerTable<ExperienceLevel> = &[
    (ExperienceLevel::Senior, &["senior", "lead", "5+ years"]),
    (ExperienceLevel::Junior, &["junior", "entry", "1-2 years"]),
];

pub const INDUSTRY_TRIGGERS: TriggerTable<Industry> = &[
    (Industry::Finance, &["fintech", "banking"]),
    (Industry::Healthcare, &["healthcare", "medical"]),
    (Industry::ECommerce, &["ecommerce", "retail"]),
    (Industry::Startup, &["startup"]),
];

/// Case-insensitive view over free text for keyword and substring checks.
///
/// Matching is plain substring containment with no word-boundary handling,
/// so `"Java"` is found inside `"JavaScript"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSignalExtractor {
    lowered: String,
}

impl TextSignalExtractor {
    pub fn new(text: &str) -> Self {
        Self {
            lowered: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lowered.trim().is_empty()
    }

    /// True when `needle` occurs anywhere in the text, ignoring case.
    /// Empty needles never match.
    pub fn mentions(&self, needle: &str) -> bool {
        !needle.is_empty() && self.lowered.contains(&needle.to_lowercase())
    }

    /// Seed words present in the text, in seed order and without duplicates.
    pub fn extract<'a, I>(&self, seeds: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut matched: Vec<String> = Vec::new();
        for seed in seeds {
            if self.mentions(seed) && !matched.iter().any(|known| known == seed) {
                matched.push(seed.to_string());
            }
        }
        matched
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        self.first_match(EXPERIENCE_TRIGGERS)
            .unwrap_or(ExperienceLevel::MidLevel)
    }

    pub fn industry(&self) -> Industry {
        self.first_match(INDUSTRY_TRIGGERS)
            .unwrap_or(Industry::Technology)
    }

    fn first_match<T: Copy>(&self, table: TriggerTable<T>) -> Option<T> {
        table
            .iter()
            .find(|(_, triggers)| triggers.iter().any(|trigger| self.mentions(trigger)))
            .map(|(value, _)| *value)
    }
}

pub fn extract_signals<'a, I>(text: &str, seeds: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    TextSignalExtractor::new(text).extract(seeds)
}

pub fn determine_experience_level(text: &str) -> ExperienceLevel {
    TextSignalExtractor::new(text).experience_level()
}

pub fn determine_industry(text: &str) -> Industry {
    TextSignalExtractor::new(text).industry()
}

pub(crate) fn equals_ignore_case(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}
