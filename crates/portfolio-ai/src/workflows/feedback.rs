//! Visitor feedback summaries and sentiment used by the admin inbox when the
//! text-generation service is unavailable.

use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::job_mode::signals::TextSignalExtractor;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "love", "like", "awesome", "fantastic",
];
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "dislike", "poor", "horrible",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Mixed,
    Neutral,
}

impl Sentiment {
    pub const fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Mixed => "Mixed",
            Sentiment::Neutral => "Neutral",
        }
    }
}

/// Keeps the first two sentences of longer feedback.
pub fn summarize_feedback(feedback: &str) -> String {
    let sentences: Vec<&str> = feedback
        .split('.')
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect();

    if sentences.len() <= 2 {
        return feedback.to_string();
    }

    format!("{}.", sentences[..2].join(". "))
}

/// Counts positive and negative seed words; substrings count, so "dislike"
/// also registers "like".
pub fn classify_sentiment(feedback: &str) -> Sentiment {
    let text = TextSignalExtractor::new(feedback);
    let positive = text.extract(POSITIVE_WORDS.iter().copied()).len();
    let negative = text.extract(NEGATIVE_WORDS.iter().copied()).len();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else if positive > 0 {
        Sentiment::Mixed
    } else {
        Sentiment::Neutral
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedbackInsightRequest {
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackInsight {
    pub summary: String,
    pub sentiment: Sentiment,
}

impl FeedbackInsight {
    pub fn from_feedback(feedback: &str) -> Self {
        Self {
            summary: summarize_feedback(feedback),
            sentiment: classify_sentiment(feedback),
        }
    }
}

pub fn feedback_router() -> Router {
    Router::new().route("/api/v1/feedback/insights", post(insight_handler))
}

pub(crate) async fn insight_handler(
    Json(request): Json<FeedbackInsightRequest>,
) -> impl IntoResponse {
    if request.feedback.trim().is_empty() {
        let payload = json!({ "error": "feedback text is empty" });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let insight = FeedbackInsight::from_feedback(&request.feedback);
    (StatusCode::OK, Json(insight)).into_response()
}
