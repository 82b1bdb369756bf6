//! Career quiz types: catalog shape, submitted answers, and the structured
//! career analysis returned by the model.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A quiz section (Interests, Skills, Personality).
#[derive(Debug, Clone, Serialize)]
pub struct QuizSection {
    pub title: &'static str,
    pub description: &'static str,
    pub questions: &'static [QuizQuestion],
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub options: &'static [&'static str],
}

/// A submitted answer value. Clients send either a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Index(i64),
    Text(String),
}

impl AnswerValue {
    /// The 0-based option index, if the value is numeric.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            AnswerValue::Index(i) => Some(*i),
            AnswerValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Raw answers keyed by `"<section>-<question>"` (0-based).
pub type QuizAnswers = BTreeMap<String, AnswerValue>;

/// A validated answer: 0-based section, question and option indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuizAnswer {
    pub section: usize,
    pub question: usize,
    pub option: usize,
}

/// One career recommendation produced by the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CareerSuggestion {
    pub title: String,
    /// Match percentage between 0 and 100.
    #[serde(rename = "match")]
    pub match_score: f64,
    pub description: String,
    pub skills: Vec<String>,
    pub salary_range: String,
    pub growth_outlook: String,
    pub work_environment: String,
    pub education_required: String,
    pub reasoning: String,
}

/// Structured result of a quiz analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CareerAnalysis {
    pub careers: Vec<CareerSuggestion>,
}
