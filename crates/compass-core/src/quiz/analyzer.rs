//! Quiz analysis via the LLM provider.
//!
//! The validated answers are summarized one line per question and sent in a
//! single non-streaming completion. The model is asked for JSON matching the
//! [`CareerAnalysis`] schema (generated with `schemars` and embedded in the
//! system prompt); the reply is parsed and checked before it is returned.

use tracing::{debug, warn};

use compass_types::config::LlmConfig;
use compass_types::error::QuizError;
use compass_types::llm::{CompletionRequest, Message};
use compass_types::quiz::{CareerAnalysis, QuizAnswers};

use super::catalog::{summarize_answers, validate_answers};
use crate::llm::box_provider::BoxLlmProvider;

const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a professional career counselor and psychologist specializing in career assessment. Analyze the quiz responses and provide personalized career recommendations.

The quiz has 3 sections:
Section 1 (Interests): activities, preferences and content types
Section 2 (Skills): natural strengths and work styles
Section 3 (Personality): work environment and problem-solving approaches

Each question has 4 options, each representing a career orientation:
- Option 1: Analytical/Technical
- Option 2: Social/Communication
- Option 3: Creative/Innovation
- Option 4: Practical/Organizational

Provide 4-6 career suggestions with realistic match percentages (70-95), detailed descriptions, required skills, current salary ranges, growth outlook, work environment, education requirements, and reasoning for the match based on the responses."#;

/// Runs the structured career analysis for a set of quiz answers.
#[derive(Debug, Clone)]
pub struct QuizAnalyzer {
    model: String,
    max_tokens: u32,
}

impl QuizAnalyzer {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.model.clone(), config.analysis_max_tokens)
    }

    /// Build the completion request for already validated answers.
    pub fn build_request(&self, summary: &str) -> Result<CompletionRequest, QuizError> {
        let schema = serde_json::to_string_pretty(&schemars::schema_for!(CareerAnalysis))
            .map_err(|e| QuizError::InvalidAnalysis(e.to_string()))?;

        let system = format!(
            "{ANALYSIS_SYSTEM_PROMPT}\n\nRespond with a single JSON object and nothing else. \
             It must validate against this JSON Schema:\n{schema}"
        );
        let prompt = format!(
            "Analyze these quiz responses and provide personalized career recommendations:\n\n\
             {summary}\n\n\
             Provide detailed career suggestions that match the user's interests, skills, and \
             personality based on their responses."
        );

        Ok(CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            system: Some(system),
            max_tokens: self.max_tokens,
            temperature: None,
            stream: false,
        })
    }

    /// Validate answers, ask the model, and return the checked analysis.
    #[tracing::instrument(name = "analyze_quiz", skip_all, fields(answer_count = answers.len()))]
    pub async fn analyze(
        &self,
        provider: &BoxLlmProvider,
        answers: &QuizAnswers,
    ) -> Result<CareerAnalysis, QuizError> {
        let validated = validate_answers(answers)?;
        let summary = summarize_answers(&validated);
        let request = self.build_request(&summary)?;

        let response = provider.complete(&request).await?;
        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Quiz analysis received"
        );

        parse_analysis(&response.content).inspect_err(|e| {
            warn!(error = %e, "Quiz analysis did not match schema");
        })
    }
}

/// Parse and check a model reply.
///
/// Tolerates surrounding prose or a fenced code block by taking the outermost
/// JSON object. Requires at least one career, non-blank titles, and match
/// scores within 0-100.
pub fn parse_analysis(content: &str) -> Result<CareerAnalysis, QuizError> {
    let json = extract_json_object(content)
        .ok_or_else(|| QuizError::InvalidAnalysis("no JSON object in response".to_string()))?;

    let analysis: CareerAnalysis =
        serde_json::from_str(json).map_err(|e| QuizError::InvalidAnalysis(e.to_string()))?;

    if analysis.careers.is_empty() {
        return Err(QuizError::InvalidAnalysis("no careers suggested".to_string()));
    }
    for career in &analysis.careers {
        if career.title.trim().is_empty() {
            return Err(QuizError::InvalidAnalysis("career without a title".to_string()));
        }
        if !(0.0..=100.0).contains(&career.match_score) {
            return Err(QuizError::InvalidAnalysis(format!(
                "match {} out of range for '{}'",
                career.match_score, career.title
            )));
        }
    }
    Ok(analysis)
}

fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (start < end).then(|| &content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_types::llm::{CompletionResponse, LlmError, StopReason, StreamEvent, Usage};
    use compass_types::quiz::AnswerValue;
    use crate::llm::provider::LlmProvider;
    use futures_util::Stream;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex};

    const VALID: &str = r#"{"careers":[{"title":"Data Scientist","match":91,"description":"Finds insight in data.","skills":["Python","Statistics"],"salaryRange":"$95,000 - $165,000","growthOutlook":"Much faster than average","workEnvironment":"Hybrid","educationRequired":"Bachelor's or Master's","reasoning":"Strong analytical answers."}]}"#;

    struct CannedProvider {
        reply: String,
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn complete(
            &self,
            request: &CompletionRequest,
        ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
            self.seen.lock().unwrap().push(request.clone());
            let content = self.reply.clone();
            async move {
                Ok(CompletionResponse {
                    id: "resp".to_string(),
                    content,
                    model: "canned".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage::default(),
                })
            }
        }

        fn stream(
            &self,
            _request: CompletionRequest,
        ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
            Box::pin(futures_util::stream::empty())
        }
    }

    fn canned(reply: &str) -> (BoxLlmProvider, Arc<Mutex<Vec<CompletionRequest>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let provider = BoxLlmProvider::new(CannedProvider {
            reply: reply.to_string(),
            seen: seen.clone(),
        });
        (provider, seen)
    }

    fn sample_answers() -> QuizAnswers {
        [("0-0", 0), ("1-0", 0), ("2-0", 0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), AnswerValue::Index(v)))
            .collect()
    }

    #[test]
    fn test_parse_plain_json() {
        let analysis = parse_analysis(VALID).unwrap();
        assert_eq!(analysis.careers.len(), 1);
        assert_eq!(analysis.careers[0].title, "Data Scientist");
        assert_eq!(analysis.careers[0].match_score, 91.0);
    }

    #[test]
    fn test_parse_fenced_json() {
        let fenced = format!("Here you go:\n```json\n{VALID}\n```\n");
        assert!(parse_analysis(&fenced).is_ok());
    }

    #[test]
    fn test_parse_rejects_out_of_range_match() {
        let bad = VALID.replace("\"match\":91", "\"match\":120");
        assert!(matches!(parse_analysis(&bad), Err(QuizError::InvalidAnalysis(_))));
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        assert!(parse_analysis(r#"{"careers":[]}"#).is_err());
        assert!(parse_analysis("I cannot help with that.").is_err());
        assert!(parse_analysis(r#"{"careers":[{"title":"x"}]}"#).is_err());
    }

    #[tokio::test]
    async fn test_analyze_sends_summary_and_schema() {
        let (provider, seen) = canned(VALID);
        let analyzer = QuizAnalyzer::new("gpt-3.5-turbo", 2048);

        let analysis = analyzer.analyze(&provider, &sample_answers()).await.unwrap();
        assert_eq!(analysis.careers[0].title, "Data Scientist");

        let requests = seen.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(!request.stream);
        assert!(request.messages[0]
            .content
            .contains("Section 1, Question 1: Option 1\nSection 2, Question 1: Option 1"));
        let system = request.system.as_deref().unwrap();
        assert!(system.contains("Option 4: Practical/Organizational"));
        assert!(system.contains("salaryRange"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_invalid_answers_before_calling_model() {
        let (provider, seen) = canned(VALID);
        let analyzer = QuizAnalyzer::new("gpt-3.5-turbo", 2048);

        let err = analyzer
            .analyze(&provider, &QuizAnswers::new())
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidAnswers(_)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_surfaces_schema_violation() {
        let (provider, _) = canned("Sorry, I can't do that.");
        let analyzer = QuizAnalyzer::new("gpt-3.5-turbo", 2048);
        let err = analyzer.analyze(&provider, &sample_answers()).await.unwrap_err();
        assert!(matches!(err, QuizError::InvalidAnalysis(_)));
    }
}
