//! Career advisor request construction.
//!
//! `CareerAdvisor` owns the fixed counsellor persona and sampling settings and
//! turns a client's message list into a streaming completion request.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};

use compass_types::config::LlmConfig;
use compass_types::error::ChatError;
use compass_types::llm::{CompletionRequest, LlmError, Message, MessageRole, StreamEvent};

use crate::llm::box_provider::BoxLlmProvider;

/// System prompt establishing the career counsellor persona.
pub const ADVISOR_SYSTEM_PROMPT: &str = r#"You are a professional career advisor and guidance counselor. Your areas of expertise:
- Career development and planning
- Job search strategies
- Resume and cover letter optimization
- Interview preparation
- Skill development recommendations
- Industry trends and insights
- Salary negotiation
- Work-life balance
- Professional networking
- Career transitions
- Educational pathways and certifications
- Remote work and freelancing
- Personal branding and LinkedIn optimization

Give helpful, actionable and encouraging advice. Be specific and practical. Keep a supportive, professional tone. When asked about specific companies or salaries, give general guidance and suggest checking current market data.

Keep responses concise but complete, and end with a follow-up question that keeps the conversation going."#;

/// Greeting shown at the top of every new conversation.
pub const WELCOME_MESSAGE: &str = "Hi! I'm your AI Career Advisor. I can help you with career guidance, job search tips, skill development advice, and answer any questions about your professional journey. How can I assist you today?";

/// Builds streaming chat requests for the career advisor.
#[derive(Debug, Clone)]
pub struct CareerAdvisor {
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl CareerAdvisor {
    pub fn new(model: impl Into<String>, temperature: f64, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(config.model.clone(), config.temperature, config.max_tokens)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the completion request for a conversation.
    ///
    /// Client-supplied system messages are dropped; the advisor persona is the
    /// only system prompt. An empty (or system-only) list is rejected.
    pub fn build_request(&self, messages: &[Message]) -> Result<CompletionRequest, ChatError> {
        let messages: Vec<Message> = messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .cloned()
            .collect();

        if messages.is_empty() {
            return Err(ChatError::InvalidInput("Messages required".to_string()));
        }

        Ok(CompletionRequest {
            model: self.model.clone(),
            messages,
            system: Some(ADVISOR_SYSTEM_PROMPT.to_string()),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            stream: true,
        })
    }

    /// Stream the advisor's reply as plain text chunks.
    ///
    /// Non-text events are consumed; the stream ends at `Done` or on the first
    /// error.
    pub fn stream_reply(
        &self,
        provider: &BoxLlmProvider,
        messages: &[Message],
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>, ChatError>
    {
        let request = self.build_request(messages)?;
        let events = provider.stream(request);
        Ok(Box::pin(text_deltas(events)))
    }
}

/// Reduce a provider event stream to its text deltas.
pub fn text_deltas(
    events: impl Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static,
) -> impl Stream<Item = Result<String, LlmError>> + Send + 'static {
    async_stream::stream! {
        let mut events = Box::pin(events);
        while let Some(event) = events.next().await {
            match event {
                Ok(StreamEvent::TextDelta { text }) => yield Ok(text),
                Ok(StreamEvent::Done) => break,
                Ok(_) => {}
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }
        }
    }
}
