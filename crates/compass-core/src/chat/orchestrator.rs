//! Client-side chat orchestration.
//!
//! `ChatOrchestrator` holds the active conversation in memory and drives one
//! exchange at a time: the user message is appended, the advisor reply is
//! streamed token by token, and the completed reply is appended. Saving to
//! history is an explicit, separate action; the orchestrator only tracks
//! which messages have already been saved.

use futures_util::StreamExt;
use tracing::{debug, warn};

use compass_types::error::ChatError;
use compass_types::history::{Conversation, ConversationId};
use compass_types::llm::{Message, MessageRole};

use super::advisor::{CareerAdvisor, WELCOME_MESSAGE};
use crate::llm::box_provider::BoxLlmProvider;

/// Exchange state of the active conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

/// In-memory conversation plus the `Idle -> AwaitingResponse -> Idle` cycle.
#[derive(Debug)]
pub struct ChatOrchestrator {
    messages: Vec<Message>,
    state: ChatState,
    pending: String,
    saved: Option<SavedMarker>,
}

#[derive(Debug, Clone, Copy)]
struct SavedMarker {
    conversation_id: ConversationId,
    len: usize,
}

impl Default for ChatOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatOrchestrator {
    /// A new conversation, seeded with the advisor greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(WELCOME_MESSAGE)],
            state: ChatState::Idle,
            pending: String::new(),
            saved: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Text streamed so far for the in-flight reply.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Whether there is anything beyond the greeting worth saving.
    pub fn has_exchange(&self) -> bool {
        self.messages.iter().any(|m| m.role == MessageRole::User)
    }

    /// Start an exchange: validate the input and append the user message.
    ///
    /// Rejected while a reply is in flight or when the input is blank.
    pub fn begin(&mut self, input: &str) -> Result<&[Message], ChatError> {
        if self.state == ChatState::AwaitingResponse {
            return Err(ChatError::Busy);
        }
        let input = input.trim();
        if input.is_empty() {
            return Err(ChatError::InvalidInput("Message cannot be empty".to_string()));
        }

        self.messages.push(Message::user(input));
        self.pending.clear();
        self.state = ChatState::AwaitingResponse;
        Ok(&self.messages)
    }

    /// Accumulate a streamed chunk of the reply.
    pub fn push_delta(&mut self, text: &str) {
        if self.state == ChatState::AwaitingResponse {
            self.pending.push_str(text);
        }
    }

    /// Finish the exchange, appending the accumulated reply.
    pub fn finish(&mut self) -> Option<&Message> {
        if self.state != ChatState::AwaitingResponse {
            return None;
        }
        let content = std::mem::take(&mut self.pending);
        self.messages.push(Message::assistant(content));
        self.state = ChatState::Idle;
        self.messages.last()
    }

    /// Abandon the exchange after a stream failure.
    ///
    /// The user message stays in the conversation; the partial reply is
    /// discarded. No retry is attempted.
    pub fn fail(&mut self) {
        if self.state == ChatState::AwaitingResponse {
            warn!(partial_len = self.pending.len(), "Chat stream failed, discarding partial reply");
        }
        self.pending.clear();
        self.state = ChatState::Idle;
    }

    /// Run one full exchange against a provider, reporting each token to
    /// `on_token`. Returns the completed assistant message.
    pub async fn submit<F>(
        &mut self,
        advisor: &CareerAdvisor,
        provider: &BoxLlmProvider,
        input: &str,
        mut on_token: F,
    ) -> Result<Message, ChatError>
    where
        F: FnMut(&str),
    {
        let messages = self.begin(input)?.to_vec();

        let mut stream = match advisor.stream_reply(provider, &messages) {
            Ok(stream) => stream,
            Err(e) => {
                self.fail();
                return Err(e);
            }
        };

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(text) => {
                    on_token(&text);
                    self.push_delta(&text);
                }
                Err(e) => {
                    self.fail();
                    return Err(e.into());
                }
            }
        }

        let reply = self.finish().cloned().unwrap_or_else(|| Message::assistant(""));
        debug!(reply_len = reply.content.len(), "Chat exchange complete");
        Ok(reply)
    }

    /// Start a new conversation.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Replace the active conversation with a saved one.
    pub fn load(&mut self, conversation: &Conversation) {
        self.messages = conversation
            .messages
            .iter()
            .map(|m| Message {
                role: m.role,
                content: m.content.clone(),
            })
            .collect();
        self.pending.clear();
        self.state = ChatState::Idle;
        self.saved = Some(SavedMarker {
            conversation_id: conversation.id,
            len: self.messages.len(),
        });
    }

    /// The saved conversation this one continues, if any.
    pub fn saved_conversation(&self) -> Option<ConversationId> {
        self.saved.map(|s| s.conversation_id)
    }

    /// Messages not yet written to history.
    pub fn unsaved(&self) -> &[Message] {
        let from = self.saved.map_or(0, |s| s.len.min(self.messages.len()));
        &self.messages[from..]
    }

    /// Record that every current message has been saved to `conversation_id`.
    pub fn mark_saved(&mut self, conversation_id: ConversationId) {
        self.saved = Some(SavedMarker {
            conversation_id,
            len: self.messages.len(),
        });
    }

    /// Plain-text transcript (`You:` / `AI:` blocks).
    pub fn export_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| {
                let speaker = if m.role == MessageRole::User { "You" } else { "AI" };
                format!("{speaker}: {}", m.content)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_types::history::{ConversationMessage, UserId};
    use compass_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent};
    use crate::llm::provider::LlmProvider;
    use chrono::Utc;
    use futures_util::Stream;
    use std::future::Future;
    use std::pin::Pin;

    struct ScriptedProvider {
        chunks: Vec<&'static str>,
        fail_after: Option<usize>,
    }

    impl ScriptedProvider {
        fn new(chunks: Vec<&'static str>, fail_after: Option<usize>) -> BoxLlmProvider {
            BoxLlmProvider::new(Self { chunks, fail_after })
        }
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
            async { Err(LlmError::InvalidRequest("not scripted".to_string())) }
        }

        fn stream(
            &self,
            _request: CompletionRequest,
        ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>> {
            let chunks = self.chunks.clone();
            let fail_after = self.fail_after;
            Box::pin(async_stream::stream! {
                let mut failed = false;
                for (i, chunk) in chunks.into_iter().enumerate() {
                    if fail_after == Some(i) {
                        failed = true;
                        yield Err(LlmError::Stream("connection reset".to_string()));
                        break;
                    }
                    yield Ok(StreamEvent::TextDelta { text: chunk.to_string() });
                }
                if !failed {
                    yield Ok(StreamEvent::Done);
                }
            })
        }
    }

    fn advisor() -> CareerAdvisor {
        CareerAdvisor::new("test-model", 0.7, 500)
    }

    #[test]
    fn test_new_conversation_has_greeting_only() {
        let chat = ChatOrchestrator::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, MessageRole::Assistant);
        assert!(!chat.has_exchange());
        assert_eq!(chat.state(), ChatState::Idle);
    }

    #[test]
    fn test_begin_rejects_blank_input() {
        let mut chat = ChatOrchestrator::new();
        assert!(matches!(chat.begin("   "), Err(ChatError::InvalidInput(_))));
        assert_eq!(chat.state(), ChatState::Idle);
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_begin_rejects_while_awaiting() {
        let mut chat = ChatOrchestrator::new();
        chat.begin("first").unwrap();
        assert!(matches!(chat.begin("second"), Err(ChatError::Busy)));
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn test_state_cycle_success() {
        let mut chat = ChatOrchestrator::new();
        chat.begin("Hi").unwrap();
        assert_eq!(chat.state(), ChatState::AwaitingResponse);
        chat.push_delta("Hel");
        chat.push_delta("lo");
        assert_eq!(chat.pending(), "Hello");
        let reply = chat.finish().unwrap();
        assert_eq!(reply.content, "Hello");
        assert_eq!(chat.state(), ChatState::Idle);
        assert_eq!(chat.messages().len(), 3);
    }

    #[test]
    fn test_fail_keeps_user_message_and_returns_to_idle() {
        let mut chat = ChatOrchestrator::new();
        chat.begin("Hi").unwrap();
        chat.push_delta("partial");
        chat.fail();
        assert_eq!(chat.state(), ChatState::Idle);
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1], Message::user("Hi"));
        assert!(chat.pending().is_empty());
        assert!(chat.finish().is_none());
    }

    #[tokio::test]
    async fn test_submit_streams_tokens_in_order() {
        let provider = ScriptedProvider::new(vec!["Try ", "nursing."], None);
        let mut chat = ChatOrchestrator::new();
        let mut seen = Vec::new();

        let reply = chat
            .submit(&advisor(), &provider, "Career ideas?", |t| seen.push(t.to_string()))
            .await
            .unwrap();

        assert_eq!(seen, vec!["Try ", "nursing."]);
        assert_eq!(reply.content, "Try nursing.");
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn test_submit_failure_reverts_to_idle() {
        let provider = ScriptedProvider::new(vec!["Try ", "nursing."], Some(1));
        let mut chat = ChatOrchestrator::new();

        let err = chat
            .submit(&advisor(), &provider, "Career ideas?", |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Llm(LlmError::Stream(_))));
        assert_eq!(chat.state(), ChatState::Idle);
        assert_eq!(chat.messages().len(), 2);

        // No retry: the next submission is a fresh exchange.
        let provider = ScriptedProvider::new(vec!["ok"], None);
        chat.submit(&advisor(), &provider, "again", |_| {}).await.unwrap();
        assert_eq!(chat.messages().len(), 4);
    }

    #[test]
    fn test_reset_clears_conversation_and_saved_marker() {
        let mut chat = ChatOrchestrator::new();
        chat.begin("Hi").unwrap();
        chat.finish();
        chat.mark_saved(ConversationId::new());
        chat.reset();
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.saved_conversation().is_none());
    }

    #[test]
    fn test_unsaved_tracks_messages_after_save() {
        let mut chat = ChatOrchestrator::new();
        chat.begin("Hi").unwrap();
        chat.finish();
        assert_eq!(chat.unsaved().len(), 3);

        let id = ConversationId::new();
        chat.mark_saved(id);
        assert!(chat.unsaved().is_empty());
        assert_eq!(chat.saved_conversation(), Some(id));

        chat.begin("More").unwrap();
        chat.push_delta("Sure");
        chat.finish();
        assert_eq!(chat.unsaved().len(), 2);
    }

    #[test]
    fn test_load_replaces_messages() {
        let id = ConversationId::new();
        let now = Utc::now();
        let conversation = Conversation {
            id,
            user_id: UserId::new(),
            title: "Saved".to_string(),
            created_at: now,
            updated_at: now,
            messages: vec![ConversationMessage {
                id: uuid::Uuid::now_v7(),
                conversation_id: id,
                role: MessageRole::User,
                content: "Earlier question".to_string(),
                created_at: now,
            }],
        };

        let mut chat = ChatOrchestrator::new();
        chat.load(&conversation);
        assert_eq!(chat.messages(), &[Message::user("Earlier question")]);
        assert_eq!(chat.saved_conversation(), Some(id));
        assert!(chat.unsaved().is_empty());
    }

    #[test]
    fn test_export_text_labels_speakers() {
        let mut chat = ChatOrchestrator::new();
        chat.begin("Hi").unwrap();
        chat.push_delta("Hello!");
        chat.finish();
        let text = chat.export_text();
        assert!(text.starts_with("AI: Hi! I'm your AI Career Advisor."));
        assert!(text.ends_with("You: Hi\n\nAI: Hello!"));
    }
}
