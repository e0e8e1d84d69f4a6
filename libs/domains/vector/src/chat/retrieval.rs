use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::ChatProvider;
use crate::embedding::EmbeddingProvider;
use crate::error::VectorResult;
use crate::models::{
    ChatMessage, ChatResponse, ChatSettings, EmbeddingModel, SearchQuery, VectorConfig,
};
use crate::repository::VectorRepository;

/// Number of payloads retrieved as context for one question
pub const CONTEXT_LIMIT: u64 = 5;

const SYSTEM_PROMPT: &str = "You are a helpful assistant for an item catalog. \
Answer the user's question using the context below. \
If the context does not contain the answer, say that you do not know.";

/// Retrieval-augmented chat over the item collection.
///
/// Stateless: history is supplied by the caller on every turn.
pub struct RetrievalChat<V: VectorRepository> {
    vectors: Arc<V>,
    embedder: Arc<dyn EmbeddingProvider>,
    chat: Arc<dyn ChatProvider>,
    model: EmbeddingModel,
    vector_config: VectorConfig,
    settings: ChatSettings,
}

impl<V: VectorRepository> RetrievalChat<V> {
    pub fn new(
        vectors: V,
        embedder: Arc<dyn EmbeddingProvider>,
        chat: Arc<dyn ChatProvider>,
        model: EmbeddingModel,
        vector_config: VectorConfig,
    ) -> Self {
        Self {
            vectors: Arc::new(vectors),
            embedder,
            chat,
            model,
            vector_config,
            settings: ChatSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ChatSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Payloads of the points nearest to `question`
    #[instrument(skip(self, question))]
    pub async fn retrieve_context(&self, question: &str) -> VectorResult<Vec<serde_json::Value>> {
        let embedding = self.embedder.embed(self.model, question).await?;
        self.vector_config.validate(&embedding.values)?;

        let hits = self
            .vectors
            .search(SearchQuery::new(embedding.values, CONTEXT_LIMIT))
            .await?;

        Ok(hits.into_iter().filter_map(|hit| hit.payload).collect())
    }

    /// System instruction with the serialized context, then `history` as given,
    /// then the question.
    pub fn build_messages(
        &self,
        question: &str,
        context: &[serde_json::Value],
        history: &[ChatMessage],
    ) -> Vec<ChatMessage> {
        let context_json =
            serde_json::to_string(context).unwrap_or_else(|_| "[]".to_string());

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(format!(
            "{}\n\nContext:\n{}",
            SYSTEM_PROMPT, context_json
        )));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(question));
        messages
    }

    /// Text of the first completion for `messages`
    pub async fn complete(&self, messages: &[ChatMessage]) -> VectorResult<String> {
        self.chat
            .complete(&self.settings, messages)
            .await
            .inspect_err(|e| error!(error = %e, "Chat completion failed"))
    }

    /// Answer `question`, degrading to an empty context if retrieval fails
    #[instrument(skip_all, fields(history = history.len()))]
    pub async fn chat(
        &self,
        question: &str,
        history: &[ChatMessage],
    ) -> VectorResult<ChatResponse> {
        let (context, context_error) = match self.retrieve_context(question).await {
            Ok(context) => (context, None),
            Err(e) => {
                warn!(error = %e, "Context retrieval failed, continuing without context");
                (Vec::new(), Some(e.to_string()))
            }
        };

        let messages = self.build_messages(question, &context, history);
        let answer = self.complete(&messages).await?;
        info!(context = context.len(), "Chat answered");

        Ok(ChatResponse {
            answer,
            context,
            messages,
            context_error,
        })
    }
}
