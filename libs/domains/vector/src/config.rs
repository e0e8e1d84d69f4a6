//! Process-wide settings, read once and handed to each component.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default, env_required};

use crate::models::{ChatSettings, DistanceMetric, EmbeddingModel, VectorConfig};
use crate::qdrant::QdrantConfig;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible provider configuration, shared by embeddings and chat
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl FromEnv for OpenAIConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(env_required("OPENAI_API_KEY")?)
            .with_base_url(env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)))
    }
}

/// Everything the synchronizer and the chat helper need.
///
/// The embedding model is pinned here so both write and query paths produce
/// vectors of the same model and length.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSyncConfig {
    pub qdrant: QdrantConfig,
    pub openai: OpenAIConfig,
    pub vector: VectorConfig,
    pub embedding_model: EmbeddingModel,
    pub chat: ChatSettings,
}

impl VectorSyncConfig {
    /// Check the collection dimensionality against the pinned model
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vector.dimension == 0 {
            return Err(ConfigError::Invalid(
                "VECTOR_DIMENSION must be greater than zero".to_string(),
            ));
        }

        let native = self.embedding_model.dimension();
        if native != self.vector.dimension {
            return Err(ConfigError::Invalid(format!(
                "VECTOR_DIMENSION is {} but {} produces {}-dimensional embeddings",
                self.vector.dimension, self.embedding_model, native
            )));
        }

        Ok(())
    }
}

impl FromEnv for VectorSyncConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let vector = VectorConfig::new(env_parse_or_default("VECTOR_DIMENSION", 1536)?)
            .with_distance(env_parse_or_default("VECTOR_DISTANCE", DistanceMetric::Cosine)?);

        let defaults = ChatSettings::default();
        let chat = ChatSettings {
            model: env_or_default("CHAT_MODEL", &defaults.model),
            ..defaults
        };

        let config = Self {
            qdrant: QdrantConfig::from_env()?,
            openai: OpenAIConfig::from_env()?,
            vector,
            embedding_model: env_parse_or_default(
                "EMBEDDING_MODEL",
                EmbeddingModel::TextEmbedding3Small,
            )?,
            chat,
        };
        config.validate()?;

        Ok(config)
    }
}
