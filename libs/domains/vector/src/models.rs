use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::{VectorError, VectorResult};

/// Payload key linking a point back to its `items` row
pub const BACK_REFERENCE_KEY: &str = "original_id";

/// Distance metric, serialized with Qdrant's names
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclid,
    Dot,
    Manhattan,
}

/// Vector collection configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorConfig {
    pub dimension: usize,
    pub distance: DistanceMetric,
}

impl VectorConfig {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            distance: DistanceMetric::default(),
        }
    }

    pub fn with_distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }

    /// Reject vectors that do not match the collection's dimensionality
    pub fn validate(&self, vector: &[f32]) -> VectorResult<()> {
        if vector.len() == self.dimension {
            Ok(())
        } else {
            Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            })
        }
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self::new(1536)
    }
}

/// Indexing optimizer thresholds sent when a collection is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub default_segment_number: u32,
    pub indexing_threshold: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            default_segment_number: 2,
            indexing_threshold: 20_000,
        }
    }
}

/// Qdrant point identifier: either an unsigned integer or a UUID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Num(u64),
    Uuid(Uuid),
}

impl PointId {
    /// Fresh random identifier for a new point
    pub fn generate() -> Self {
        PointId::Uuid(Uuid::new_v4())
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointId::Num(n) => write!(f, "{}", n),
            PointId::Uuid(u) => write!(f, "{}", u),
        }
    }
}

/// Payload stored alongside every item vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub original_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A point ready to be upserted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub id: PointId,
    pub vector: Vec<f32>,
    pub payload: ItemPayload,
}

/// A nearest-neighbour hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub id: PointId,
    pub score: f32,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

/// Nearest-neighbour query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub vector: Vec<f32>,
    pub limit: u64,
    pub with_payload: bool,
    pub with_vector: bool,
}

impl SearchQuery {
    /// Payloads included, vectors excluded
    pub fn new(vector: Vec<f32>, limit: u64) -> Self {
        Self {
            vector,
            limit,
            with_payload: true,
            with_vector: false,
        }
    }
}

/// Payload filter in Qdrant's `{"must": [...]}` form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadFilter {
    pub must: Vec<FieldCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCondition {
    pub key: String,
    #[serde(rename = "match")]
    pub matches: MatchValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchValue {
    pub value: serde_json::Value,
}

impl PayloadFilter {
    /// Exact match on a single payload field
    pub fn field_equals(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            must: vec![FieldCondition {
                key: key.into(),
                matches: MatchValue {
                    value: value.into(),
                },
            }],
        }
    }

    /// Points whose back-reference equals `item_id`
    pub fn back_reference(item_id: i64) -> Self {
        Self::field_equals(BACK_REFERENCE_KEY, item_id)
    }
}

/// One page of a filtered scroll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollPage {
    pub ids: Vec<PointId>,
    pub next_offset: Option<PointId>,
}

/// Embedding model selection. One model is pinned per collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum EmbeddingModel {
    /// text-embedding-3-small (1536 dimensions)
    #[default]
    #[strum(serialize = "text-embedding-3-small")]
    TextEmbedding3Small,
    /// text-embedding-3-large (3072 dimensions)
    #[strum(serialize = "text-embedding-3-large")]
    TextEmbedding3Large,
    /// text-embedding-ada-002 (1536 dimensions, legacy)
    #[strum(serialize = "text-embedding-ada-002")]
    TextEmbeddingAda002,
}

impl EmbeddingModel {
    pub fn dimension(&self) -> usize {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::TextEmbeddingAda002 => 1536,
        }
    }

    pub fn model_name(&self) -> &'static str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::TextEmbeddingAda002 => "text-embedding-ada-002",
        }
    }
}

/// One embedding, tagged with the position of its input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResult {
    pub index: usize,
    pub values: Vec<f32>,
    pub tokens_used: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Completion parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Result of a retrieval-augmented chat turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    /// Payloads of the retrieved points, empty when retrieval failed
    pub context: Vec<serde_json::Value>,
    /// Exact message sequence sent to the provider
    pub messages: Vec<ChatMessage>,
    /// Why context retrieval was skipped, if it was
    pub context_error: Option<String>,
}
