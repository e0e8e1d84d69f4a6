//! Vector Domain Library
//!
//! Keeps a Qdrant collection in line with the relational `items` table and
//! answers questions over it with retrieval-augmented chat.
//!
//! # Architecture
//!
//! ```text
//!   items table                                   user question
//!       │                                               │
//! ┌─────▼────────────┐                         ┌────────▼────────┐
//! │ ItemSynchronizer │  ← write path           │  RetrievalChat  │  ← read path
//! └──┬───────────┬───┘                         └──┬──────────┬───┘
//!    │           │                                │          │
//!    │  ┌────────▼──────────┐                     │   ┌──────▼───────┐
//!    │  │ EmbeddingProvider │◄────────────────────┤   │ ChatProvider │
//!    │  │  (OpenAIProvider) │                     │   │   (OpenAI)   │
//!    │  └───────────────────┘                     │   └──────────────┘
//! ┌──▼────────────────────────────────────────────▼──┐
//! │        VectorRepository (QdrantRepository)       │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Both paths share one [`VectorSyncConfig`], which pins the embedding model
//! and vector dimensionality of the collection.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use core_config::FromEnv;
//! use domain_items::InMemoryItemRepository;
//! use domain_vector::{ItemSynchronizer, OpenAIProvider, QdrantRepository, VectorSyncConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VectorSyncConfig::from_env()?;
//! let vectors = QdrantRepository::connect(config.qdrant.clone()).await?;
//! let embedder = Arc::new(OpenAIProvider::new(config.openai.clone())?);
//!
//! let synchronizer = ItemSynchronizer::new(
//!     vectors,
//!     InMemoryItemRepository::new(),
//!     embedder,
//!     config.embedding_model,
//!     config.vector,
//! );
//! let written = synchronizer.sync_all().await?;
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod config;
pub mod conversions;
pub mod embedding;
pub mod error;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod sync;

pub use chat::{ChatProvider, OpenAIChatProvider, RetrievalChat};
pub use config::{OpenAIConfig, VectorSyncConfig};
pub use embedding::{EmbeddingProvider, OpenAIProvider};
pub use error::{VectorError, VectorResult};
pub use models::{
    ChatMessage, ChatResponse, ChatRole, ChatSettings, DistanceMetric, EmbeddingModel,
    EmbeddingResult, ItemPayload, OptimizerConfig, PayloadFilter, Point, PointId, ScoredPoint,
    ScrollPage, SearchQuery, VectorConfig,
};
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorRepository;
pub use sync::ItemSynchronizer;
