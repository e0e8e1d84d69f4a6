//! Item Sync CLI
//!
//! Operator entry point for the vector sync pipeline.
//!
//! ## Architecture
//!
//! ```text
//! PostgreSQL (items)
//!   ↓ (PgItemRepository)
//! ItemSynchronizer ── OpenAI embeddings
//!   ↓
//! Qdrant collection ◄── RetrievalChat ── OpenAI chat
//! ```
//!
//! ## Commands
//!
//! - `ensure`: create the collection if missing (no database needed)
//! - `sync`: full batch sync of every item
//! - `upsert --id N` / `delete --id N`: single item maintenance
//! - `ask "question"`: retrieval-augmented answer

pub mod cli;

use std::sync::Arc;

use clap::Parser;
use core_config::database::DatabaseConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_items::{ItemError, ItemRepository, PgItemRepository, postgres};
use domain_vector::{
    ItemSynchronizer, OpenAIChatProvider, OpenAIProvider, OptimizerConfig, QdrantRepository,
    RetrievalChat, VectorSyncConfig, sync,
};
use eyre::{Result, WrapErr};
use tracing::info;

use crate::cli::{Cli, Commands};

/// Parse arguments, load configuration and run one command
pub async fn run() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let config = VectorSyncConfig::from_env().wrap_err("Failed to load vector sync configuration")?;

    info!(
        "Connecting to Qdrant at {} (collection {})...",
        config.qdrant.base_url(),
        config.qdrant.collection
    );
    let vectors = QdrantRepository::connect(config.qdrant.clone())
        .await
        .wrap_err("Failed to connect to Qdrant")?;

    let embedder = Arc::new(
        OpenAIProvider::new(config.openai.clone()).wrap_err("Failed to build embedding client")?,
    );

    match cli.command {
        Commands::Ask { question, verbose } => {
            let chat = RetrievalChat::new(
                vectors,
                embedder,
                Arc::new(
                    OpenAIChatProvider::new(config.openai.clone())
                        .wrap_err("Failed to build chat client")?,
                ),
                config.embedding_model,
                config.vector,
            )
            .with_settings(config.chat.clone());

            let response = chat.chat(&question, &[]).await.wrap_err("Chat failed")?;
            if verbose {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.answer);
            }
        }

        Commands::Ensure => {
            sync::ensure_collection(&vectors, config.vector, OptimizerConfig::default())
                .await
                .wrap_err("Failed to ensure collection")?;
            info!("Collection {} ready", vectors.collection());
        }

        Commands::Sync => {
            let (synchronizer, _) = synchronizer(&config, vectors, embedder).await?;
            let written = synchronizer.sync_all().await.wrap_err("Full sync failed")?;
            info!("Full sync complete: {} points written", written);
        }

        Commands::Upsert { id } => {
            let (synchronizer, items) = synchronizer(&config, vectors, embedder).await?;
            let item = items
                .get_by_id(id)
                .await?
                .ok_or(ItemError::NotFound(id))?;
            let point = synchronizer
                .update_item(&item)
                .await
                .wrap_err_with(|| format!("Failed to sync item {}", id))?;
            info!("Item {} synced as point {}", id, point);
        }

        Commands::Delete { id } => {
            let (synchronizer, _) = synchronizer(&config, vectors, embedder).await?;
            let deleted = synchronizer
                .delete_item(id)
                .await
                .wrap_err_with(|| format!("Failed to delete points of item {}", id))?;
            info!("Deleted {} points for item {}", deleted, id);
        }
    }

    Ok(())
}

type Synchronizer = ItemSynchronizer<QdrantRepository, PgItemRepository>;

/// Connect to the item database and wire the synchronizer.
///
/// Also returns a handle on the item table for single-item lookups.
async fn synchronizer(
    config: &VectorSyncConfig,
    vectors: QdrantRepository,
    embedder: Arc<OpenAIProvider>,
) -> Result<(Synchronizer, PgItemRepository)> {
    let database = DatabaseConfig::from_env().wrap_err("Failed to load database configuration")?;
    let db = postgres::connect(&database)
        .await
        .wrap_err("Failed to connect to item database")?;
    let items = PgItemRepository::new(db);

    let synchronizer = ItemSynchronizer::new(
        vectors,
        items.clone(),
        embedder,
        config.embedding_model,
        config.vector,
    );

    Ok((synchronizer, items))
}
