//! Items Domain
//!
//! Read-only access to the relational `items` table that feeds the vector sync
//! pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  ItemRepository  │  ← list_all / get_by_id (trait)
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────────────────┐
//!    │                        │
//! ┌──▼───────────────┐ ┌──────▼─────────────────┐
//! │ PgItemRepository │ │ InMemoryItemRepository │
//! │   (sea-orm)      │ │   (dev / tests)        │
//! └──────────────────┘ └────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::{FromEnv, database::DatabaseConfig};
//! use domain_items::{ItemRepository, PgItemRepository, postgres};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = postgres::connect(&DatabaseConfig::from_env()?).await?;
//! let items = PgItemRepository::new(db).list_all().await?;
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;

pub use error::{ItemError, ItemResult};
pub use models::Item;
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
