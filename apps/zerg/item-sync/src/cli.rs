use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "item-sync")]
#[command(about = "Sync the items table into the Qdrant collection and query it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum Commands {
    /// Create the collection if it does not exist yet
    Ensure,

    /// Embed every item and upsert all points in one batch
    Sync,

    /// Create or refresh the point of a single item
    Upsert {
        /// Item id in the relational table
        #[arg(long)]
        id: i64,
    },

    /// Remove every point that references an item
    Delete {
        /// Item id in the relational table
        #[arg(long)]
        id: i64,
    },

    /// Ask a question answered from the collection
    Ask {
        question: String,

        /// Print the retrieved context and messages as JSON
        #[arg(long)]
        verbose: bool,
    },
}
