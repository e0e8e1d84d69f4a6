//! Item Sync CLI - Entry Point

#[tokio::main]
async fn main() -> eyre::Result<()> {
    zerg_item_sync::run().await
}
