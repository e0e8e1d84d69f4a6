use std::collections::HashMap;
use std::sync::Arc;

use domain_items::{Item, ItemRepository};
use tracing::{error, info, instrument, warn};

use crate::conversions::{embeddable_text, item_point};
use crate::embedding::EmbeddingProvider;
use crate::error::{VectorError, VectorResult};
use crate::models::{EmbeddingModel, OptimizerConfig, PayloadFilter, PointId, VectorConfig};
use crate::repository::VectorRepository;

/// Page size used when collecting every point that references an item
pub const SCROLL_PAGE_SIZE: u64 = 100;

/// Create the collection behind `vectors` if the store reports it missing.
///
/// Needs no item source, so operators can prepare a collection before any
/// database is reachable.
#[instrument(skip(vectors))]
pub async fn ensure_collection<V: VectorRepository + ?Sized>(
    vectors: &V,
    vector_config: VectorConfig,
    optimizers: OptimizerConfig,
) -> VectorResult<()> {
    let exists = vectors
        .collection_exists()
        .await
        .inspect_err(|e| error!(error = %e, "Collection existence check failed"))?;

    if !exists {
        vectors
            .create_collection(vector_config, optimizers)
            .await
            .inspect_err(|e| error!(error = %e, "Collection creation failed"))?;
        info!(dimension = vector_config.dimension, "Collection created");
    }

    Ok(())
}

/// Keeps the vector collection in line with the relational `items` table.
///
/// Every operation first makes sure the collection exists, then issues its
/// calls one after another. Nothing is retried.
pub struct ItemSynchronizer<V: VectorRepository, I: ItemRepository> {
    vectors: Arc<V>,
    items: Arc<I>,
    embedder: Arc<dyn EmbeddingProvider>,
    model: EmbeddingModel,
    vector_config: VectorConfig,
    optimizers: OptimizerConfig,
}

impl<V: VectorRepository, I: ItemRepository> ItemSynchronizer<V, I> {
    pub fn new(
        vectors: V,
        items: I,
        embedder: Arc<dyn EmbeddingProvider>,
        model: EmbeddingModel,
        vector_config: VectorConfig,
    ) -> Self {
        Self {
            vectors: Arc::new(vectors),
            items: Arc::new(items),
            embedder,
            model,
            vector_config,
            optimizers: OptimizerConfig::default(),
        }
    }

    pub fn with_optimizers(mut self, optimizers: OptimizerConfig) -> Self {
        self.optimizers = optimizers;
        self
    }

    /// Create the collection if the store reports it missing
    pub async fn ensure_collection(&self) -> VectorResult<()> {
        ensure_collection(self.vectors.as_ref(), self.vector_config, self.optimizers).await
    }

    /// Embed every item in one batch and upsert the valid points in one call.
    ///
    /// Items whose embedding is missing or has the wrong length are skipped.
    /// Returns the number of points written.
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> VectorResult<usize> {
        self.ensure_collection().await?;

        let items = self
            .items
            .list_all()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to load items"))?;

        if items.is_empty() {
            warn!("No items to sync");
            return Err(VectorError::NoValidPoints);
        }

        let texts: Vec<String> = items.iter().map(embeddable_text).collect();
        let embeddings = self
            .embedder
            .embed_batch(self.model, &texts)
            .await
            .inspect_err(|e| error!(error = %e, count = texts.len(), "Batch embedding failed"))?;

        let mut by_index: HashMap<usize, Vec<f32>> = embeddings
            .into_iter()
            .map(|embedding| (embedding.index, embedding.values))
            .collect();

        let mut points = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let Some(vector) = by_index.remove(&index) else {
                warn!(item_id = item.id, "No embedding returned, skipping item");
                continue;
            };

            if let Err(e) = self.vector_config.validate(&vector) {
                warn!(item_id = item.id, error = %e, "Invalid embedding, skipping item");
                continue;
            }

            points.push(item_point(PointId::generate(), vector, item));
        }

        if points.is_empty() {
            error!(items = items.len(), "No valid points after embedding");
            return Err(VectorError::NoValidPoints);
        }

        let written = self
            .vectors
            .upsert_points(points)
            .await
            .inspect_err(|e| error!(error = %e, "Bulk upsert failed"))?;

        info!(written, total = items.len(), "Full sync complete");
        Ok(written)
    }

    /// Write one item as a new point. Returns the new point id.
    #[instrument(skip(self, item), fields(item_id = item.id))]
    pub async fn sync_item(&self, item: &Item) -> VectorResult<PointId> {
        self.ensure_collection().await?;
        self.write_item(PointId::generate(), item).await
    }

    /// Rewrite the point referencing `item`, or create one if none exists.
    ///
    /// Only the first matching point is reused. Returns the id written.
    #[instrument(skip(self, item), fields(item_id = item.id))]
    pub async fn update_item(&self, item: &Item) -> VectorResult<PointId> {
        self.ensure_collection().await?;

        let page = self
            .vectors
            .scroll(PayloadFilter::back_reference(item.id), 1, None)
            .await
            .inspect_err(|e| error!(error = %e, "Point lookup failed"))?;

        let id = match page.ids.into_iter().next() {
            Some(existing) => existing,
            None => {
                info!("No existing point, creating one");
                PointId::generate()
            }
        };

        self.write_item(id, item).await
    }

    /// Delete every point referencing `item_id`.
    ///
    /// Succeeds without calling the delete endpoint when nothing matches.
    /// Returns the number of points deleted.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: i64) -> VectorResult<usize> {
        self.ensure_collection().await?;

        let ids = self.find_points(item_id).await?;
        if ids.is_empty() {
            info!(item_id, "No points reference item, nothing to delete");
            return Ok(0);
        }

        let deleted = self
            .vectors
            .delete_points(ids)
            .await
            .inspect_err(|e| error!(error = %e, item_id, "Point deletion failed"))?;

        info!(item_id, deleted, "Deleted item points");
        Ok(deleted)
    }

    async fn find_points(&self, item_id: i64) -> VectorResult<Vec<PointId>> {
        let mut ids = Vec::new();
        let mut offset = None;

        loop {
            let page = self
                .vectors
                .scroll(PayloadFilter::back_reference(item_id), SCROLL_PAGE_SIZE, offset)
                .await
                .inspect_err(|e| error!(error = %e, item_id, "Point lookup failed"))?;

            ids.extend(page.ids);
            match page.next_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(ids)
    }

    async fn write_item(&self, id: PointId, item: &Item) -> VectorResult<PointId> {
        let embedding = self
            .embedder
            .embed(self.model, &embeddable_text(item))
            .await
            .inspect_err(|e| error!(error = %e, "Embedding failed"))?;

        self.vector_config
            .validate(&embedding.values)
            .inspect_err(|e| error!(error = %e, "Embedding rejected"))?;

        self.vectors
            .upsert_points(vec![item_point(id.clone(), embedding.values, item)])
            .await
            .inspect_err(|e| error!(error = %e, point_id = %id, "Upsert failed"))?;

        info!(point_id = %id, "Item synced");
        Ok(id)
    }
}
