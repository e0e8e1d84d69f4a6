use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::{
    OptimizerConfig, PayloadFilter, Point, PointId, ScoredPoint, ScrollPage, SearchQuery,
    VectorConfig,
};

/// Operations on the single collection a repository is bound to.
///
/// Abstracts the vector database so synchronizer and chat logic can be tested
/// without a running Qdrant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// `Ok(false)` only for a definite "not found"; any other failure is an error
    async fn collection_exists(&self) -> VectorResult<bool>;

    async fn create_collection(
        &self,
        config: VectorConfig,
        optimizers: OptimizerConfig,
    ) -> VectorResult<()>;

    /// Upsert points and wait for the write to be applied. Returns the count written.
    async fn upsert_points(&self, points: Vec<Point>) -> VectorResult<usize>;

    /// One page of point ids whose payload matches `filter`
    async fn scroll(
        &self,
        filter: PayloadFilter,
        limit: u64,
        offset: Option<PointId>,
    ) -> VectorResult<ScrollPage>;

    /// Delete points by id. Returns the count requested for deletion.
    async fn delete_points(&self, ids: Vec<PointId>) -> VectorResult<usize>;

    async fn search(&self, query: SearchQuery) -> VectorResult<Vec<ScoredPoint>>;
}
