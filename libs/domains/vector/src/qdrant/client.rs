use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{error, info, instrument};

use super::QdrantConfig;
use crate::error::{VectorError, VectorResult};
use crate::models::{
    OptimizerConfig, PayloadFilter, Point, PointId, ScoredPoint, ScrollPage, SearchQuery,
    VectorConfig,
};
use crate::repository::VectorRepository;

/// Qdrant REST implementation of VectorRepository, bound to one collection
#[derive(Debug, Clone)]
pub struct QdrantRepository {
    client: Client,
    base_url: String,
    collection: String,
}

/// Qdrant wraps every successful response as `{"result": ..., "status": "ok", "time": ...}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct ScrollResult {
    points: Vec<ScrolledPoint>,
    next_page_offset: Option<PointId>,
}

#[derive(Debug, Deserialize)]
struct ScrolledPoint {
    id: PointId,
}

impl QdrantRepository {
    /// Build the HTTP client and verify the server reports ready.
    ///
    /// Fails with [`VectorError::Unavailable`] when `/readyz` cannot be reached
    /// or does not answer 2xx.
    #[instrument(skip(config), fields(base_url = %config.base_url(), collection = %config.collection))]
    pub async fn connect(config: QdrantConfig) -> VectorResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let value = HeaderValue::from_str(api_key)
                .map_err(|e| VectorError::Config(format!("Invalid QDRANT_API_KEY: {}", e)))?;
            headers.insert("api-key", value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        let repository = Self {
            client,
            base_url: config.base_url(),
            collection: config.collection,
        };
        repository.ready().await?;

        info!("Connected to Qdrant");
        Ok(repository)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    async fn ready(&self) -> VectorResult<()> {
        let url = format!("{}/readyz", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = %e, "Qdrant readiness probe failed");
            VectorError::Unavailable(format!("{}: {}", url, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "Qdrant is not ready");
            return Err(VectorError::Unavailable(format!(
                "{} answered {}: {}",
                url, status, body
            )));
        }

        Ok(())
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    fn points_url(&self, action: &str) -> String {
        format!("{}/points{}", self.collection_url(), action)
    }

    /// Turn a non-2xx response into [`VectorError::Upstream`] carrying the body
    async fn check(&self, operation: &'static str, response: Response) -> VectorResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            collection = %self.collection,
            operation,
            %status,
            %body,
            "Qdrant request failed"
        );
        Err(VectorError::Upstream {
            operation,
            status: status.as_u16(),
            body,
        })
    }

    async fn result<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        response: Response,
    ) -> VectorResult<T> {
        let envelope: Envelope<T> = self.check(operation, response).await?.json().await?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn collection_exists(&self) -> VectorResult<bool> {
        let response = self.client.get(self.collection_url()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }

        self.check("get collection", response).await?;
        Ok(true)
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn create_collection(
        &self,
        config: VectorConfig,
        optimizers: OptimizerConfig,
    ) -> VectorResult<()> {
        let body = json!({
            "vectors": {
                "size": config.dimension,
                "distance": config.distance,
            },
            "optimizers_config": optimizers,
        });

        let response = self
            .client
            .put(self.collection_url())
            .json(&body)
            .send()
            .await?;
        self.check("create collection", response).await?;

        info!(dimension = config.dimension, distance = %config.distance, "Created collection");
        Ok(())
    }

    #[instrument(skip(self, points), fields(collection = %self.collection, count = points.len()))]
    async fn upsert_points(&self, points: Vec<Point>) -> VectorResult<usize> {
        let count = points.len();
        let response = self
            .client
            .put(self.points_url("?wait=true"))
            .json(&json!({ "points": points }))
            .send()
            .await?;
        self.check("upsert points", response).await?;

        Ok(count)
    }

    #[instrument(skip(self, filter), fields(collection = %self.collection))]
    async fn scroll(
        &self,
        filter: PayloadFilter,
        limit: u64,
        offset: Option<PointId>,
    ) -> VectorResult<ScrollPage> {
        let mut body = json!({
            "filter": filter,
            "limit": limit,
            "with_payload": false,
            "with_vector": false,
        });
        if let Some(offset) = offset {
            body["offset"] = serde_json::to_value(offset)?;
        }

        let response = self
            .client
            .post(self.points_url("/scroll"))
            .json(&body)
            .send()
            .await?;
        let result: ScrollResult = self.result("scroll points", response).await?;

        Ok(ScrollPage {
            ids: result.points.into_iter().map(|p| p.id).collect(),
            next_offset: result.next_page_offset,
        })
    }

    #[instrument(skip(self, ids), fields(collection = %self.collection, count = ids.len()))]
    async fn delete_points(&self, ids: Vec<PointId>) -> VectorResult<usize> {
        let count = ids.len();
        let response = self
            .client
            .post(self.points_url("/delete?wait=true"))
            .json(&json!({ "points": ids }))
            .send()
            .await?;
        self.check("delete points", response).await?;

        Ok(count)
    }

    #[instrument(skip(self, query), fields(collection = %self.collection, limit = query.limit))]
    async fn search(&self, query: SearchQuery) -> VectorResult<Vec<ScoredPoint>> {
        let response = self
            .client
            .post(self.points_url("/search"))
            .json(&query)
            .send()
            .await?;

        self.result("search points", response).await
    }
}
