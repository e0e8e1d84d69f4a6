//! In-process fakes of the Qdrant REST API and the OpenAI API.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const DIM: usize = 1536;

#[derive(Default)]
pub struct FakeState {
    pub ready: bool,
    pub collections: BTreeMap<String, Value>,
    /// Stored points keyed by their serialized id
    pub points: BTreeMap<String, Value>,
    pub upsert_calls: usize,
    pub delete_calls: usize,
    pub embedding_inputs: Vec<Vec<String>>,
    pub chat_requests: Vec<Value>,
    /// Collections whose point writes are rejected with a 400
    pub reject_writes_for: Option<String>,
    /// Key the readiness probe requires in the `api-key` header
    pub required_api_key: Option<String>,
}

pub type Shared = Arc<Mutex<FakeState>>;

pub struct FakeServer {
    pub base_url: String,
    pub port: u16,
    pub state: Shared,
}

impl FakeServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            ready: true,
            ..Default::default()
        }));

        let router = Router::new()
            .route("/readyz", get(readyz))
            .route("/collections/{name}", get(get_collection).put(create_collection))
            .route("/collections/{name}/points", put(upsert_points))
            .route("/collections/{name}/points/scroll", post(scroll_points))
            .route("/collections/{name}/points/delete", post(delete_points))
            .route("/collections/{name}/points/search", post(search_points))
            .route("/v1/embeddings", post(embeddings))
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            port,
            state,
        }
    }

    pub fn stored_payloads(&self) -> Vec<Value> {
        let state = self.state.lock().unwrap();
        state.points.values().map(|p| p["payload"].clone()).collect()
    }
}

fn ok(result: Value) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({"result": result, "status": "ok", "time": 0.001})),
    )
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"status": {"error": message}, "time": 0.001})))
}

async fn readyz(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, String) {
    let state = state.lock().unwrap();
    if let Some(required) = &state.required_api_key {
        let sent = headers.get("api-key").and_then(|v| v.to_str().ok());
        if sent != Some(required.as_str()) {
            return (StatusCode::UNAUTHORIZED, "Must provide an API key".to_string());
        }
    }

    if state.ready {
        (StatusCode::OK, "all shards are ready".to_string())
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "some shards are not ready".to_string())
    }
}

async fn get_collection(
    State(state): State<Shared>,
    Path(name): Path<String>,
) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    match state.collections.get(&name) {
        Some(config) => ok(json!({"status": "green", "config": {"params": config}})),
        None => failure(
            StatusCode::NOT_FOUND,
            &format!("Not found: Collection `{}` doesn't exist!", name),
        ),
    }
}

async fn create_collection(
    State(state): State<Shared>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.lock().unwrap().collections.insert(name, body);
    ok(json!(true))
}

async fn upsert_points(
    State(state): State<Shared>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if state.reject_writes_for.as_deref() == Some(name.as_str()) {
        return failure(StatusCode::BAD_REQUEST, "Wrong input: Vector dimension error");
    }

    state.upsert_calls += 1;
    for point in body["points"].as_array().cloned().unwrap_or_default() {
        state.points.insert(point["id"].to_string(), point);
    }
    ok(json!({"operation_id": state.upsert_calls, "status": "completed"}))
}

async fn scroll_points(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    let condition = &body["filter"]["must"][0];
    let key = condition["key"].as_str().unwrap_or_default();
    let value = &condition["match"]["value"];
    let limit = body["limit"].as_u64().unwrap_or(10) as usize;
    let offset = body.get("offset").map(|o| o.to_string());

    let matching: Vec<&Value> = state
        .points
        .iter()
        .filter(|(id, _)| offset.as_ref().is_none_or(|o| *id >= o))
        .map(|(_, point)| point)
        .filter(|point| &point["payload"][key] == value)
        .collect();

    let page: Vec<Value> = matching
        .iter()
        .take(limit)
        .map(|p| json!({"id": p["id"], "payload": null}))
        .collect();
    let next = matching.get(limit).map(|p| p["id"].clone());

    ok(json!({"points": page, "next_page_offset": next}))
}

async fn delete_points(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.delete_calls += 1;
    for id in body["points"].as_array().cloned().unwrap_or_default() {
        state.points.remove(&id.to_string());
    }
    ok(json!({"operation_id": 1, "status": "completed"}))
}

async fn search_points(
    State(state): State<Shared>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    if !state.collections.contains_key(&name) {
        return failure(
            StatusCode::NOT_FOUND,
            &format!("Not found: Collection `{}` doesn't exist!", name),
        );
    }

    let limit = body["limit"].as_u64().unwrap_or(10) as usize;
    let hits: Vec<Value> = state
        .points
        .values()
        .take(limit)
        .enumerate()
        .map(|(rank, p)| json!({"id": p["id"], "score": 1.0 - rank as f64 * 0.1, "payload": p["payload"]}))
        .collect();
    ok(json!(hits))
}

/// Texts containing "short" get a truncated embedding
async fn embeddings(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let inputs: Vec<String> = body["input"]
        .as_array()
        .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    let data: Vec<Value> = inputs
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let len = if text.contains("short") { DIM / 2 } else { DIM };
            json!({"object": "embedding", "index": index, "embedding": vec![0.01f32; len]})
        })
        .rev()
        .collect();

    state.lock().unwrap().embedding_inputs.push(inputs);
    Json(json!({"data": data, "usage": {"prompt_tokens": 4, "total_tokens": 4}}))
}

async fn chat_completions(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    state.lock().unwrap().chat_requests.push(body);
    Json(json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "We have a chair."}}]
    }))
}
