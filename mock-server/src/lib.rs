//! In-memory imitation of the VK `/method/{name}` endpoint.
//!
//! Answers in VK's envelope (`{"response": ...}` or `{"error": {...}}`) and
//! checks `access_token` and `v` the way the real API does. Walls live in
//! memory and are lost when the router is dropped.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const DEFAULT_TOKEN: &str = "test-token";

pub const ERR_UNKNOWN_METHOD: i64 = 3;
pub const ERR_AUTH_FAILED: i64 = 5;
pub const ERR_INVALID_REQUEST: i64 = 8;
pub const ERR_PARAM: i64 = 100;
pub const ERR_INVALID_USER_ID: i64 = 113;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub owner_id: i64,
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WallPage {
    pub count: usize,
    pub items: Vec<Post>,
}

#[derive(Default)]
struct Walls {
    next_id: i64,
    posts: HashMap<i64, Vec<Post>>,
}

#[derive(Clone)]
pub struct MockState {
    token: Arc<str>,
    walls: Arc<RwLock<Walls>>,
}

type Params = HashMap<String, String>;

pub fn app(token: &str) -> Router {
    let state = MockState {
        token: Arc::from(token),
        walls: Arc::new(RwLock::new(Walls::default())),
    };
    Router::new()
        .route("/method/{method}", get(call_method))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock vk api listening");
    }
    axum::serve(listener, app(token)).await
}

enum Outcome {
    Payload(Value),
    Error { code: i64, msg: String },
    Raw(&'static str),
    Bare(Value),
}

impl Outcome {
    fn error(code: i64, msg: impl Into<String>) -> Self {
        Outcome::Error {
            code,
            msg: msg.into(),
        }
    }

    fn missing(param: &str) -> Self {
        Outcome::error(
            ERR_PARAM,
            format!("One of the parameters specified was missing or invalid: {param} is undefined"),
        )
    }
}

fn envelope(outcome: Outcome, params: &Params) -> Response {
    match outcome {
        Outcome::Payload(value) => Json(json!({ "response": value })).into_response(),
        Outcome::Error { code, msg } => {
            let request_params: Vec<Value> = params
                .iter()
                .filter(|(key, _)| key.as_str() != "access_token")
                .map(|(key, value)| json!({ "key": key, "value": value }))
                .collect();
            Json(json!({
                "error": {
                    "error_code": code,
                    "error_msg": msg,
                    "request_params": request_params,
                }
            }))
            .into_response()
        }
        Outcome::Raw(body) => ([(header::CONTENT_TYPE, "text/html")], body).into_response(),
        Outcome::Bare(value) => Json(value).into_response(),
    }
}

async fn call_method(
    State(state): State<MockState>,
    Path(method): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    debug!(%method, params = params.len(), "method call");
    let outcome = dispatch(&state, &method, &params).await;
    envelope(outcome, &params)
}

async fn dispatch(state: &MockState, method: &str, params: &Params) -> Outcome {
    if params.get("access_token").map(String::as_str) != Some(&*state.token) {
        return Outcome::error(
            ERR_AUTH_FAILED,
            "User authorization failed: invalid access_token (4).",
        );
    }
    if params.get("v").map_or(true, |v| v.is_empty()) {
        return Outcome::error(ERR_INVALID_REQUEST, "Invalid request: v (version) is required");
    }

    match method {
        "users.get" => users_get(params),
        "wall.get" => wall_get(state, params).await,
        "wall.post" => wall_post(state, params).await,
        "utils.getServerTime" => Outcome::Payload(json!(server_time())),
        "test.brokenJson" => Outcome::Raw("<html><body>502 Bad Gateway</body></html>"),
        "test.noResponse" => Outcome::Bare(json!({ "result": "ok" })),
        _ => Outcome::error(ERR_UNKNOWN_METHOD, "Unknown method passed"),
    }
}

fn int_param(params: &Params, name: &str) -> Result<i64, Outcome> {
    params
        .get(name)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| Outcome::missing(name))
}

fn users_get(params: &Params) -> Outcome {
    let Some(ids) = params.get("user_ids") else {
        return Outcome::missing("user_ids");
    };
    let mut users = Vec::new();
    for id in ids.split(',').filter(|s| !s.is_empty()) {
        let Ok(id) = id.trim().parse::<i64>() else {
            return Outcome::error(ERR_INVALID_USER_ID, format!("Invalid user id: {id}"));
        };
        users.push(User {
            id,
            first_name: format!("User{id}"),
            last_name: "Mock".to_string(),
        });
    }
    Outcome::Payload(json!(users))
}

async fn wall_get(state: &MockState, params: &Params) -> Outcome {
    let owner_id = match int_param(params, "owner_id") {
        Ok(id) => id,
        Err(outcome) => return outcome,
    };
    let count = params
        .get("count")
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(20);

    let walls = state.walls.read().await;
    let posts = walls.posts.get(&owner_id).map(Vec::as_slice).unwrap_or_default();
    // Newest first, like the real wall.
    let items: Vec<Post> = posts.iter().rev().take(count).cloned().collect();
    Outcome::Payload(json!(WallPage {
        count: posts.len(),
        items,
    }))
}

async fn wall_post(state: &MockState, params: &Params) -> Outcome {
    let owner_id = match int_param(params, "owner_id") {
        Ok(id) => id,
        Err(outcome) => return outcome,
    };
    let Some(text) = params.get("message") else {
        return Outcome::missing("message");
    };

    let mut walls = state.walls.write().await;
    walls.next_id += 1;
    let post = Post {
        id: walls.next_id,
        owner_id,
        text: text.clone(),
    };
    walls.posts.entry(owner_id).or_default().push(post.clone());
    Outcome::Payload(json!({ "post_id": post.id }))
}

fn server_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
