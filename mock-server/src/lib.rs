use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    pub auto_start: bool,
}

#[derive(Deserialize)]
pub struct CreateSite {
    pub name: String,
    #[serde(default)]
    pub auto_start: bool,
}

#[derive(Deserialize)]
pub struct PatchSite {
    pub name: Option<String>,
    pub auto_start: Option<bool>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Site>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/sites", get(list_sites).post(create_site))
        .route(
            "/sites/{id}",
            get(get_site).patch(patch_site).delete(delete_site),
        )
        .route("/echo", any(echo))
        .route("/ping", any(|| async { "pong" }))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_sites(State(db): State<Db>) -> Json<Vec<Site>> {
    let sites = db.read().await;
    Json(sites.values().cloned().collect())
}

async fn create_site(
    State(db): State<Db>,
    Json(input): Json<CreateSite>,
) -> Result<(StatusCode, Json<Site>), (StatusCode, Json<serde_json::Value>)> {
    if input.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"error": "invalid"}))));
    }
    let site = Site {
        id: Uuid::new_v4(),
        name: input.name,
        auto_start: input.auto_start,
    };
    db.write().await.insert(site.id, site.clone());
    Ok((StatusCode::CREATED, Json(site)))
}

async fn get_site(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Site>, StatusCode> {
    let sites = db.read().await;
    sites.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn patch_site(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<PatchSite>,
) -> Result<Json<Site>, StatusCode> {
    let mut sites = db.write().await;
    let site = sites.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        site.name = name;
    }
    if let Some(auto_start) = input.auto_start {
        site.auto_start = auto_start;
    }
    Ok(Json(site.clone()))
}

async fn delete_site(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    let mut sites = db.write().await;
    sites.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

/// Reflect the request's method, content type, and body back as JSON so
/// client tests can observe the wire shape of each verb.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<serde_json::Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    Json(json!({
        "method": method.as_str(),
        "content_type": content_type,
        "body": body,
    }))
}
