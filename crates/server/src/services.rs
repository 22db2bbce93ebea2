use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub adapter: Arc<adapter::Client>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceInput {
    pub desired_state: Value,
}

pub async fn create(
    State(state): State<ServerState>,
    Json(specs): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let body = state.adapter.create_services(&specs).await?;
    info!("submitted service specs to orchestrator");
    Ok(Json(body))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let record = state.adapter.get_service(&id).await?;
    Ok(Json(record))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateServiceInput>,
) -> Result<Json<Value>, AppError> {
    let ok = state.adapter.update_service(&id, input.desired_state).await?;
    info!(%id, "requested desired-state change");
    Ok(Json(json!({ "ok": ok })))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let ok = state.adapter.delete_service(&id).await?;
    info!(%id, "requested service deletion");
    Ok(Json(json!({ "ok": ok })))
}
