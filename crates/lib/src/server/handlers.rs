use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
};
use serde::Serialize;

use super::error::ApiError;
use super::state::AppState;
use crate::auth::Principal;
use crate::sync::SyncData;
use crate::user::{Credentials, User};

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Liveness probe. Never rate limited.
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "OK" })
}

pub async fn register(State(state): State<AppState>, body: Bytes) -> Result<Json<User>, ApiError> {
    let credentials: Credentials =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_body())?;
    let user = state
        .instance
        .register(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(user))
}

pub async fn login(State(state): State<AppState>, body: Bytes) -> Result<Json<User>, ApiError> {
    let credentials: Credentials =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_body())?;
    let user = state
        .instance
        .login(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(user))
}

pub async fn pull(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<SyncData>, ApiError> {
    Ok(Json(state.instance.pull(&principal).await?))
}

pub async fn push(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    let data: SyncData = serde_json::from_slice(&body).map_err(|_| ApiError::invalid_body())?;
    state.instance.push(&principal, &data).await?;
    Ok(Json(StatusResponse { status: "ok" }))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
