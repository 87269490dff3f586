use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::api::server::AppState;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct AuthPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub success: bool,
}

fn accept(payload: Result<Json<AuthPayload>, JsonRejection>) -> Result<AuthPayload, AppError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| {
            debug!(%rejection, "Rejected auth payload");
            AppError::MalformedPayload
        })
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AuthPayload>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let payload = accept(payload)?;
    let success = state
        .accounts
        .register(&payload.username, &payload.password)
        .await?;

    Ok(Json(AuthResponse { success }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AuthPayload>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let payload = accept(payload)?;
    let success = state
        .accounts
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(AuthResponse { success }))
}
