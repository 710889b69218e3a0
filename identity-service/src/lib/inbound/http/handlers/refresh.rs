use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    payload: Result<Json<RefreshRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .session_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for exchanging a refresh token (raw JSON)
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequestBody {
    refresh_token: String,
}
