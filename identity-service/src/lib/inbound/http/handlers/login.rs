use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use super::INVALID_CREDENTIALS;
use crate::domain::session::models::EmailAddress;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    payload: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;

    // A malformed email cannot belong to anyone; answer like any other failure.
    let email = EmailAddress::new(body.identifier)
        .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    state
        .session_service
        .login(LoginCommand::new(email, body.secret))
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for logging in (raw JSON)
///
/// Also accepts the `email`/`password` field names.
#[derive(Clone, Deserialize)]
pub struct LoginRequestBody {
    #[serde(alias = "email")]
    identifier: String,
    #[serde(alias = "password")]
    secret: String,
}
