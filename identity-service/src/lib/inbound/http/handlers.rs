use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::session::models::Session;
use crate::session::errors::SessionError;

pub mod login;
pub mod refresh;

/// Message returned for every rejected credential or token.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            // Detail is logged by the session service, never sent to the client.
            SessionError::StoreError(_)
            | SessionError::PasswordError(_)
            | SessionError::TokenError(_)
            | SessionError::Unknown(_) => {
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => {
                ApiError::UnprocessableEntity(rejection.body_text())
            }
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Token response shared by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub role: String,
    pub principal_id: i64,
}

impl From<Session> for TokenResponseData {
    fn from(session: Session) -> Self {
        Self {
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
            role: session.principal.role.as_str().to_string(),
            principal_id: session.principal.id.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtError;

    use super::*;

    #[test]
    fn test_invalid_credentials_is_unauthorized() {
        let err = ApiError::from(SessionError::InvalidCredentials);
        assert_eq!(err, ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let errors = vec![
            SessionError::StoreError("db host 10.0.0.5 unreachable".to_string()),
            SessionError::PasswordError("Invalid password salt".to_string()),
            SessionError::TokenError(JwtError::EncodingFailed("bad key".to_string())),
            SessionError::Unknown("join error".to_string()),
        ];

        for err in errors {
            assert_eq!(
                ApiError::from(err),
                ApiError::InternalServerError("Internal server error".to_string())
            );
        }
    }

    #[test]
    fn test_token_response_serializes_camel_case() {
        let data = TokenResponseData {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            role: "ADMIN".to_string(),
            principal_id: 7,
        };

        let json = serde_json::to_value(ApiResponseBody::new(StatusCode::OK, data)).unwrap();
        assert_eq!(json["status_code"], 200);
        assert_eq!(json["data"]["accessToken"], "a");
        assert_eq!(json["data"]["refreshToken"], "r");
        assert_eq!(json["data"]["role"], "ADMIN");
        assert_eq!(json["data"]["principalId"], 7);
    }
}
