use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::refresh::refresh;
use crate::domain::session::ports::SessionServicePort;

pub struct AppState<SS: SessionServicePort> {
    pub session_service: Arc<SS>,
}

impl<SS: SessionServicePort> Clone for AppState<SS> {
    fn clone(&self) -> Self {
        Self {
            session_service: Arc::clone(&self.session_service),
        }
    }
}

pub fn create_router<SS: SessionServicePort>(session_service: Arc<SS>) -> Router {
    let state = AppState { session_service };

    let public_routes = Router::new()
        .route("/auth/login", post(login::<SS>))
        .route("/auth/refresh", post(refresh::<SS>));

    // Headers are left out of the span: request bodies and Authorization
    // headers may carry credentials.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
