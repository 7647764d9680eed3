//! # usuarios-api
//!
//! HTTP CRUD service over the PostgreSQL `usuarios` table.

pub mod config;
pub mod database;
pub mod handlers;
pub mod state;
pub mod telemetry;
pub mod utils;

#[cfg(test)]
mod test;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use state::AppState;
use utils::ApiError;

pub const PANIC_MESSAGE: &str = "Error interno del servidor";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::health_check))
        .route("/api/hora", get(handlers::health::hora))
        .route(
            "/api/usuarios",
            get(handlers::usuarios::list_usuarios).post(handlers::usuarios::create_usuario),
        )
        .route(
            "/api/usuarios/{id}",
            get(handlers::usuarios::get_usuario)
                .put(handlers::usuarios::update_usuario)
                .delete(handlers::usuarios::delete_usuario),
        )
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// A panicking handler answers 500 with the usual error body.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("Handler panicked: {}", detail);

    ApiError::Internal(PANIC_MESSAGE.to_string()).into_response()
}
