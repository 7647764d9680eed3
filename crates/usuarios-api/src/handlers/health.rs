use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;
use crate::utils::time::now_iso8601;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub ts: String,
}

#[derive(Debug, Serialize)]
pub struct HoraResponse {
    pub fecha: String,
}

/// GET /
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: state.service_name.clone(),
        ts: now_iso8601(),
    })
}

/// GET /api/hora
pub async fn hora() -> Json<HoraResponse> {
    Json(HoraResponse {
        fecha: now_iso8601(),
    })
}
