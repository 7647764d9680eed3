//! CRUD handlers for `/api/usuarios`.
//!
//! Each handler issues a single repository call and maps its own storage
//! errors to a generic message; the detail only goes to the log.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use crate::database::{ActualizarUsuario, NuevoUsuario, RepositoryError, Usuario};
use crate::state::AppState;
use crate::utils::{ApiError, JsonBody};

pub const CAMPOS_OBLIGATORIOS: &str = "nombre, correo y password son obligatorios";
pub const CORREO_DUPLICADO: &str = "El correo ya existe";
pub const ID_INVALIDO: &str = "id inválido";

/// GET /api/usuarios
pub async fn list_usuarios(State(state): State<AppState>) -> Result<Json<Vec<Usuario>>, ApiError> {
    let usuarios = state.repository.list().await.map_err(|e| {
        error!("GET /api/usuarios -> {}", e);
        ApiError::Internal("Error al obtener usuarios".to_string())
    })?;

    Ok(Json(usuarios))
}

/// POST /api/usuarios
pub async fn create_usuario(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NuevoUsuario>,
) -> Result<(StatusCode, Json<Usuario>), ApiError> {
    let nuevo = payload
        .validate()
        .ok_or_else(|| ApiError::BadRequest(CAMPOS_OBLIGATORIOS.to_string()))?;

    let usuario = state.repository.create(&nuevo).await.map_err(|e| {
        error!("POST /api/usuarios -> {}", e);
        match e {
            RepositoryError::UniqueViolation(_) => ApiError::Conflict(CORREO_DUPLICADO.to_string()),
            RepositoryError::Database(_) => {
                ApiError::Internal("Error al insertar usuario".to_string())
            }
        }
    })?;

    Ok((StatusCode::CREATED, Json(usuario)))
}

/// GET /api/usuarios/:id
pub async fn get_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Usuario>, ApiError> {
    let id = parse_id(&id)?;

    let usuario = state.repository.find_by_id(id).await.map_err(|e| {
        error!("GET /api/usuarios/:id -> {}", e);
        ApiError::Internal("Error al obtener usuario".to_string())
    })?;

    usuario.map(Json).ok_or(ApiError::NotFound)
}

/// PUT /api/usuarios/:id
///
/// Unique violations on `correo` are reported as a plain 500 here, unlike create.
pub async fn update_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(cambios): JsonBody<ActualizarUsuario>,
) -> Result<Json<Usuario>, ApiError> {
    let id = parse_id(&id)?;

    let usuario = state.repository.update(id, &cambios).await.map_err(|e| {
        error!("PUT /api/usuarios/:id -> {}", e);
        ApiError::Internal("Error al actualizar".to_string())
    })?;

    usuario.map(Json).ok_or(ApiError::NotFound)
}

/// DELETE /api/usuarios/:id
pub async fn delete_usuario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    let deleted = state.repository.delete(id).await.map_err(|e| {
        error!("DELETE /api/usuarios/:id -> {}", e);
        ApiError::Internal("Error al eliminar".to_string())
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::BadRequest(ID_INVALIDO.to_string()))
}
