use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;

use super::ApiError;

pub const JSON_INVALIDO: &str = "JSON inválido";

/// JSON body that falls back to `T::default()` when the request carries no
/// JSON content type or an empty body. Only malformed JSON is rejected.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(JsonBody(T::default()));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Failed to read body: {}", rejection);
            ApiError::BadRequest(JSON_INVALIDO.to_string())
        })?;

        parse_body(&bytes).map(JsonBody)
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let essence = value.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}

fn parse_body<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!("Rejected JSON body: {}", e);
        ApiError::BadRequest(JSON_INVALIDO.to_string())
    })
}
