use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// JSON body extractor whose rejections use the service error envelope.
///
/// The body is decoded whatever `Content-Type` the client sent. Malformed
/// JSON and missing or mistyped fields surface as [`AppError::BadRequest`].
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Failed to read request body: {}", rejection.body_text());
            AppError::BadRequest(anyhow::anyhow!(
                "Failed to read request body: {}",
                rejection.body_text()
            ))
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!("Rejected request body: {}", e);
            AppError::BadRequest(anyhow::anyhow!("Json parse error: {}", e))
        })?;

        Ok(JsonBody(value))
    }
}
