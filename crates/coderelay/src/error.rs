use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coderelay_core::CodegenError;
use serde::Serialize;

/// Failure returned by the inbound HTTP handlers.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub CodegenError);

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorBody {
            error: self.0.to_string(),
            kind: self.0.kind(),
            details: self.0.details(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let response =
            ApiError(CodegenError::Validation("Prompt is required".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Prompt is required", "kind": "validation_error"})
        );
    }

    #[tokio::test]
    async fn test_unavailable_maps_to_service_unavailable() {
        let response =
            ApiError(CodegenError::UpstreamUnavailable("connection refused".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["kind"], json!("upstream_unavailable"));
    }

    #[tokio::test]
    async fn test_request_error_passes_payload_through() {
        let response = ApiError(CodegenError::UpstreamRequest {
            status: 404,
            payload: Some(json!({"error": "model not found"})),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["details"],
            json!({"error": "model not found"})
        );
    }
}
