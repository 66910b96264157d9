//! Mapping of service errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use types::AccountServiceError;

/// Error returned by the account handlers
#[derive(Debug)]
pub struct ApiError(pub AccountServiceError);

impl From<AccountServiceError> for ApiError {
    fn from(err: AccountServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            // Unknown ids answer with a bare status and no body
            AccountServiceError::NotFound { .. } => StatusCode::NOT_FOUND.into_response(),
            AccountServiceError::InvalidPayload(msg) => error_body(StatusCode::BAD_REQUEST, msg),
        }
    }
}

fn error_body(status: StatusCode, msg: String) -> Response {
    (
        status,
        Json(json!({
            "code": status.as_u16(),
            "error": msg
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = ApiError(AccountServiceError::NotFound { id: "1".into() }).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_payload_is_bad_request() {
        let response =
            ApiError(AccountServiceError::InvalidPayload("EOF".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["code"], 400);
        assert_eq!(body["error"], "EOF");
    }
}
