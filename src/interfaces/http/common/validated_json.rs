//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value. Malformed
//! bodies are rejected with 400, failed validation with 422, both in the
//! `ApiResponse` envelope.

use axum::extract::FromRequest;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiError;
use crate::domain::DomainError;

/// ```ignore
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateStoreRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError(DomainError::BadParameter(format!(
                "Invalid JSON: {}",
                rejection.body_text()
            )))
        })?;

        value.validate().map_err(|e| ApiError(e.into()))?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(range(min = -90.0, max = 90.0))]
        latitude: f64,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    async fn send(body: Body) -> axum::http::Response<Body> {
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        Router::new()
            .route("/test", post(handler))
            .oneshot(req)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"name": "Shop", "latitude": 41.3});
        let resp = send(Body::from(serde_json::to_vec(&body).unwrap())).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let resp = send(Body::from("not json")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_failure_returns_422() {
        let body = serde_json::json!({"name": "", "latitude": 123.0});
        let resp = send(Body::from(serde_json::to_vec(&body).unwrap())).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
