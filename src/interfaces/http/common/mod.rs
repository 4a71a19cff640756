//! Shared HTTP plumbing: response envelope, error mapping, list query

mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;
use crate::shared::{ListParams, PaginatedResult};

/// Standard response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T, U: Into<T>> From<PaginatedResult<U>> for PaginatedResponse<T> {
    fn from(page: PaginatedResult<U>) -> Self {
        let page = page.map(Into::into);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

/// `sort`, `limit` and `page` query parameters. Missing values fall back
/// to the listing defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl From<&ListQuery> for ListParams {
    fn from(q: &ListQuery) -> Self {
        ListParams::new(
            q.sort.clone().unwrap_or_default(),
            q.limit.unwrap_or(0),
            q.page.unwrap_or(0),
        )
    }
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::AlreadyBlocked
        | DomainError::StillPending
        | DomainError::AlreadyActive
        | DomainError::AlreadyInactive => StatusCode::CONFLICT,
        DomainError::BadParameter(_) => StatusCode::BAD_REQUEST,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Domain error rendered as an `ApiResponse` with the matching status.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(error = %self.0, status = status.as_u16(), "Request failed");
        }
        (status, Json(ApiResponse::<()>::error(self.0.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;
