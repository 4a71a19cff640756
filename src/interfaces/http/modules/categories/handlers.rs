//! Category REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{CategoryResponse, CreateCategoryRequest};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::router::AppState;

pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), ApiError> {
    let category = state.categories.create(req.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(category.into())),
    ))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<CategoryResponse> {
    let category = state.categories.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(category.into())))
}

pub async fn activate_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<CategoryResponse> {
    let category = state.categories.activate(id).await?;
    Ok(Json(ApiResponse::success(category.into())))
}

pub async fn deactivate_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<CategoryResponse> {
    let category = state.categories.deactivate(id).await?;
    Ok(Json(ApiResponse::success(category.into())))
}
