//! Account REST API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use super::dto::{AccountResponse, AmountRequest};
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::router::AppState;

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<AccountResponse> {
    let account = state.accounts.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(account.into())))
}

pub async fn deposit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AmountRequest>,
) -> ApiResult<AccountResponse> {
    let account = state.accounts.deposit(id, req.decimal()?).await?;
    Ok(Json(ApiResponse::success(account.into())))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AmountRequest>,
) -> ApiResult<AccountResponse> {
    let account = state.accounts.withdraw(id, req.decimal()?).await?;
    Ok(Json(ApiResponse::success(account.into())))
}
