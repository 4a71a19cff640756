//! Store REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use uuid::Uuid;

use super::dto::{
    CreateStoreRequest, OwnerQuery, StoreListQuery, StoreResponse, UpdateStoreRequest,
};
use crate::domain::{CategoryRef, DomainError, LocationQuery, Position, StoreStatus};
use crate::interfaces::http::common::{
    ApiError, ApiResponse, ApiResult, ListQuery, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::router::AppState;
use crate::shared::validations::parse_identifier;
use crate::shared::ListParams;

pub async fn create_store(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateStoreRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StoreResponse>>), ApiError> {
    let store = state.stores.create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(store.into())),
    ))
}

pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(owner): Query<OwnerQuery>,
) -> ApiResult<StoreResponse> {
    let store = match owner.owner_id {
        Some(owner_id) => state.stores.get_by_id_and_owner(id, owner_id).await?,
        None => state.stores.get_by_id(id).await?,
    };
    Ok(Json(ApiResponse::success(store.into())))
}

pub async fn list_stores(
    State(state): State<AppState>,
    Query(filter): Query<StoreListQuery>,
    Query(page): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<StoreResponse>> {
    let params = ListParams::from(&page);
    debug!(?filter, sort = %params.sort, "Listing stores");

    let result = match (filter.lat, filter.lng, filter.max_distance) {
        (Some(lat), Some(lng), Some(max_distance)) => {
            let status = match filter.status.as_deref() {
                Some(s) => s.parse()?,
                None => StoreStatus::Active,
            };
            let query = LocationQuery::new(lat, lng, max_distance, status)?;
            state.stores.list_by_close_location(query, params).await?
        }
        (None, None, None) => {
            if let Some(tags) = filter.tags.as_deref() {
                let tags = tags.split(',').map(str::to_string).collect();
                state.stores.list_by_tags(tags, params).await?
            } else if let Some(category_id) = filter.category_id {
                state.stores.list_by_category(category_id, params).await?
            } else if let Some(owner_id) = filter.owner_id {
                state.stores.list_by_owner(owner_id, params).await?
            } else if let Some(status) = filter.status.as_deref() {
                state.stores.list_by_status(status.parse()?, params).await?
            } else {
                state.stores.list(params).await?
            }
        }
        _ => {
            return Err(DomainError::BadParameter(
                "lat, lng and max_distance must be given together".to_string(),
            )
            .into())
        }
    };

    Ok(Json(ApiResponse::success(result.into())))
}

pub async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateStoreRequest>,
) -> ApiResult<StoreResponse> {
    let category_id = parse_identifier(&req.category_id).map_err(|_| {
        DomainError::BadParameter(format!("invalid category id: {}", req.category_id))
    })?;

    let mut store = state.stores.get_by_id(id).await?;
    store.name = req.name;
    store.description = req.description;
    store.category = CategoryRef::Stub(category_id);
    store.tags = req.tags;
    store.position = Some(Position::new(req.latitude, req.longitude)?);

    let store = state.stores.update(store).await?;
    Ok(Json(ApiResponse::success(store.into())))
}

pub async fn delete_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.stores.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn activate_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StoreResponse> {
    let store = state.stores.activate(id).await?;
    Ok(Json(ApiResponse::success(store.into())))
}

pub async fn block_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StoreResponse> {
    let store = state.stores.block(id).await?;
    Ok(Json(ApiResponse::success(store.into())))
}

pub async fn disable_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StoreResponse> {
    let store = state.stores.disable(id).await?;
    Ok(Json(ApiResponse::success(store.into())))
}
