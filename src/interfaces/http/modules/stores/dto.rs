//! Store DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{CreateStoreDto, Store};
use crate::interfaces::http::modules::categories::CategoryResponse;

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub status: String,
    pub external_id: Uuid,
    pub account_id: Uuid,
    pub category_id: Uuid,
    /// Present once the category has been resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    pub tags: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Store> for StoreResponse {
    fn from(s: Store) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            status: s.status.to_string(),
            external_id: s.external_id,
            account_id: s.account_id,
            category_id: s.category.id(),
            category: s.category.resolved().cloned().map(Into::into),
            tags: s.tags,
            latitude: s.position.map(|p| p.latitude),
            longitude: s.position.map(|p| p.longitude),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoreRequest {
    #[validate(length(min = 1, max = 200, message = "store name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: String,
    /// Owning user / tenant
    pub external_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<CreateStoreRequest> for CreateStoreDto {
    fn from(r: CreateStoreRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            category_id: r.category_id,
            external_id: r.external_id,
            tags: r.tags,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// Full replacement of the editable store fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStoreRequest {
    #[validate(length(min = 1, max = 200, message = "store name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Listing filters. At most one filter applies, picked in the order
/// location, tags, category, owner, status.
#[derive(Debug, Default, Deserialize)]
pub struct StoreListQuery {
    pub category_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
    pub status: Option<String>,
    /// Comma separated
    pub tags: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub max_distance: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: Option<Uuid>,
}
