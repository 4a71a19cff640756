//! API Router

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::{AccountService, CategoryService, StoreService};

use super::modules::{accounts, categories, health, stores};

/// Shared state for every `/api/v1` route. Health checks extract their own
/// state via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub stores: Arc<StoreService>,
    pub categories: Arc<CategoryService>,
    pub accounts: Arc<AccountService>,
    pub health: health::HealthState,
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let store_routes = Router::new()
        .route("/", get(stores::list_stores).post(stores::create_store))
        .route(
            "/{id}",
            get(stores::get_store)
                .put(stores::update_store)
                .delete(stores::delete_store),
        )
        .route("/{id}/activate", post(stores::activate_store))
        .route("/{id}/block", post(stores::block_store))
        .route("/{id}/disable", post(stores::disable_store));

    let category_routes = Router::new()
        .route("/", post(categories::create_category))
        .route("/{id}", get(categories::get_category))
        .route("/{id}/activate", post(categories::activate_category))
        .route("/{id}/deactivate", post(categories::deactivate_category));

    let account_routes = Router::new()
        .route("/{id}", get(accounts::get_account))
        .route("/{id}/deposit", post(accounts::deposit))
        .route("/{id}/withdraw", post(accounts::withdraw));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/stores", store_routes)
        .nest("/api/v1/categories", category_routes)
        .nest("/api/v1/accounts", account_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────
