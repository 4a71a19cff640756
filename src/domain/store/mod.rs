//! Store aggregate
//!
//! Contains the Store entity, its lifecycle transitions, proximity search
//! parameters, and the repository interface.

pub mod location;
pub mod model;
pub mod repository;

mod dto_create;

pub use dto_create::CreateStoreDto;
pub use location::{cosine_to_km, distance_km, LocationQuery, TrigPosition};
pub use model::{Position, Store, StoreStatus, Transition};
pub use repository::{parse_store_sort, StoreRepository, DISTANCE_FIELD, SORTABLE_FIELDS};
