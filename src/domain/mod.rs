pub mod account;
pub mod category;
pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use account::{Account, AccountRepository};
pub use category::{Category, CategoryRef, CategoryRepository, CategoryStatus};
pub use repositories::{DomainResult, RepositoryProvider};
pub use store::{
    parse_store_sort, CreateStoreDto, LocationQuery, Position, Store, StoreRepository,
    StoreStatus, Transition,
};

pub use crate::shared::errors::DomainError;
