pub mod services;

// Re-export key types for convenience
pub use services::{AccountService, CategoryEnricher, CategoryService, StoreService};
