//! Application services

mod account;
mod category;
mod enrichment;
mod store;

pub use account::AccountService;
pub use category::CategoryService;
pub use enrichment::CategoryEnricher;
pub use store::StoreService;
