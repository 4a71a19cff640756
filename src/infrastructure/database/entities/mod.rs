//! Database entities module

pub mod account;
pub mod category;
pub mod store;

pub use account::Entity as Account;
pub use category::Entity as Category;
pub use store::Entity as Store;
