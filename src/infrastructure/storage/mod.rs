//! In-memory repository backend

mod memory;

pub use memory::{InMemoryAccounts, InMemoryCategories, InMemoryRepositoryProvider, InMemoryStores};
