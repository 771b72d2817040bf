pub mod catalog;
pub mod config;
pub mod identity;

pub use catalog::CatalogStore;
pub use identity::IdentityStore;
