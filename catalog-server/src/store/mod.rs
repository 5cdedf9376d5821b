//! File-backed storage
//!
//! - [`CatalogStore`] - one JSON catalog per manufacturer
//! - [`ScheduledStore`] - pending scheduled catalog changes

pub mod catalog_store;
pub mod scheduled_store;

pub use catalog_store::CatalogStore;
pub use scheduled_store::ScheduledStore;
