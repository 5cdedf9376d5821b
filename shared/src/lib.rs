//! Shared types for the catalog server
//!
//! Data model and API payload types used by the server and its editor /
//! renderer clients: catalog document shapes, priced-view render types,
//! scheduled changes and search results.

pub mod catalog;
pub mod pricing;
pub mod scheduled;
pub mod search;

// Re-exports
pub use catalog::{
    Catalog, CatalogData, CatalogError, Category, ElementMatrix, MatrixProduct, PriceRow,
    ProductCommon, ProductEntry, ProductRecord, Surcharge,
};
pub use pricing::{PriceLine, PricedCatalog, PricedProduct, PricedSection, SurchargeLine};
pub use scheduled::{ScheduledChange, ScheduledChangeCreate};
pub use search::{MatchedField, SearchHit, SearchResponse};
