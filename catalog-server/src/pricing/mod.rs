//! Pricing engine
//!
//! - [`calculator`] - factor / discount / surcharge math for one base price
//! - [`resolver`] - priced-view resolver over the catalog shapes

pub mod calculator;
pub mod resolver;

pub use calculator::{ComputedPrice, FactorChain, compute_price};
pub use resolver::price_catalog;
