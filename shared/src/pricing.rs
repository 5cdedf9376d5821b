//! Priced-View Render Types
//!
//! Uniform render model produced from any catalog shape. Public pages and
//! editor previews consume this instead of re-implementing the factor /
//! discount / surcharge math per layout. Nothing here is ever persisted;
//! views are computed at request time.

use serde::{Deserialize, Serialize};

use crate::catalog::Surcharge;

/// One computed price cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    /// Price group label ("grupa I" ...)
    pub group: String,
    /// Element column label for matrix catalogs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Raw base price from the document
    pub base: f64,
    /// round(base × effective factor)
    pub final_base: i64,
    /// Price to display; equals `final_base` unless a discount applies
    pub display: i64,
    /// Struck-through undiscounted price, present only when discounted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<i64>,
    /// Independent surcharge lines, each computed from `display`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surcharges: Vec<SurchargeLine>,
}

/// Surcharge rendered next to a price line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurchargeLine {
    pub label: String,
    pub percent: f64,
    /// round(display × (1 + percent/100))
    pub price: i64,
}

/// One priced product card / table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Discount percent applied to this product's lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_label: Option<String>,
    pub lines: Vec<PriceLine>,
}

/// Products of one category; flat tables produce a single unnamed section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub products: Vec<PricedProduct>,
}

/// Fully priced catalog, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedCatalog {
    pub manufacturer: String,
    /// True when a simulation factor overrode the configured chain
    pub simulated: bool,
    /// Catalog-wide surcharge definitions (echoed for legends)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surcharges: Vec<Surcharge>,
    pub sections: Vec<PricedSection>,
}
