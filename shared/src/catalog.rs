//! Catalog Document Model
//!
//! One JSON document per furniture manufacturer. The documents come from
//! spreadsheet-derived price lists and exist in several shapes; the shape is
//! dispatched on the fields present:
//!
//! | Shape | Marker | Content |
//! |-------|--------|---------|
//! | Flat table | `rows` | ordered rows with price-group columns |
//! | Category map | `categories` + `prices` | category → product → record |
//! | Element matrix | `categories` + `matrix` | category → product → groups × columns |
//!
//! Cross-cutting optional fields on any product or row: `discount` (percent),
//! `discountLabel`, `previousName`, `priceFactor`. Factors multiply at three
//! levels (product × category × global); surcharges are flat-percent lines
//! attached at catalog level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Catalog validation error
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog contains no rows or categories")]
    Empty,

    #[error("matrix for '{product}' has {rows} value rows, expected {expected}")]
    MatrixRowCount {
        product: String,
        rows: usize,
        expected: usize,
    },

    #[error("matrix for '{product}' row '{group}' has {cols} values, expected {expected}")]
    MatrixColumnCount {
        product: String,
        group: String,
        cols: usize,
        expected: usize,
    },

    #[error("negative base price {price} on '{product}'")]
    NegativePrice { product: String, price: f64 },

    #[error("discount {discount}% on '{product}' is outside 0..=100")]
    DiscountRange { product: String, discount: f64 },

    #[error("price factor {factor} on '{scope}' must be positive")]
    FactorRange { scope: String, factor: f64 },
}

/// Flat-percent surcharge rendered as a separate optional price line
/// (e.g. hydrophobic fabric +8%). Never mutates the base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surcharge {
    pub label: String,
    pub percent: f64,
}

/// Optional fields shared by every product shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCommon {
    /// Percent reduction applied to the factored base price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Badge text shown next to the discounted price
    #[serde(rename = "discountLabel", default, skip_serializing_if = "Option::is_none")]
    pub discount_label: Option<String>,
    /// Former model name, still searchable
    #[serde(rename = "previousName", default, skip_serializing_if = "Option::is_none")]
    pub previous_name: Option<String>,
    /// Per-product multiplier, stacks with category and global factors
    #[serde(rename = "priceFactor", default, skip_serializing_if = "Option::is_none")]
    pub price_factor: Option<f64>,
}

/// One row of a flat-table price list
///
/// Price-group columns ("grupa I".."grupa VI" and similar) are kept as a
/// flattened map so each manufacturer's column set survives round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Model name
    pub model: String,
    #[serde(flatten)]
    pub common: ProductCommon,
    /// Price-group columns, keyed by group label
    #[serde(flatten)]
    pub groups: BTreeMap<String, f64>,
}

/// Product record of a category-map catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Base prices keyed by price group
    pub prices: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub common: ProductCommon,
}

/// Groups × columns base-price matrix (modular furniture: price group rows,
/// element columns)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementMatrix {
    /// Row labels (price groups)
    pub groups: Vec<String>,
    /// Column labels (elements / sizes)
    pub columns: Vec<String>,
    /// Base prices, `values[group][column]`
    pub values: Vec<Vec<f64>>,
}

/// Product carrying an element matrix instead of a flat price map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixProduct {
    pub matrix: ElementMatrix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub common: ProductCommon,
}

/// Product entry inside a category, dispatched on `prices` vs `matrix`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductEntry {
    Record(ProductRecord),
    Matrix(MatrixProduct),
}

impl ProductEntry {
    pub fn common(&self) -> &ProductCommon {
        match self {
            ProductEntry::Record(r) => &r.common,
            ProductEntry::Matrix(m) => &m.common,
        }
    }
}

/// Category of a category-map or element-matrix catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category-level multiplier, stacks with product and global factors
    #[serde(rename = "priceFactor", default, skip_serializing_if = "Option::is_none")]
    pub price_factor: Option<f64>,
    /// Product name → entry
    pub products: BTreeMap<String, ProductEntry>,
}

/// Shape-specific payload, dispatched on the fields present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogData {
    /// Flat table: ordered rows, order is preserved exactly
    FlatTable { rows: Vec<PriceRow> },
    /// Category map or category/element matrix
    Categories {
        categories: BTreeMap<String, Category>,
    },
}

/// Top-level catalog document for one manufacturer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Global multiplier for the whole price list
    #[serde(rename = "priceFactor", default, skip_serializing_if = "Option::is_none")]
    pub price_factor: Option<f64>,
    /// Catalog-wide surcharges, rendered per product as separate lines
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surcharges: Vec<Surcharge>,
    #[serde(flatten)]
    pub data: CatalogData,
}

impl Catalog {
    /// Validate document invariants before it is accepted into the store:
    /// matrix dimensions, non-negative prices, discount and factor ranges.
    pub fn validate(&self) -> Result<(), CatalogError> {
        check_factor("catalog", self.price_factor)?;

        match &self.data {
            CatalogData::FlatTable { rows } => {
                if rows.is_empty() {
                    return Err(CatalogError::Empty);
                }
                for row in rows {
                    check_common(&row.model, &row.common)?;
                    for price in row.groups.values() {
                        check_price(&row.model, *price)?;
                    }
                }
            }
            CatalogData::Categories { categories } => {
                if categories.is_empty() {
                    return Err(CatalogError::Empty);
                }
                for (name, category) in categories {
                    check_factor(name, category.price_factor)?;
                    for (product, entry) in &category.products {
                        check_common(product, entry.common())?;
                        match entry {
                            ProductEntry::Record(record) => {
                                for price in record.prices.values() {
                                    check_price(product, *price)?;
                                }
                            }
                            ProductEntry::Matrix(m) => check_matrix(product, &m.matrix)?,
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Number of products (rows count as products in flat tables)
    pub fn product_count(&self) -> usize {
        match &self.data {
            CatalogData::FlatTable { rows } => rows.len(),
            CatalogData::Categories { categories } => {
                categories.values().map(|c| c.products.len()).sum()
            }
        }
    }
}

fn check_price(product: &str, price: f64) -> Result<(), CatalogError> {
    if price < 0.0 {
        return Err(CatalogError::NegativePrice {
            product: product.to_string(),
            price,
        });
    }
    Ok(())
}

fn check_factor(scope: &str, factor: Option<f64>) -> Result<(), CatalogError> {
    if let Some(f) = factor
        && f <= 0.0
    {
        return Err(CatalogError::FactorRange {
            scope: scope.to_string(),
            factor: f,
        });
    }
    Ok(())
}

fn check_common(product: &str, common: &ProductCommon) -> Result<(), CatalogError> {
    if let Some(d) = common.discount
        && !(0.0..=100.0).contains(&d)
    {
        return Err(CatalogError::DiscountRange {
            product: product.to_string(),
            discount: d,
        });
    }
    check_factor(product, common.price_factor)
}

fn check_matrix(product: &str, matrix: &ElementMatrix) -> Result<(), CatalogError> {
    if matrix.values.len() != matrix.groups.len() {
        return Err(CatalogError::MatrixRowCount {
            product: product.to_string(),
            rows: matrix.values.len(),
            expected: matrix.groups.len(),
        });
    }
    for (group, row) in matrix.groups.iter().zip(&matrix.values) {
        if row.len() != matrix.columns.len() {
            return Err(CatalogError::MatrixColumnCount {
                product: product.to_string(),
                group: group.clone(),
                cols: row.len(),
                expected: matrix.columns.len(),
            });
        }
        for price in row {
            check_price(product, *price)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_json() -> serde_json::Value {
        serde_json::json!({
            "priceFactor": 1.1,
            "rows": [
                { "model": "Bella", "grupa I": 1200.0, "grupa II": 1350.0 },
                { "model": "Rosa", "previousName": "Roza", "discount": 10.0,
                  "grupa I": 900.0 }
            ]
        })
    }

    #[test]
    fn flat_table_dispatches_on_rows() {
        let catalog: Catalog = serde_json::from_value(flat_json()).unwrap();
        match &catalog.data {
            CatalogData::FlatTable { rows } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].model, "Bella");
                assert_eq!(rows[0].groups["grupa II"], 1350.0);
                assert_eq!(rows[1].common.previous_name.as_deref(), Some("Roza"));
            }
            _ => panic!("expected flat table"),
        }
        assert_eq!(catalog.price_factor, Some(1.1));
        catalog.validate().unwrap();
    }

    #[test]
    fn category_map_dispatches_on_categories() {
        let json = serde_json::json!({
            "surcharges": [{ "label": "hydrophobic fabric", "percent": 8.0 }],
            "categories": {
                "Sofas": {
                    "priceFactor": 1.05,
                    "products": {
                        "Milano": {
                            "image": "milano.jpg",
                            "material": "fabric",
                            "prices": { "grupa I": 2000.0, "grupa II": 2200.0 },
                            "sizes": ["200x90"],
                            "description": "3-seater"
                        }
                    }
                }
            }
        });
        let catalog: Catalog = serde_json::from_value(json).unwrap();
        let CatalogData::Categories { categories } = &catalog.data else {
            panic!("expected categories");
        };
        let entry = &categories["Sofas"].products["Milano"];
        assert!(matches!(entry, ProductEntry::Record(_)));
        catalog.validate().unwrap();
    }

    #[test]
    fn matrix_product_dispatches_on_matrix() {
        let json = serde_json::json!({
            "categories": {
                "Corner sets": {
                    "products": {
                        "Modul": {
                            "matrix": {
                                "groups": ["grupa I", "grupa II"],
                                "columns": ["1F", "2F", "otoman"],
                                "values": [[800.0, 1100.0, 950.0], [900.0, 1250.0, 1050.0]]
                            }
                        }
                    }
                }
            }
        });
        let catalog: Catalog = serde_json::from_value(json).unwrap();
        let CatalogData::Categories { categories } = &catalog.data else {
            panic!("expected categories");
        };
        assert!(matches!(
            categories["Corner sets"].products["Modul"],
            ProductEntry::Matrix(_)
        ));
        catalog.validate().unwrap();
    }

    #[test]
    fn serialization_round_trips() {
        let catalog: Catalog = serde_json::from_value(flat_json()).unwrap();
        let text = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&text).unwrap();
        assert_eq!(catalog, back);
    }

    #[test]
    fn validate_rejects_ragged_matrix() {
        let json = serde_json::json!({
            "categories": {
                "Corner sets": {
                    "products": {
                        "Modul": {
                            "matrix": {
                                "groups": ["grupa I", "grupa II"],
                                "columns": ["1F", "2F"],
                                "values": [[800.0, 1100.0]]
                            }
                        }
                    }
                }
            }
        });
        let catalog: Catalog = serde_json::from_value(json).unwrap();
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::MatrixRowCount { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_discount() {
        let json = serde_json::json!({
            "rows": [{ "model": "Bella", "discount": 130.0, "grupa I": 100.0 }]
        });
        let catalog: Catalog = serde_json::from_value(json).unwrap();
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DiscountRange { .. })
        ));
    }
}
