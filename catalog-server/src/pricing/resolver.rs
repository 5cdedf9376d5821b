//! Priced-View Resolver
//!
//! Walks any of the three catalog shapes and produces the uniform
//! [`PricedCatalog`] render model. All layout-specific front ends consume
//! this one model instead of repeating the price math per manufacturer.

use shared::catalog::{Catalog, CatalogData, Category, ProductEntry};
use shared::pricing::{PriceLine, PricedCatalog, PricedProduct, PricedSection};

use super::calculator::{chain_for, compute_price};

/// Compute the priced view of a catalog.
///
/// `simulation` is the preview multiplier: when set it overrides every
/// configured factor in the document.
pub fn price_catalog(manufacturer: &str, catalog: &Catalog, simulation: Option<f64>) -> PricedCatalog {
    let sections = match &catalog.data {
        CatalogData::FlatTable { rows } => vec![price_flat_table(catalog, rows, simulation)],
        CatalogData::Categories { categories } => categories
            .iter()
            .map(|(name, category)| price_category(catalog, name, category, simulation))
            .collect(),
    };

    PricedCatalog {
        manufacturer: manufacturer.to_string(),
        simulated: simulation.is_some(),
        surcharges: catalog.surcharges.clone(),
        sections,
    }
}

fn price_flat_table(
    catalog: &Catalog,
    rows: &[shared::catalog::PriceRow],
    simulation: Option<f64>,
) -> PricedSection {
    let products = rows
        .iter()
        .map(|row| {
            let factor = chain_for(&row.common, None, catalog.price_factor, simulation).effective();
            let lines = row
                .groups
                .iter()
                .map(|(group, base)| {
                    to_line(
                        group,
                        None,
                        *base,
                        compute_price(*base, factor, row.common.discount, &catalog.surcharges),
                    )
                })
                .collect();
            PricedProduct {
                name: row.model.clone(),
                previous_name: row.common.previous_name.clone(),
                image: None,
                material: None,
                description: None,
                sizes: Vec::new(),
                options: Vec::new(),
                discount: row.common.discount,
                discount_label: row.common.discount_label.clone(),
                lines,
            }
        })
        .collect();

    PricedSection {
        category: None,
        products,
    }
}

fn price_category(
    catalog: &Catalog,
    name: &str,
    category: &Category,
    simulation: Option<f64>,
) -> PricedSection {
    let products = category
        .products
        .iter()
        .map(|(product_name, entry)| {
            let factor = chain_for(
                entry.common(),
                category.price_factor,
                catalog.price_factor,
                simulation,
            )
            .effective();

            match entry {
                ProductEntry::Record(record) => {
                    let lines = record
                        .prices
                        .iter()
                        .map(|(group, base)| {
                            to_line(
                                group,
                                None,
                                *base,
                                compute_price(
                                    *base,
                                    factor,
                                    record.common.discount,
                                    &catalog.surcharges,
                                ),
                            )
                        })
                        .collect();
                    PricedProduct {
                        name: product_name.clone(),
                        previous_name: record.common.previous_name.clone(),
                        image: record.image.clone(),
                        material: record.material.clone(),
                        description: record.description.clone(),
                        sizes: record.sizes.clone(),
                        options: record.options.clone(),
                        discount: record.common.discount,
                        discount_label: record.common.discount_label.clone(),
                        lines,
                    }
                }
                ProductEntry::Matrix(m) => {
                    let mut lines = Vec::with_capacity(m.matrix.groups.len() * m.matrix.columns.len());
                    for (group, row) in m.matrix.groups.iter().zip(&m.matrix.values) {
                        for (column, base) in m.matrix.columns.iter().zip(row) {
                            lines.push(to_line(
                                group,
                                Some(column.clone()),
                                *base,
                                compute_price(*base, factor, m.common.discount, &catalog.surcharges),
                            ));
                        }
                    }
                    PricedProduct {
                        name: product_name.clone(),
                        previous_name: m.common.previous_name.clone(),
                        image: m.image.clone(),
                        material: None,
                        description: m.description.clone(),
                        sizes: Vec::new(),
                        options: Vec::new(),
                        discount: m.common.discount,
                        discount_label: m.common.discount_label.clone(),
                        lines,
                    }
                }
            }
        })
        .collect();

    PricedSection {
        category: Some(name.to_string()),
        products,
    }
}

fn to_line(
    group: &str,
    column: Option<String>,
    base: f64,
    computed: super::calculator::ComputedPrice,
) -> PriceLine {
    PriceLine {
        group: group.to_string(),
        column,
        base,
        final_base: computed.final_base,
        display: computed.display,
        old: computed.old,
        surcharges: computed.surcharges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_catalog() -> Catalog {
        serde_json::from_value(serde_json::json!({
            "priceFactor": 1.1,
            "surcharges": [{ "label": "hydrophobic", "percent": 10.0 }],
            "categories": {
                "Sofas": {
                    "priceFactor": 1.2,
                    "products": {
                        "Milano": {
                            "prices": { "grupa I": 1000.0 },
                            "priceFactor": 1.05,
                            "discount": 10.0,
                            "discountLabel": "promo"
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn factors_stack_across_levels() {
        let priced = price_catalog("wersal", &category_catalog(), None);
        let line = &priced.sections[0].products[0].lines[0];
        // 1000 × 1.05 × 1.2 × 1.1 = 1386, then −10% = 1247.4 → 1247
        assert_eq!(line.final_base, 1386);
        assert_eq!(line.display, 1247);
        assert_eq!(line.old, Some(1386));
        // surcharge from the discounted price: 1247 × 1.1 = 1371.7 → 1372
        assert_eq!(line.surcharges[0].price, 1372);
    }

    #[test]
    fn simulation_overrides_every_factor() {
        let priced = price_catalog("wersal", &category_catalog(), Some(2.0));
        assert!(priced.simulated);
        let line = &priced.sections[0].products[0].lines[0];
        // 1000 × 2.0 = 2000, −10% = 1800
        assert_eq!(line.final_base, 2000);
        assert_eq!(line.display, 1800);
    }

    #[test]
    fn flat_table_keeps_row_order_in_one_section() {
        let catalog: Catalog = serde_json::from_value(serde_json::json!({
            "rows": [
                { "model": "Zeta", "grupa I": 500.0 },
                { "model": "Alfa", "grupa I": 400.0 }
            ]
        }))
        .unwrap();
        let priced = price_catalog("benix", &catalog, None);
        assert_eq!(priced.sections.len(), 1);
        assert_eq!(priced.sections[0].category, None);
        let names: Vec<_> = priced.sections[0]
            .products
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        // document order, not alphabetical
        assert_eq!(names, ["Zeta", "Alfa"]);
    }

    #[test]
    fn matrix_lines_carry_column_labels() {
        let catalog: Catalog = serde_json::from_value(serde_json::json!({
            "categories": {
                "Corner sets": {
                    "products": {
                        "Modul": {
                            "matrix": {
                                "groups": ["grupa I"],
                                "columns": ["1F", "otoman"],
                                "values": [[800.0, 950.0]]
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();
        let priced = price_catalog("mp-nidzica", &catalog, None);
        let lines = &priced.sections[0].products[0].lines;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].column.as_deref(), Some("1F"));
        assert_eq!(lines[1].column.as_deref(), Some("otoman"));
        assert_eq!(lines[1].display, 950);
    }
}
