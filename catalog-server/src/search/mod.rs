//! Live Search
//!
//! Case-insensitive substring matching over product names and the
//! `previousName` carried over from older price lists. Works uniformly over
//! all catalog shapes; the search box queries this on every keystroke, so
//! matching stays allocation-light and index-free (catalogs are small).

use shared::catalog::{Catalog, CatalogData, ProductCommon};
use shared::search::{MatchedField, SearchHit};

/// Normalized query, lowercased once per request.
#[derive(Debug, Clone)]
pub struct Query {
    needle: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }

    /// Match a product by name, falling back to its previous name.
    fn match_product(&self, name: &str, common: &ProductCommon) -> Option<MatchedField> {
        if self.matches(name) {
            return Some(MatchedField::Name);
        }
        if let Some(previous) = &common.previous_name
            && self.matches(previous)
        {
            return Some(MatchedField::PreviousName);
        }
        None
    }
}

/// Search one catalog, appending hits to `out`.
pub fn search_catalog(manufacturer: &str, catalog: &Catalog, query: &Query, out: &mut Vec<SearchHit>) {
    match &catalog.data {
        CatalogData::FlatTable { rows } => {
            for row in rows {
                if let Some(matched) = query.match_product(&row.model, &row.common) {
                    out.push(SearchHit {
                        manufacturer: manufacturer.to_string(),
                        category: None,
                        name: row.model.clone(),
                        previous_name: row.common.previous_name.clone(),
                        matched,
                    });
                }
            }
        }
        CatalogData::Categories { categories } => {
            for (category, entry) in categories {
                for (name, product) in &entry.products {
                    if let Some(matched) = query.match_product(name, product.common()) {
                        out.push(SearchHit {
                            manufacturer: manufacturer.to_string(),
                            category: Some(category.clone()),
                            name: name.clone(),
                            previous_name: product.common().previous_name.clone(),
                            matched,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        serde_json::from_value(serde_json::json!({
            "categories": {
                "Sofas": {
                    "products": {
                        "Milano": { "prices": { "grupa I": 100.0 } },
                        "Rosa": {
                            "prices": { "grupa I": 100.0 },
                            "previousName": "Róża"
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn run(q: &str) -> Vec<SearchHit> {
        let mut out = Vec::new();
        search_catalog("wersal", &catalog(), &Query::new(q), &mut out);
        out
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let hits = run("ILA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Milano");
        assert_eq!(hits[0].matched, MatchedField::Name);
        assert_eq!(hits[0].category.as_deref(), Some("Sofas"));
    }

    #[test]
    fn previous_name_matches_too() {
        let hits = run("róż");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Rosa");
        assert_eq!(hits[0].matched, MatchedField::PreviousName);
    }

    #[test]
    fn current_name_wins_over_previous() {
        // "os" appears in "Rosa" only; "ro" appears in both name and previous
        let hits = run("ro");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matched, MatchedField::Name);
    }

    #[test]
    fn no_match_yields_nothing() {
        assert!(run("narożnik").is_empty());
    }

    #[test]
    fn flat_table_rows_match_by_model() {
        let catalog: Catalog = serde_json::from_value(serde_json::json!({
            "rows": [{ "model": "Bella", "grupa I": 100.0 }]
        }))
        .unwrap();
        let mut out = Vec::new();
        search_catalog("benix", &catalog, &Query::new("bel"), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].category, None);
    }
}
