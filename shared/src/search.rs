//! Search Result Types
//!
//! Live search matches products by case-insensitive substring over the
//! current name and the `previousName` carried over from older price lists.

use serde::{Deserialize, Serialize};

/// Which field the query matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedField {
    Name,
    PreviousName,
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub manufacturer: String,
    /// Absent for flat-table catalogs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_name: Option<String>,
    pub matched: MatchedField,
}

/// Search response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub hits: Vec<SearchHit>,
}
