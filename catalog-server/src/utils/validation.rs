//! Input validation helpers
//!
//! Centralized text limits and validation functions for the CRUD surface.

use crate::utils::AppError;

/// Manufacturer slugs (file names on disk)
pub const MAX_SLUG_LEN: usize = 64;

// ========== Validation helpers ==========

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate a manufacturer slug.
///
/// Slugs become file names under the work directory, so only lowercase
/// alphanumerics, `-` and `_` are allowed. Blocks path traversal.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    validate_required_text(slug, "manufacturer", MAX_SLUG_LEN)?;
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(AppError::validation(format!(
            "Invalid manufacturer slug '{slug}': use lowercase letters, digits, '-' or '_'"
        )));
    }
    Ok(())
}

/// Validate an uploaded file name used in a serve/delete path.
///
/// Rejects empty names, separators and `..` segments.
pub fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(AppError::validation("Invalid filename"));
    }
    Ok(())
}
