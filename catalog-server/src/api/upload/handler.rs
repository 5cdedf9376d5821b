//! Upload Handlers
//!
//! Product images arrive in whatever format the editor drags in (PNG,
//! JPEG, WebP), get re-encoded as JPEG and deduplicated by content hash.
//! Catalog PDFs are stored verbatim after a magic-byte check.

use axum::Json;
use axum::extract::{Multipart, State};
use image::DynamicImage;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::{fs, io::Cursor};
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::validation::validate_filename;
use crate::utils::{AppError, AppResult};

/// Maximum image size (5MB)
const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Maximum PDF size (20MB)
const MAX_PDF_SIZE: usize = 20 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for product images (85% keeps furniture shots presentable
/// while controlling file size)
const JPEG_QUALITY: u8 = 85;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub format: String,
    pub url: String,
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Find existing file by content hash
fn find_file_by_hash(images_dir: &Path, hash: &str) -> Option<String> {
    let hash_dir = images_dir.join("by_hash");
    if !hash_dir.exists() {
        return None;
    }

    // Hash directory uses first 2 chars as subdir (e.g., "ab/abc123...")
    let prefix = &hash[..2];
    let hash_path = hash_dir.join(format!("{}/{}", prefix, hash));

    if hash_path.exists()
        && let Ok(target) = fs::read_link(&hash_path)
    {
        return target.file_name().map(|s| s.to_string_lossy().to_string());
    }
    None
}

/// Create hash-based symlink for deduplication
fn create_hash_symlink(images_dir: &Path, hash: &str, filename: &str) -> Result<(), AppError> {
    let hash_dir = images_dir.join("by_hash");
    let prefix = &hash[..2];
    let hash_subdir = hash_dir.join(prefix);
    fs::create_dir_all(&hash_subdir)
        .map_err(|e| AppError::internal(format!("Failed to create hash subdir: {}", e)))?;

    let hash_path = hash_subdir.join(hash);
    let target_path = PathBuf::from("../../").join(filename);

    symlink::symlink_auto(&target_path, &hash_path)
        .map_err(|e| AppError::internal(format!("Failed to create symlink: {}", e)))?;

    Ok(())
}

/// Process and compress image
fn process_and_compress_image(data: &[u8]) -> Result<(DynamicImage, Vec<u8>), AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    // Re-encode as JPEG with quality setting
    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }

    Ok((img, buffer))
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_IMAGE_SIZE,
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    // Verify it's actually an image by trying to load it
    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext_lower, e
        )));
    }

    Ok(())
}

/// Pull the `file` field out of a multipart request
async fn read_file_field(multipart: &mut Multipart) -> Result<(Vec<u8>, String), AppError> {
    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            let filename = f
                .file_name()
                .map(|s| s.to_string())
                .ok_or_else(|| AppError::validation("No filename provided in file field"))?;
            let data = f
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                .to_vec();

            if data.is_empty() {
                return Err(AppError::validation("Empty file provided"));
            }
            return Ok((data, filename));
        }
    }

    Err(AppError::validation(
        "No 'file' field found. Field name must be 'file'",
    ))
}

/// POST /api/image/upload - upload a product image
pub async fn upload_image(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let images_dir = state.config.images_dir();
    fs::create_dir_all(&images_dir)
        .map_err(|e| AppError::internal(format!("Failed to create images directory: {}", e)))?;

    let (data, filename) = read_file_field(&mut multipart).await?;

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {}", filename)))?;

    validate_image(&data, &ext)?;

    let (_original_img, compressed_data) = process_and_compress_image(&data)?;

    // Deduplicate by content hash of the re-encoded bytes
    let file_hash = calculate_hash(&compressed_data);

    if let Some(existing_filename) = find_file_by_hash(&images_dir, &file_hash) {
        tracing::info!(
            original_name = %filename,
            existing_file = %existing_filename,
            "Duplicate image detected, returning existing file"
        );

        let file_id = existing_filename
            .strip_suffix(".jpg")
            .map(|s| s.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let url = format!("/api/image/{}", existing_filename);
        return Ok(Json(UploadResponse {
            file_id,
            filename: existing_filename,
            original_name: filename,
            size: compressed_data.len(),
            format: "jpg".to_string(),
            url,
        }));
    }

    let file_id = Uuid::new_v4().to_string();
    let new_filename = format!("{}.jpg", file_id);
    let file_path = images_dir.join(&new_filename);

    fs::write(&file_path, &compressed_data)
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    create_hash_symlink(&images_dir, &file_hash, &new_filename)?;

    tracing::info!(
        original_name = %filename,
        size = %compressed_data.len(),
        hash = %file_hash,
        "Image uploaded"
    );

    let url = format!("/api/image/{}", new_filename);
    Ok(Json(UploadResponse {
        file_id,
        filename: new_filename,
        original_name: filename,
        size: compressed_data.len(),
        format: "jpg".to_string(),
        url,
    }))
}

/// POST /api/pdf/upload - upload a manufacturer catalog PDF
pub async fn upload_pdf(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let pdf_dir = state.config.pdf_dir();
    fs::create_dir_all(&pdf_dir)
        .map_err(|e| AppError::internal(format!("Failed to create pdf directory: {}", e)))?;

    let (data, filename) = read_file_field(&mut multipart).await?;

    if data.len() > MAX_PDF_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_PDF_SIZE,
            MAX_PDF_SIZE / 1024 / 1024
        )));
    }

    // A PDF starts with "%PDF-"; the extension alone proves nothing
    if !data.starts_with(b"%PDF-") {
        return Err(AppError::validation(format!(
            "'{}' is not a PDF file",
            filename
        )));
    }

    let file_id = Uuid::new_v4().to_string();
    let new_filename = format!("{}.pdf", file_id);
    let file_path = pdf_dir.join(&new_filename);

    fs::write(&file_path, &data)
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    tracing::info!(
        original_name = %filename,
        size = %data.len(),
        "PDF uploaded"
    );

    let url = format!("/api/pdf/{}", new_filename);
    Ok(Json(UploadResponse {
        file_id,
        filename: new_filename,
        original_name: filename,
        size: data.len(),
        format: "pdf".to_string(),
        url,
    }))
}

/// DELETE /api/pdf/{filename} - remove an uploaded PDF
pub async fn delete_pdf(
    State(state): State<ServerState>,
    axum::extract::Path(filename): axum::extract::Path<String>,
) -> AppResult<Json<bool>> {
    validate_filename(&filename)?;

    let path = state.config.pdf_dir().join(&filename);
    match fs::remove_file(&path) {
        Ok(()) => {
            tracing::info!(%filename, "PDF deleted");
            Ok(Json(true))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::not_found(format!("PDF '{}' not found", filename)))
        }
        Err(e) => Err(AppError::internal(format!("Failed to delete PDF: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_hex_sha256() {
        let h = calculate_hash(b"hello");
        assert_eq!(h.len(), 64);
        assert_eq!(
            h,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = validate_image(&[0u8; 16], "gif").unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn rejects_oversized_image() {
        let data = vec![0u8; MAX_IMAGE_SIZE + 1];
        let err = validate_image(&data, "png").unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn reencodes_to_jpeg() {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 30, 30]));
        let mut png_bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(
                &mut Cursor::new(&mut png_bytes),
                image::ImageFormat::Png,
            )
            .unwrap();

        let (_, jpeg) = process_and_compress_image(&png_bytes).unwrap();
        // JPEG magic: FF D8
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
