//! Catalog File Store
//!
//! One JSON document per manufacturer at `WORK_DIR/catalogs/<slug>.json`.
//! Reads go through a lock-free in-memory cache; writes serialize to a
//! temporary file and rename it into place so readers never observe a
//! half-written document. There are no guarantees beyond the atomic rename.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use shared::catalog::Catalog;

use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct CatalogStore {
    dir: PathBuf,
    cache: Arc<DashMap<String, Arc<Catalog>>>,
}

impl CatalogStore {
    /// Create a store over `dir`. The directory must already exist
    /// (`Config::ensure_work_dir_structure` creates it at startup).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Arc::new(DashMap::new()),
        }
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{slug}.json"))
    }

    /// List manufacturer slugs, sorted.
    pub async fn list(&self) -> AppResult<Vec<String>> {
        let mut slugs = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| AppError::storage(format!("Failed to read catalog dir: {e}")))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::storage(format!("Failed to read catalog dir: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                slugs.push(stem.to_string());
            }
        }

        slugs.sort();
        Ok(slugs)
    }

    /// Load a catalog, read-through cached.
    pub async fn load(&self, slug: &str) -> AppResult<Arc<Catalog>> {
        if let Some(cached) = self.cache.get(slug) {
            return Ok(cached.clone());
        }

        let path = self.path_for(slug);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::not_found(format!("Catalog {slug}")));
            }
            Err(e) => return Err(AppError::storage(format!("Failed to read {slug}: {e}"))),
        };

        let catalog: Catalog = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::storage(format!("Corrupt catalog {slug}: {e}")))?;

        let catalog = Arc::new(catalog);
        self.cache.insert(slug.to_string(), catalog.clone());
        Ok(catalog)
    }

    /// Replace a catalog atomically and refresh the cache.
    pub async fn save(&self, slug: &str, catalog: Catalog) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(&catalog)
            .map_err(|e| AppError::internal(format!("Failed to serialize {slug}: {e}")))?;

        write_atomic(&self.path_for(slug), &bytes).await?;
        self.cache.insert(slug.to_string(), Arc::new(catalog));

        tracing::info!(manufacturer = %slug, size = bytes.len(), "Catalog saved");
        Ok(())
    }

    /// Remove a catalog file and evict it from the cache.
    pub async fn delete(&self, slug: &str) -> AppResult<()> {
        match tokio::fs::remove_file(self.path_for(slug)).await {
            Ok(()) => {
                self.cache.remove(slug);
                tracing::info!(manufacturer = %slug, "Catalog deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(format!("Catalog {slug}")))
            }
            Err(e) => Err(AppError::storage(format!("Failed to delete {slug}: {e}"))),
        }
    }

    /// Whether a catalog exists on disk.
    pub async fn exists(&self, slug: &str) -> bool {
        self.cache.contains_key(slug) || tokio::fs::try_exists(self.path_for(slug)).await.unwrap_or(false)
    }
}

/// Write `bytes` to `path` via a sibling tmp file and rename.
pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", tmp.display())))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| AppError::storage(format!("Failed to rename {}: {e}", tmp.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        serde_json::from_value(serde_json::json!({
            "rows": [{ "model": "Bella", "grupa I": 1200.0 }]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());

        store.save("benix", sample()).await.unwrap();
        let loaded = store.load("benix").await.unwrap();
        assert_eq!(*loaded, sample());

        // Survives a fresh store (cache miss path)
        let cold = CatalogStore::new(dir.path());
        assert_eq!(*cold.load("benix").await.unwrap(), sample());
    }

    #[tokio::test]
    async fn list_returns_sorted_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());
        store.save("wersal", sample()).await.unwrap();
        store.save("benix", sample()).await.unwrap();
        assert_eq!(store.list().await.unwrap(), ["benix", "wersal"]);
    }

    #[tokio::test]
    async fn missing_catalog_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());
        assert!(matches!(
            store.load("nope").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_evicts_cache_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());
        store.save("benix", sample()).await.unwrap();
        store.delete("benix").await.unwrap();
        assert!(!store.exists("benix").await);
        assert!(store.load("benix").await.is_err());
    }

    #[tokio::test]
    async fn no_tmp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path());
        store.save("benix", sample()).await.unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
