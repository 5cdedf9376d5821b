//! Scheduled-Change Store
//!
//! Pending catalog replacements live as individual JSON files at
//! `WORK_DIR/scheduled/<id>.json` until the periodic applier picks them up.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use shared::scheduled::ScheduledChange;
use uuid::Uuid;

use super::catalog_store::write_atomic;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct ScheduledStore {
    dir: PathBuf,
}

impl ScheduledStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// List all pending changes, soonest first. Corrupt files are skipped
    /// with a warning instead of failing the whole listing.
    pub async fn list(&self) -> AppResult<Vec<ScheduledChange>> {
        let mut changes = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| AppError::storage(format!("Failed to read scheduled dir: {e}")))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::storage(format!("Failed to read scheduled dir: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match tokio::fs::read(&path).await {
                Ok(bytes) => match serde_json::from_slice::<ScheduledChange>(&bytes) {
                    Ok(change) => changes.push(change),
                    Err(e) => {
                        tracing::warn!(file = %path.display(), error = %e, "Skipping corrupt scheduled change");
                    }
                },
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "Skipping unreadable scheduled change");
                }
            }
        }

        changes.sort_by_key(|c| c.apply_at);
        Ok(changes)
    }

    /// Changes whose `apply_at` has passed at `now`.
    pub async fn due(&self, now: DateTime<Utc>) -> AppResult<Vec<ScheduledChange>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|c| c.is_due(now))
            .collect())
    }

    pub async fn save(&self, change: &ScheduledChange) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(change)
            .map_err(|e| AppError::internal(format!("Failed to serialize change: {e}")))?;
        write_atomic(&self.path_for(change.id), &bytes).await?;
        tracing::info!(
            id = %change.id,
            manufacturer = %change.manufacturer,
            apply_at = %change.apply_at,
            "Scheduled change stored"
        );
        Ok(())
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(format!("Scheduled change {id}")))
            }
            Err(e) => Err(AppError::storage(format!("Failed to delete change {id}: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::scheduled::ScheduledChangeCreate;

    fn change(apply_in: Duration) -> ScheduledChange {
        ScheduledChange::from_create(ScheduledChangeCreate {
            manufacturer: "benix".to_string(),
            apply_at: Utc::now() + apply_in,
            catalog: serde_json::from_value(serde_json::json!({
                "rows": [{ "model": "Bella", "grupa I": 100.0 }]
            }))
            .unwrap(),
        })
    }

    #[tokio::test]
    async fn due_filters_by_apply_at() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScheduledStore::new(dir.path());

        let past = change(Duration::minutes(-5));
        let future = change(Duration::hours(1));
        store.save(&past).await.unwrap();
        store.save(&future).await.unwrap();

        let due = store.due(Utc::now()).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, past.id);

        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn remove_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScheduledStore::new(dir.path());
        assert!(matches!(
            store.remove(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn corrupt_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScheduledStore::new(dir.path());
        store.save(&change(Duration::hours(1))).await.unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{not json").unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
