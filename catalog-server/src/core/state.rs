use std::sync::Arc;

use chrono::Utc;

use crate::auth::{AdminCredentials, JwtService};
use crate::core::Config;
use crate::store::{CatalogStore, ScheduledStore};

/// Server state - shared handles to every service
///
/// `ServerState` is the application's core data structure; it is cloned into
/// every handler (all fields are cheap `Arc`/handle clones).
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | catalogs | CatalogStore | JSON file store, one catalog per manufacturer |
/// | scheduled | ScheduledStore | pending scheduled changes |
/// | jwt_service | Arc<JwtService> | admin token service |
/// | admin | Option<Arc<AdminCredentials>> | env-configured admin login |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub catalogs: CatalogStore,
    pub scheduled: ScheduledStore,
    pub jwt_service: Arc<JwtService>,
    pub admin: Option<Arc<AdminCredentials>>,
}

impl ServerState {
    /// Initialize state from configuration.
    ///
    /// Ensures the work directory layout exists before the stores touch it.
    ///
    /// # Panics
    ///
    /// Panics when the work directory cannot be created; the server is
    /// useless without it.
    pub fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let catalogs = CatalogStore::new(config.catalogs_dir());
        let scheduled = ScheduledStore::new(config.scheduled_dir());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let admin = config.admin_credentials().map(Arc::new);

        if admin.is_none() {
            tracing::warn!(
                "No admin credentials configured (ADMIN_PASSWORD_HASH / ADMIN_PASSWORD); logins disabled"
            );
        }

        Self {
            config: config.clone(),
            catalogs,
            scheduled,
            jwt_service,
            admin,
        }
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn work_dir(&self) -> std::path::PathBuf {
        self.config.work_dir_path()
    }

    /// Apply every scheduled change whose time has passed.
    ///
    /// Called by the periodic applier task. A failing change is logged and
    /// left in place; it will be retried on the next tick only in the sense
    /// that it is still due then (no retry bookkeeping).
    pub async fn apply_due_changes(&self) -> usize {
        let due = match self.scheduled.due(Utc::now()).await {
            Ok(due) => due,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list scheduled changes");
                return 0;
            }
        };

        let mut applied = 0;
        for change in due {
            if let Err(e) = self.catalogs.save(&change.manufacturer, change.catalog.clone()).await {
                tracing::error!(
                    id = %change.id,
                    manufacturer = %change.manufacturer,
                    error = %e,
                    "Failed to apply scheduled change"
                );
                continue;
            }
            if let Err(e) = self.scheduled.remove(change.id).await {
                // The catalog was replaced; a dangling pending file would
                // re-apply the same document, which is idempotent.
                tracing::warn!(id = %change.id, error = %e, "Applied change could not be removed");
            }
            tracing::info!(
                id = %change.id,
                manufacturer = %change.manufacturer,
                "Scheduled change applied"
            );
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::scheduled::{ScheduledChange, ScheduledChangeCreate};

    fn state(dir: &std::path::Path) -> ServerState {
        let config = Config::with_overrides(dir.to_string_lossy().to_string(), 0);
        ServerState::initialize(&config)
    }

    #[tokio::test]
    async fn due_changes_replace_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path());

        let catalog = serde_json::from_value(serde_json::json!({
            "rows": [{ "model": "Nowa", "grupa I": 150.0 }]
        }))
        .unwrap();
        let change = ScheduledChange::from_create(ScheduledChangeCreate {
            manufacturer: "benix".to_string(),
            apply_at: Utc::now() - Duration::minutes(1),
            catalog,
        });
        state.scheduled.save(&change).await.unwrap();

        assert_eq!(state.apply_due_changes().await, 1);
        assert!(state.catalogs.exists("benix").await);
        assert!(state.scheduled.list().await.unwrap().is_empty());

        // Second tick is a no-op
        assert_eq!(state.apply_due_changes().await, 0);
    }

    #[tokio::test]
    async fn future_changes_stay_pending() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path());

        let change = ScheduledChange::from_create(ScheduledChangeCreate {
            manufacturer: "benix".to_string(),
            apply_at: Utc::now() + Duration::hours(2),
            catalog: serde_json::from_value(serde_json::json!({
                "rows": [{ "model": "Nowa", "grupa I": 150.0 }]
            }))
            .unwrap(),
        });
        state.scheduled.save(&change).await.unwrap();

        assert_eq!(state.apply_due_changes().await, 0);
        assert!(!state.catalogs.exists("benix").await);
        assert_eq!(state.scheduled.list().await.unwrap().len(), 1);
    }
}
