use std::path::PathBuf;

use crate::auth::{AdminCredentials, JwtConfig};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/catalog-server | work directory (catalogs, uploads, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ADMIN_USERNAME | admin | admin login |
/// | ADMIN_PASSWORD_HASH | - | argon2 PHC hash of the admin password |
/// | ADMIN_PASSWORD | - | plaintext password, hashed at startup (dev only) |
/// | JWT_SECRET | - | token signing secret (>= 32 chars) |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/catalogs HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding catalogs, scheduled changes, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults when unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/catalog-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override parts of the configuration, typically for tests.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Admin credentials from the environment; `None` disables login.
    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        AdminCredentials::from_env()
    }

    // === Work directory layout ===

    pub fn work_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// `WORK_DIR/catalogs` - one JSON document per manufacturer
    pub fn catalogs_dir(&self) -> PathBuf {
        self.work_dir_path().join("catalogs")
    }

    /// `WORK_DIR/scheduled` - pending scheduled changes
    pub fn scheduled_dir(&self) -> PathBuf {
        self.work_dir_path().join("scheduled")
    }

    /// `WORK_DIR/uploads/images` - product photos
    pub fn images_dir(&self) -> PathBuf {
        self.work_dir_path().join("uploads/images")
    }

    /// `WORK_DIR/uploads/pdf` - downloadable price-list PDFs
    pub fn pdf_dir(&self) -> PathBuf {
        self.work_dir_path().join("uploads/pdf")
    }

    /// `WORK_DIR/logs` - rolling log files
    pub fn logs_dir(&self) -> PathBuf {
        self.work_dir_path().join("logs")
    }

    /// Create the work directory layout if missing.
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        for dir in [
            self.catalogs_dir(),
            self.scheduled_dir(),
            self.images_dir(),
            self.pdf_dir(),
            self.logs_dir(),
        ] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
