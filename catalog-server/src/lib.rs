//! Catalog Server - furniture manufacturer price-list service
//!
//! # Architecture overview
//!
//! The server keeps one JSON catalog document per manufacturer and renders
//! them into fully priced views on request:
//!
//! - **Catalog store** (`store`): JSON file per manufacturer with a
//!   read-through cache, plus the scheduled-change queue
//! - **Pricing** (`pricing`): factor chain, discounts and surcharges with
//!   exact decimal rounding
//! - **Search** (`search`): case-insensitive product search across catalogs
//! - **Auth** (`auth`): single-admin JWT + Argon2 login
//! - **HTTP API** (`api`): RESTful routes and handlers
//!
//! # Module structure
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── auth/          # JWT auth, admin credentials
//! ├── api/           # HTTP routes and handlers
//! ├── pricing/       # price computation
//! ├── search/        # product search
//! ├── store/         # catalog and scheduled-change persistence
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod pricing;
pub mod search;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepare the process environment: .env file, work directory, logging.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    if config.is_production() {
        let logs_dir = config.logs_dir();
        init_logger_with_file(log_level.as_deref(), logs_dir.to_str());
    } else {
        init_logger_with_file(log_level.as_deref(), None);
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ______      __        __
  / ____/___ _/ /_____ _/ /___  ____ _
 / /   / __ `/ __/ __ `/ / __ \/ __ `/
/ /___/ /_/ / /_/ /_/ / / /_/ / /_/ /
\____/\__,_/\__/\__,_/_/\____/\__, /
                             /____/
    "#
    );
}
