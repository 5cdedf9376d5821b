//! Server Implementation
//!
//! HTTP server startup and lifecycle.

use std::time::Duration;

use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::{Config, ServerState};

/// Scheduled-change applier tick interval
const APPLY_INTERVAL: Duration = Duration::from_secs(60);

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (for tests and embedding)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config),
        };

        // Background tasks
        let mut tasks = BackgroundTasks::new();
        let token = tasks.shutdown_token();
        let applier_state = state.clone();
        tasks.spawn("scheduled_change_applier", TaskKind::Periodic, async move {
            let mut interval = tokio::time::interval(APPLY_INTERVAL);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let applied = applier_state.apply_due_changes().await;
                        if applied > 0 {
                            tracing::info!(applied, "Scheduled changes applied this tick");
                        }
                    }
                }
            }
        });

        let app = crate::api::build_app(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("📒 Catalog server listening on {}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tasks.shutdown().await;

        Ok(())
    }
}
