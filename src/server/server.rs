//! HTTP server core implementation

use crate::config::Config;
use crate::core::jobs::{JobRunner, JobStore, WorkerHandle};
use crate::core::provider::OpenAiHttpClient;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::Logger, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// HTTP server
pub struct HttpServer {
    config: Arc<Config>,
    state: AppState,
}

impl HttpServer {
    /// Wire up the store, client, runner, and worker, and keep the state
    /// ready to serve
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating HTTP server");

        let config = Arc::new(config);
        let store = Arc::new(JobStore::new(Duration::from_secs(config.jobs.ttl_secs)));
        let client = OpenAiHttpClient::new(&config.provider).map_err(GatewayError::Provider)?;
        let runner = Arc::new(JobRunner::new(
            Arc::clone(&config),
            Arc::clone(&store),
            Arc::new(client),
        ));
        let worker = WorkerHandle::spawn(Arc::clone(&runner));

        spawn_sweep_task(Arc::clone(&store), config.jobs.sweep_interval_secs);

        let state = AppState::new(Arc::clone(&config), runner, worker);
        Ok(Self { config, state })
    }

    /// Bind and serve until shutdown
    pub async fn start(self) -> Result<()> {
        let address = self.config.server.address();
        let cors_config = self.config.server.cors.clone();
        let workers = self.config.server.workers;
        let state = web::Data::new(self.state);

        info!("Server starting at http://{}", address);

        let mut server = ActixHttpServer::new(move || {
            let mut cors = Cors::default();
            if cors_config.enabled {
                if cors_config.allows_all_origins() {
                    cors = cors.allow_any_origin();
                } else {
                    for origin in &cors_config.allowed_origins {
                        cors = cors.allowed_origin(origin);
                    }
                }
                cors = cors.allow_any_method().allow_any_header();
            }

            App::new()
                .app_data(state.clone())
                .wrap(Logger::default())
                .wrap(cors)
                .configure(routes::configure)
        })
        .bind(&address)
        .map_err(|e| GatewayError::Config(format!("Failed to bind {}: {}", address, e)))?;

        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        server.run().await.map_err(GatewayError::Io)
    }
}

/// Periodically drop expired job entries
fn spawn_sweep_task(store: Arc<JobStore>, interval_secs: u64) {
    if interval_secs == 0 {
        warn!("Job sweep disabled (interval is zero)");
        return;
    }

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick fires immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            store.sweep();
        }
    });
}
