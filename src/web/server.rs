//! Web server for Brasa.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::Database;

use super::handlers::{AppState, SharedDatabase};
use super::middleware::JwtState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// JWT state.
    jwt_state: Arc<JwtState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
    /// Maximum upload size in bytes.
    max_upload_size: u64,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &ServerConfig, db: SharedDatabase) -> Self {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .expect("Invalid web server address");

        let max_upload_size = config.max_upload_size_mb * 1024 * 1024;

        let app_state = AppState::new(
            db,
            &config.jwt_secret,
            config.token_expiry_secs,
            max_upload_size,
        );

        let jwt_state = Arc::new(JwtState::new(&config.jwt_secret));

        Self {
            addr,
            app_state: Arc::new(app_state),
            jwt_state,
            cors_origins: config.cors_origins.clone(),
            max_upload_size,
        }
    }

    /// Create a new web server from a raw Database.
    pub fn from_database(config: &ServerConfig, db: Database) -> Self {
        Self::new(config, Arc::new(tokio::sync::Mutex::new(db)))
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = create_router(
            self.app_state,
            self.jwt_state,
            &self.cors_origins,
            self.max_upload_size,
        )
        .merge(create_health_router());

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }
}
