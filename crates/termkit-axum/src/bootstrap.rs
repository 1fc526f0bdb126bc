//! Axum server bootstrap - the composition root for the web adapter.
//!
//! Resolves configuration into a router and runs it until the shutdown
//! token is cancelled.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::routes::{create_hub_router, create_static_router};
use crate::state::HubContext;
use crate::uploads::UploadStore;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 8000;

/// Upload size limit used when none is configured (500 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 500 * 1024 * 1024;

/// CORS configuration for the hub API.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (devices on the same network).
    #[default]
    AllowAll,
    /// Allow specific origins only.
    AllowOrigins(Vec<String>),
}

/// Settings for hub mode.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Static frontend served for non-API paths.
    pub public_dir: PathBuf,
    /// Where uploaded files are stored; created on start.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory served in plain file-server mode.
    pub root_dir: PathBuf,
    /// Hub mode settings; `None` serves `root_dir` only.
    pub hub: Option<HubConfig>,
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Serve the current directory on `0.0.0.0:8000`.
    pub fn with_defaults() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            root_dir: PathBuf::from("."),
            hub: None,
            cors: CorsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_hub(mut self, hub: HubConfig) -> Self {
        self.hub = Some(hub);
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Build the hub context, creating the upload directory if needed.
pub async fn bootstrap_hub(config: &HubConfig, port: u16) -> Result<HubContext> {
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create upload directory {}",
                config.upload_dir.display()
            )
        })?;

    Ok(HubContext::new(
        UploadStore::new(&config.upload_dir),
        port,
        config.max_upload_bytes,
    ))
}

/// Bind the configured address.
///
/// Port `0` picks a free port; read it back with `local_addr()`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.socket_addr();
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}

/// Bind the configured address and serve until `shutdown` is cancelled.
pub async fn start_server(config: ServerConfig, shutdown: CancellationToken) -> Result<()> {
    let listener = bind(&config).await?;
    serve(listener, &config, shutdown).await
}

/// Serve on an already-bound listener.
pub async fn serve(
    listener: TcpListener,
    config: &ServerConfig,
    shutdown: CancellationToken,
) -> Result<()> {
    let local_addr = listener.local_addr()?;

    let app = if let Some(hub) = &config.hub {
        let ctx = bootstrap_hub(hub, local_addr.port()).await?;
        info!(
            public = %hub.public_dir.display(),
            uploads = %hub.upload_dir.display(),
            "hub mode enabled"
        );
        create_hub_router(ctx, &hub.public_dir, &config.cors)
    } else {
        info!(root = %config.root_dir.display(), "serving directory");
        create_static_router(&config.root_dir)
    };

    info!("termkit file server listening on http://{local_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("termkit file server stopped");
    Ok(())
}
