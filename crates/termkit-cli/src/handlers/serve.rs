//! Serve command handler.
//!
//! Plain mode serves `--root`; `--hub` serves the sharing hub instead.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Result;
use termkit_axum::bootstrap::{CorsConfig, HubConfig, ServerConfig, bind, serve};
use termkit_axum::net::{local_url, network_url};
use tokio_util::sync::CancellationToken;

use crate::error::CliError;

/// Arguments for the serve command.
#[derive(Debug, Clone)]
pub struct ServeArgs {
    pub host: IpAddr,
    pub port: u16,
    pub root: PathBuf,
    pub hub: bool,
    pub public: PathBuf,
    pub uploads: PathBuf,
    pub max_upload_mb: usize,
}

/// Run the server until Ctrl+C.
pub async fn execute(args: ServeArgs, shutdown: CancellationToken) -> Result<()> {
    let config = server_config(args)?;
    let listener = bind(&config)
        .await
        .map_err(|e| CliError::Server(format!("{e:#}")))?;
    let addr = listener.local_addr().map_err(CliError::from)?;

    for line in banner_lines(&config, addr) {
        println!("{line}");
    }

    serve(listener, &config, shutdown)
        .await
        .map_err(|e| CliError::Server(format!("{e:#}")))?;

    println!("Server stopped.");
    Ok(())
}

fn server_config(args: ServeArgs) -> Result<ServerConfig, CliError> {
    let hub = if args.hub {
        if args.max_upload_mb == 0 {
            return Err(CliError::Arguments(
                "--max-upload-mb must be at least 1".to_string(),
            ));
        }
        Some(HubConfig {
            public_dir: args.public,
            upload_dir: args.uploads,
            max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
        })
    } else {
        if !args.root.is_dir() {
            return Err(CliError::Config(format!(
                "{} is not a directory",
                args.root.display()
            )));
        }
        None
    };

    Ok(ServerConfig {
        host: args.host,
        port: args.port,
        root_dir: args.root,
        hub,
        cors: CorsConfig::AllowAll,
    })
}

/// Startup banner; URLs use the port actually bound.
fn banner_lines(config: &ServerConfig, addr: SocketAddr) -> Vec<String> {
    let port = addr.port();
    let mut lines = match &config.hub {
        Some(hub) => vec![
            "📡 termkit hub running".to_string(),
            format!("   Local:   {}", local_url(port)),
            format!("   Network: {}", network_url(port)),
            format!("   Uploads: {}", hub.upload_dir.display()),
        ],
        None => vec![format!(
            "Serving {} at {}",
            config.root_dir.display(),
            network_url(port)
        )],
    };
    lines.push("Press Ctrl+C to stop.".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    fn args(root: PathBuf) -> ServeArgs {
        ServeArgs {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            root,
            hub: false,
            public: PathBuf::from("public"),
            uploads: PathBuf::from("uploads"),
            max_upload_mb: 500,
        }
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = server_config(args(dir.path().join("missing"))).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_plain_mode_has_no_hub() {
        let dir = tempfile::tempdir().unwrap();
        let config = server_config(args(dir.path().to_path_buf())).unwrap();
        assert!(config.hub.is_none());
        assert_eq!(config.root_dir, dir.path());
    }

    #[test]
    fn test_hub_mode_converts_upload_limit() {
        let mut args = args(PathBuf::from("."));
        args.hub = true;
        args.max_upload_mb = 2;
        let config = server_config(args).unwrap();
        assert_eq!(config.hub.unwrap().max_upload_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_banner_uses_bound_port() {
        let dir = tempfile::tempdir().unwrap();
        let config = server_config(args(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.port, 0);

        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 43117));
        let lines = banner_lines(&config, addr);
        assert!(lines[0].ends_with(":43117"), "banner: {lines:?}");
        assert!(lines.iter().all(|line| !line.ends_with(":0")));
    }

    #[test]
    fn test_hub_banner_lists_both_urls() {
        let mut args = args(PathBuf::from("."));
        args.hub = true;
        let config = server_config(args).unwrap();

        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 43118));
        let lines = banner_lines(&config, addr);
        assert_eq!(lines[1], "   Local:   http://localhost:43118");
        assert!(lines[2].ends_with(":43118"));
    }

    #[tokio::test]
    async fn test_bind_reports_real_port_for_zero() {
        let dir = tempfile::tempdir().unwrap();
        let config = server_config(args(dir.path().to_path_buf())).unwrap();
        let listener = bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn test_hub_mode_rejects_zero_limit() {
        let mut args = args(PathBuf::from("."));
        args.hub = true;
        args.max_upload_mb = 0;
        assert!(matches!(
            server_config(args),
            Err(CliError::Arguments(_))
        ));
    }
}
