//! Subcommand definitions.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print battery, wifi, storage, volume and brightness information
    Device {
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Seconds to wait for each query before giving up on it
        #[arg(long, env = "TERMKIT_QUERY_TIMEOUT", default_value_t = 10)]
        timeout: u64,
    },

    /// Serve a directory over HTTP, or run the file-sharing hub
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "TERMKIT_PORT", default_value_t = 8000)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Directory to serve (ignored in hub mode)
        #[arg(long, env = "TERMKIT_ROOT", default_value = ".")]
        root: PathBuf,

        /// Run the file-sharing hub (uploads, chat, live events)
        #[arg(long)]
        hub: bool,

        /// Hub frontend directory
        #[arg(long, default_value = "public")]
        public: PathBuf,

        /// Hub upload directory, created if missing
        #[arg(long, default_value = "uploads")]
        uploads: PathBuf,

        /// Largest accepted upload request, in MiB
        #[arg(long, default_value_t = 500)]
        max_upload_mb: usize,
    },

    /// Draw random colored sparks until interrupted
    Fire {
        /// Seed for a repeatable animation
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds between bursts
        #[arg(long, default_value_t = 50)]
        cadence_ms: u64,

        /// Stop after this many bursts
        #[arg(long)]
        bursts: Option<u64>,
    },

    /// Print platform details and run a short counting loop
    Smoke {
        /// Number of ticks to count
        #[arg(long, default_value_t = 5)]
        count: u32,

        /// Milliseconds between ticks
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::parser::Cli;

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["termkit", "serve"]);
        let Some(Commands::Serve {
            port,
            host,
            hub,
            public,
            uploads,
            max_upload_mb,
            ..
        }) = cli.command
        else {
            panic!("expected serve");
        };
        // TERMKIT_PORT may be set in the environment running the tests
        if std::env::var_os("TERMKIT_PORT").is_none() {
            assert_eq!(port, 8000);
        }
        assert_eq!(host.to_string(), "0.0.0.0");
        assert!(!hub);
        assert_eq!(public, PathBuf::from("public"));
        assert_eq!(uploads, PathBuf::from("uploads"));
        assert_eq!(max_upload_mb, 500);
    }

    #[test]
    fn test_fire_args() {
        let cli = Cli::parse_from(["termkit", "fire", "--seed", "7", "--bursts", "3"]);
        let Some(Commands::Fire {
            seed,
            cadence_ms,
            bursts,
        }) = cli.command
        else {
            panic!("expected fire");
        };
        assert_eq!(seed, Some(7));
        assert_eq!(cadence_ms, 50);
        assert_eq!(bursts, Some(3));
    }

    #[test]
    fn test_invalid_host_rejected() {
        let result = Cli::try_parse_from(["termkit", "serve", "--host", "not-an-ip"]);
        assert!(result.is_err());
    }
}
