//! Axum web adapter for termkit.
//!
//! Two routers are provided:
//! - [`create_static_router`]: plain file server over a directory, with
//!   generated listings for directories lacking `index.html`
//! - [`create_hub_router`]: file-sharing hub API with static fallback
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by integration tests under tests/
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod net;
pub mod routes;
pub mod sse;
pub mod state;
pub mod uploads;

// Re-export primary types
pub use bootstrap::{CorsConfig, HubConfig, ServerConfig, bind, bootstrap_hub, serve, start_server};
pub use error::HttpError;
pub use routes::{create_hub_router, create_static_router};
pub use state::{AppState, HubContext};
