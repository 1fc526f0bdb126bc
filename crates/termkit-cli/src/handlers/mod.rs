//! Command handlers.
//!
//! Handlers are thin: they validate CLI input, call into core or runtime,
//! and write the result to the terminal. Errors propagate as
//! `anyhow::Error`, carrying a [`CliError`](crate::CliError) when the exit
//! code matters.

pub mod device;
pub mod fire;
pub mod serve;
pub mod smoke;
