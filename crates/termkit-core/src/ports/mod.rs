//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `tokio::process` or `sysinfo` types in any signature
//! - Runtime owns the implementations (`DefaultCommandRunner`, `DefaultPlatformInfo`)
//! - CLI injects them from its composition root

pub mod command_runner;
pub mod platform_info;

pub use command_runner::{CommandError, CommandOutput, CommandRunnerPort, CommandSpec};
pub use platform_info::PlatformInfoPort;

#[cfg(test)]
pub use command_runner::MockCommandRunnerPort;
