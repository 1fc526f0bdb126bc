//! OS-level adapters for termkit.
//!
//! Implements the core ports (`CommandRunnerPort`, `PlatformInfoPort`) and
//! hosts the long-running terminal loops (fire animation, smoke test).
#![deny(unsafe_code)]

pub mod animation;
pub mod smoke;
pub mod system;

// Re-export port implementations for adapters
pub use system::{DEFAULT_QUERY_TIMEOUT, DefaultCommandRunner, DefaultPlatformInfo};

pub use animation::{AnimationOptions, FireAnimation, Spark, run_fire};
pub use smoke::{SmokeOptions, SmokeSummary, run_smoke_test};
