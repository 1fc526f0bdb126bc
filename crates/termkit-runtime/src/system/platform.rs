//! Platform metadata via sysinfo.

use sysinfo::System;
use termkit_core::PlatformInfo;
use termkit_core::ports::PlatformInfoPort;

/// Default implementation of `PlatformInfoPort`.
#[derive(Debug, Clone, Default)]
pub struct DefaultPlatformInfo;

impl DefaultPlatformInfo {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformInfoPort for DefaultPlatformInfo {
    fn platform_info(&self) -> PlatformInfo {
        PlatformInfo {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            os_name: System::name(),
            os_version: System::os_version(),
            kernel_version: System::kernel_version(),
            arch: std::env::consts::ARCH.to_string(),
            hostname: System::host_name(),
        }
    }
}
