//! Platform information port for the smoke test.

use crate::domain::PlatformInfo;

/// Port for reading static platform metadata.
pub trait PlatformInfoPort: Send + Sync {
    fn platform_info(&self) -> PlatformInfo;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPlatform(PlatformInfo);

    impl PlatformInfoPort for FixedPlatform {
        fn platform_info(&self) -> PlatformInfo {
            self.0.clone()
        }
    }

    #[test]
    fn test_port_as_trait_object() {
        let port: Box<dyn PlatformInfoPort> = Box::new(FixedPlatform(PlatformInfo {
            tool_version: "0.3.0".to_string(),
            arch: "x86_64".to_string(),
            ..PlatformInfo::default()
        }));
        assert_eq!(port.platform_info().arch, "x86_64");
    }
}
