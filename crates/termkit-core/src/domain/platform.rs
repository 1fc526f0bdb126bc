//! Static platform metadata printed by the smoke test.

use serde::Serialize;

use super::report::{Field, PLACEHOLDER};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub tool_version: String,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub kernel_version: Option<String>,
    pub arch: String,
    pub hostname: Option<String>,
}

impl PlatformInfo {
    /// Rows in display order; absent values become [`PLACEHOLDER`].
    pub fn rows(&self) -> Vec<Field> {
        let or_placeholder =
            |value: &Option<String>| value.clone().unwrap_or_else(|| PLACEHOLDER.to_string());

        vec![
            Field::new("termkit Version", &self.tool_version),
            Field::new("Operating System", or_placeholder(&self.os_name)),
            Field::new("Release Version", or_placeholder(&self.os_version)),
            Field::new("Kernel", or_placeholder(&self.kernel_version)),
            Field::new("Machine", &self.arch),
            Field::new("Hostname", or_placeholder(&self.hostname)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_fill_placeholders() {
        let info = PlatformInfo {
            tool_version: "0.3.0".to_string(),
            os_name: Some("Android".to_string()),
            arch: "aarch64".to_string(),
            ..PlatformInfo::default()
        };
        let rows = info.rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[1].value, "Android");
        assert!(rows[2].is_placeholder());
        assert_eq!(rows[4].value, "aarch64");
    }
}
