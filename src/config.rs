//! @ai:module:intent Configuration for report sessions
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReporterConfig
//! @ai:module:stateless true

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Settings that decide where and how a report is written
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// False on targets without a usable filesystem; output then goes to the
    /// fallback log channel.
    #[serde(default = "default_file_output")]
    pub file_output: bool,
    /// Label used in the fallback begin/end markers. Kept independent of the
    /// destination so log extractors can match a fixed line.
    #[serde(default = "default_report_name")]
    pub report_name: String,
    /// Overrides the clock frequency used to convert ticks.
    #[serde(default)]
    pub ticks_per_second: Option<f64>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            file_output: default_file_output(),
            report_name: default_report_name(),
            ticks_per_second: None,
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("test_report.json")
}

fn default_file_output() -> bool {
    !cfg!(any(
        target_os = "android",
        target_os = "ios",
        target_os = "emscripten",
        target_family = "wasm"
    ))
}

fn default_report_name() -> String {
    "test_report.json".to_string()
}

impl ReporterConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
