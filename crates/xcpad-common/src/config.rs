use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::build::BuildConfiguration;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Workspace settings
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Build defaults
    #[serde(default)]
    pub build: BuildConfig,
    /// Default simulator settings
    #[serde(default)]
    pub simulator: SimulatorConfig,
    /// Formatter settings
    #[serde(default)]
    pub format: FormatConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig::default(),
            storage: StorageConfig::default(),
            build: BuildConfig::default(),
            simulator: SimulatorConfig::default(),
            format: FormatConfig::default(),
        }
    }
}

/// Workspace root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Workspace root directories; empty means use the current directory
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for build artifacts; defaults to the platform data dir
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Build defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Default build configuration
    #[serde(default)]
    pub configuration: BuildConfiguration,
    /// Pipe xcodebuild output through xcbeautify when installed
    #[serde(default = "default_xcbeautify")]
    pub xcbeautify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            configuration: BuildConfiguration::default(),
            xcbeautify: default_xcbeautify(),
        }
    }
}

/// Default simulator settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Preferred device name (e.g., "iPhone 15 Pro")
    #[serde(default)]
    pub preferred_device: Option<String>,
}

/// Formatter settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Extra arguments passed to swift-format
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_xcbeautify() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_gets_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert!(config.workspace.roots.is_empty());
        assert!(config.storage.dir.is_none());
        assert_eq!(config.build.configuration, BuildConfiguration::Debug);
        assert!(config.build.xcbeautify);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [build]
            configuration = "release"
            "#,
        )
        .unwrap();
        assert_eq!(config.build.configuration, BuildConfiguration::Release);
        assert!(config.build.xcbeautify);
        assert!(config.simulator.preferred_device.is_none());
    }
}
