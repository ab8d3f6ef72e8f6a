use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;
use xcpad_common::CliConfig;

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("xcpad")
        .join("config.toml")
}

/// Load configuration from file or return defaults
pub fn load_config(path: &Option<PathBuf>) -> Result<CliConfig> {
    let config_path = path.clone().unwrap_or_else(default_config_path);

    if config_path.exists() {
        debug!("Loading config from {:?}", config_path);
        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: CliConfig = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    } else {
        debug!("Config file not found, using defaults");
        Ok(CliConfig::default())
    }
}

/// Generate default config content for `config init`
pub fn generate_default_config() -> String {
    r#"# xcpad configuration

[workspace]
# Workspace root directories; empty means the current directory
roots = []

[storage]
# Directory for build artifacts; defaults to the platform data dir
# dir = "/Users/me/Library/Application Support/xcpad"

[build]
# Default build configuration: "debug" or "release"
configuration = "debug"

# Pipe xcodebuild output through xcbeautify when installed
xcbeautify = true

[simulator]
# Preferred device name
preferred_device = "iPhone 15 Pro"

[format]
# Extra arguments passed to swift-format
extra_args = []
"#
    .to_string()
}
