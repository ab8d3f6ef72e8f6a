use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::ConfigCommands;
use crate::config;
use crate::ui::Styles;

/// Manage configuration
pub async fn run(command: ConfigCommands, path: &Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommands::Init { force } => init(path, force),
        ConfigCommands::Show => show(path),
    }
}

fn init(path: &Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = path.clone().unwrap_or_else(config::default_config_path);

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    std::fs::write(&config_path, config::generate_default_config())
        .context("Failed to write config file")?;

    Styles::success(&format!("Wrote {}", config_path.display()));
    Ok(())
}

fn show(path: &Option<PathBuf>) -> Result<()> {
    let config = config::load_config(path)?;
    let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{content}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_writes_a_parseable_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("xcpad/config.toml");

        run(ConfigCommands::Init { force: false }, &Some(path.clone()))
            .await
            .unwrap();
        assert!(path.exists());

        let config = config::load_config(&Some(path)).unwrap();
        assert_eq!(
            config.simulator.preferred_device.as_deref(),
            Some("iPhone 15 Pro")
        );
    }

    #[tokio::test]
    async fn init_refuses_to_overwrite_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "# mine").unwrap();

        let err = run(ConfigCommands::Init { force: false }, &Some(path.clone()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        run(ConfigCommands::Init { force: true }, &Some(path.clone()))
            .await
            .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[build]"));
    }
}
