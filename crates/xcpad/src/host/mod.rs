pub mod fs;

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;
use xcpad_common::{CliConfig, XcpadError};

use crate::ui::Styles;

/// What the surrounding environment provides: workspace roots to build in
/// and a storage directory for artifacts. Narrow on purpose so command
/// handlers can be exercised without a terminal or a real home directory.
pub trait HostEnv {
    fn workspace_roots(&self) -> Vec<PathBuf>;
    fn storage_root(&self) -> Option<PathBuf>;
}

/// Host environment backed by config, the current directory and the
/// platform data dir
pub struct RealHost {
    config: CliConfig,
}

impl RealHost {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }
}

impl HostEnv for RealHost {
    fn workspace_roots(&self) -> Vec<PathBuf> {
        if !self.config.workspace.roots.is_empty() {
            return self.config.workspace.roots.clone();
        }
        std::env::current_dir().ok().into_iter().collect()
    }

    fn storage_root(&self) -> Option<PathBuf> {
        self.config
            .storage
            .dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("xcpad")))
    }
}

/// First workspace root known to the host
pub fn get_workspace_path(host: &impl HostEnv) -> Result<PathBuf> {
    host.workspace_roots()
        .into_iter()
        .next()
        .ok_or_else(|| XcpadError::NoWorkspaceOpen.into())
}

/// Compute and clear the bundle directory for a scheme.
///
/// The returned path does not exist when this returns: xcodebuild refuses
/// an existing -resultBundlePath, so any previous bundle is removed first.
pub async fn prepare_bundle_dir(host: &impl HostEnv, scheme: &str) -> Result<PathBuf> {
    let Some(storage_root) = host.storage_root() else {
        Styles::error("No storage path found");
        return Err(XcpadError::NoStoragePath.into());
    };

    // The storage root itself is not created for us
    fs::create_directory(&storage_root).await?;

    let bundle_dir = storage_root.join("bundle").join(scheme);
    debug!("Bundle directory: {}", bundle_dir.display());

    // Remove old bundle if it exists
    fs::remove_directory(&bundle_dir).await?;

    Ok(bundle_dir)
}
