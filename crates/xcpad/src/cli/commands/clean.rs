use anyhow::Result;
use xcpad_common::XcpadError;

use crate::host::{fs, HostEnv};
use crate::ui::Styles;

/// Remove the bundle directory with all build artifacts
pub async fn run(host: &impl HostEnv) -> Result<()> {
    let Some(storage_root) = host.storage_root() else {
        Styles::error("No storage path found");
        return Err(XcpadError::NoStoragePath.into());
    };

    let bundle_root = storage_root.join("bundle");
    fs::remove_directory(&bundle_root).await?;
    Styles::success("Bundle directory removed");

    Ok(())
}
