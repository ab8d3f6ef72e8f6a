use anyhow::Result;
use std::path::PathBuf;
use xcpad_common::CliConfig;

use crate::cli::FormatArgs;
use crate::exec::{CommandRunner, Toolchain};
use crate::format;
use crate::ui::Styles;

/// Format Swift sources with swift-format
pub async fn run(
    args: FormatArgs,
    runner: &impl CommandRunner,
    toolchain: &Toolchain,
    config: &CliConfig,
) -> Result<()> {
    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };

    let files = format::collect_swift_files(&paths)?;
    if files.is_empty() {
        Styles::warning("No Swift files found");
        return Ok(());
    }

    format::format_files(runner, toolchain, &files, &config.format.extra_args).await?;
    Styles::success(&format!("Formatted {} files", files.len()));

    Ok(())
}
