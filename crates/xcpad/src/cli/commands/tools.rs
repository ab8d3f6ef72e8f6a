use anyhow::Result;

use crate::cli::ToolCommands;
use crate::exec::{CommandRunner, Toolchain};
use crate::tools;

/// Show or install the wrapped command-line tools
pub async fn run(
    command: Option<ToolCommands>,
    runner: &impl CommandRunner,
    toolchain: &Toolchain,
) -> Result<()> {
    match command {
        None => {
            tools::print_status(toolchain);
            Ok(())
        }
        Some(ToolCommands::Install { name }) => tools::install(runner, toolchain, &name).await,
        Some(ToolCommands::Docs { name }) => tools::open_documentation(&name),
    }
}
