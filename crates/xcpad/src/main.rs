use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod exec;
mod format;
mod host;
mod picker;
mod simctl;
mod tools;
mod ui;
mod xcode;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load config
    let config = config::load_config(&cli.config)?;

    // Resolve external tool paths once; handlers borrow the result
    let toolchain = exec::Toolchain::discover();
    let runner = exec::ShellRunner;
    let picker = picker::TerminalPicker;
    let host = host::RealHost::new(config.clone());

    match cli.command {
        Commands::Build(args) => {
            cli::commands::build::run(args, &picker, &host, &toolchain, &config).await?;
        }
        Commands::Run(args) => {
            cli::commands::run::run(args, &runner, &picker, &host, &toolchain, &config).await?;
        }
        Commands::Devices => {
            cli::commands::devices::run(&runner).await?;
        }
        Commands::Simulators { command } => {
            cli::commands::simulators::run(command, &runner, &picker).await?;
        }
        Commands::Format(args) => {
            cli::commands::format::run(args, &runner, &toolchain, &config).await?;
        }
        Commands::Tools { command } => {
            cli::commands::tools::run(command, &runner, &toolchain).await?;
        }
        Commands::Clean => {
            cli::commands::clean::run(&host).await?;
        }
        Commands::Config { command } => {
            cli::commands::config::run(command, &cli.config).await?;
        }
    }

    Ok(())
}
