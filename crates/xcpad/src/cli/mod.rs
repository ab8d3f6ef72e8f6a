pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xcpad")]
#[command(about = "Xcode build, simulator and formatting tools behind one command line")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "XCPAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a scheme with xcodebuild
    Build(BuildArgs),

    /// Build and run a scheme in the simulator
    Run(RunArgs),

    /// List available simulator devices
    Devices,

    /// Manage simulators
    Simulators {
        #[command(subcommand)]
        command: SimulatorCommands,
    },

    /// Format Swift sources with swift-format
    Format(FormatArgs),

    /// Show or install the wrapped command-line tools
    Tools {
        #[command(subcommand)]
        command: Option<ToolCommands>,
    },

    /// Remove the bundle directory with all build artifacts
    Clean,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args)]
pub struct BuildArgs {
    /// Xcode scheme to build; picked interactively when omitted
    #[arg(short, long)]
    pub scheme: Option<String>,

    /// Build configuration (debug/release)
    #[arg(short = 'C', long)]
    pub configuration: Option<String>,

    /// Clean build before building
    #[arg(long)]
    pub clean: bool,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Xcode scheme to build and run; picked interactively when omitted
    #[arg(short, long)]
    pub scheme: Option<String>,

    /// Build configuration (debug/release)
    #[arg(short = 'C', long)]
    pub configuration: Option<String>,

    /// Target simulator device name; picked interactively when omitted
    #[arg(short, long)]
    pub device: Option<String>,
}

#[derive(Subcommand)]
pub enum SimulatorCommands {
    /// Boot a simulator
    Start {
        /// Device name; picked interactively when omitted
        #[arg(short, long)]
        device: Option<String>,
    },

    /// Shutdown a booted simulator
    Stop {
        /// Device name; picked interactively when omitted
        #[arg(short, long)]
        device: Option<String>,
    },

    /// Open the Simulator application
    Open,

    /// Remove the CoreSimulator cache directory
    RemoveCache,
}

#[derive(clap::Args)]
pub struct FormatArgs {
    /// Files or directories to format; defaults to the current directory
    pub paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum ToolCommands {
    /// Install a tool via Homebrew
    Install {
        /// Tool name (see `xcpad tools`)
        name: String,
    },

    /// Open a tool's documentation in the browser
    Docs {
        /// Tool name (see `xcpad tools`)
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration
    Show,
}
