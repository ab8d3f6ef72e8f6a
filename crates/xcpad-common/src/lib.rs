pub mod build;
pub mod config;
pub mod error;
pub mod simulator;

pub use build::{BuildConfiguration, BuildSettings};
pub use config::{BuildConfig, CliConfig, FormatConfig, SimulatorConfig, StorageConfig, WorkspaceConfig};
pub use error::XcpadError;
pub use simulator::{Simulator, SimulatorGroup, SimulatorState};
