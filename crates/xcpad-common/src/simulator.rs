use serde::{Deserialize, Serialize};

/// A simulator device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulator {
    /// Device UDID
    pub udid: String,
    /// Device name (e.g., "iPhone 15 Pro")
    pub name: String,
    /// Runtime identifier (e.g., "com.apple.CoreSimulator.SimRuntime.iOS-17-0")
    pub runtime_identifier: String,
    /// Human-readable runtime (e.g., "iOS 17 0")
    pub runtime: String,
    /// Current state
    pub state: SimulatorState,
    /// Whether device is available
    pub is_available: bool,
}

impl Simulator {
    pub fn is_booted(&self) -> bool {
        self.state == SimulatorState::Booted
    }
}

/// Simulator device state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SimulatorState {
    Shutdown,
    Booted,
    Booting,
    ShuttingDown,
}

impl Default for SimulatorState {
    fn default() -> Self {
        Self::Shutdown
    }
}

/// One runtime's devices, in simctl listing order
#[derive(Debug, Clone)]
pub struct SimulatorGroup {
    /// Runtime identifier as reported by simctl
    pub runtime_identifier: String,
    /// Human-readable runtime name
    pub runtime: String,
    /// Devices in the order simctl listed them
    pub devices: Vec<Simulator>,
}
