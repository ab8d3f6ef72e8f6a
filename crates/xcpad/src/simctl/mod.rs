use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;
use xcpad_common::{Simulator, SimulatorGroup, SimulatorState, XcpadError};

use crate::exec::{run_json, CommandRunner};
use crate::picker::{Picker, PickerItem};

const LIST_COMMAND: &str = "xcrun simctl list devices --json";

/// Raw simctl JSON output structure for devices.
///
/// The `devices` map is keyed by runtime identifier; serde_json's
/// preserve_order feature keeps the groups in document order.
#[derive(Debug, Deserialize)]
struct SimctlDeviceList {
    devices: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SimctlDevice {
    #[serde(default)]
    udid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    state: String,
    #[serde(rename = "isAvailable", default)]
    is_available: Option<bool>,
}

/// List simulators grouped by runtime, in simctl listing order
pub async fn get_simulators(runner: &impl CommandRunner) -> Result<Vec<SimulatorGroup>> {
    let list: SimctlDeviceList =
        run_json(runner, "xcrun", &["simctl", "list", "devices", "--json"]).await?;

    let mut groups = Vec::with_capacity(list.devices.len());
    for (runtime_id, value) in list.devices {
        let raw: Vec<SimctlDevice> = serde_json::from_value(value)
            .map_err(|e| XcpadError::malformed_output(LIST_COMMAND, e.to_string()))?;

        let runtime = runtime_display_name(&runtime_id);
        let devices = raw
            .into_iter()
            .map(|device| Simulator {
                udid: device.udid,
                name: device.name,
                runtime_identifier: runtime_id.clone(),
                runtime: runtime.clone(),
                state: parse_state(&device.state),
                is_available: device.is_available.unwrap_or(true),
            })
            .collect();

        groups.push(SimulatorGroup {
            runtime_identifier: runtime_id,
            runtime,
            devices,
        });
    }

    Ok(groups)
}

/// Keep only available devices, flattened in group order then in-group order
pub fn available_simulators(groups: Vec<SimulatorGroup>) -> Vec<Simulator> {
    groups
        .into_iter()
        .flat_map(|group| {
            group
                .devices
                .into_iter()
                .filter(|device| device.is_available)
        })
        .collect()
}

/// Ask the user which simulator to run on
pub async fn ask_simulator_to_run_on(
    runner: &impl CommandRunner,
    picker: &impl Picker,
) -> Result<Simulator> {
    let groups = get_simulators(runner).await?;

    let items = available_simulators(groups)
        .into_iter()
        .map(|simulator| PickerItem::new(simulator.name.clone(), simulator))
        .collect();

    picker.pick("Select simulator to run on", items)
}

/// Find the first available device whose name matches (case-insensitive)
pub async fn find_device_by_name(runner: &impl CommandRunner, name: &str) -> Result<Simulator> {
    let groups = get_simulators(runner).await?;

    available_simulators(groups)
        .into_iter()
        .find(|device| device.name.to_lowercase().contains(&name.to_lowercase()))
        .ok_or_else(|| {
            anyhow::anyhow!("No available simulator found matching '{}'", name)
        })
}

/// Boot a simulator device
pub async fn boot_device(runner: &impl CommandRunner, udid: &str) -> Result<()> {
    info!("Booting simulator: {}", udid);

    let output = runner.run("xcrun", &["simctl", "boot", udid]).await?;

    // "Unable to boot device in current state: Booted" is not an error
    if !output.success && !output.stderr.contains("Booted") {
        return Err(XcpadError::tool_invocation(
            format!("xcrun simctl boot {udid}"),
            output.stderr.trim().to_string(),
        )
        .into());
    }

    Ok(())
}

/// Shutdown a simulator device
pub async fn shutdown_device(runner: &impl CommandRunner, udid: &str) -> Result<()> {
    info!("Shutting down simulator: {}", udid);

    let output = runner.run("xcrun", &["simctl", "shutdown", udid]).await?;

    // Ignore "Unable to shutdown device in current state: Shutdown"
    if !output.success && !output.stderr.contains("Shutdown") {
        return Err(XcpadError::tool_invocation(
            format!("xcrun simctl shutdown {udid}"),
            output.stderr.trim().to_string(),
        )
        .into());
    }

    Ok(())
}

/// Install an app bundle on a simulator
pub async fn install_app(runner: &impl CommandRunner, udid: &str, app_path: &str) -> Result<()> {
    info!("Installing {} on simulator {}", app_path, udid);

    crate::exec::run_checked(runner, "xcrun", &["simctl", "install", udid, app_path]).await?;
    Ok(())
}

/// Launch an app on a simulator, restarting it if already running.
/// Returns the app's PID when simctl reports one.
pub async fn launch_app(
    runner: &impl CommandRunner,
    udid: &str,
    bundle_id: &str,
) -> Result<Option<u32>> {
    info!("Launching {} on simulator {}", bundle_id, udid);

    let output = crate::exec::run_checked(
        runner,
        "xcrun",
        &[
            "simctl",
            "launch",
            "--terminate-running-process",
            udid,
            bundle_id,
        ],
    )
    .await?;

    // simctl prints "com.example.App: 12345"
    let pid = output.stdout.lines().find_map(|line| {
        if line.contains(bundle_id) {
            line.split_whitespace()
                .last()
                .and_then(|s| s.parse::<u32>().ok())
        } else {
            None
        }
    });

    Ok(pid)
}

/// Bring the Simulator application to the foreground
pub async fn open_simulator_app(runner: &impl CommandRunner) -> Result<()> {
    crate::exec::run_checked(runner, "open", &["-a", "Simulator"]).await?;
    Ok(())
}

/// CoreSimulator cache directory under the user's home
pub fn simulator_caches_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library/Developer/CoreSimulator/Caches"))
}

/// Human-readable runtime name from a simctl runtime identifier,
/// e.g. "com.apple.CoreSimulator.SimRuntime.iOS-17-0" -> "iOS 17 0"
fn runtime_display_name(runtime_id: &str) -> String {
    runtime_id
        .strip_prefix("com.apple.CoreSimulator.SimRuntime.")
        .unwrap_or(runtime_id)
        .replace(['-', '.'], " ")
}

/// Parse state string to enum
fn parse_state(state: &str) -> SimulatorState {
    match state.to_lowercase().as_str() {
        "booted" => SimulatorState::Booted,
        "booting" => SimulatorState::Booting,
        "shuttingdown" | "shutting down" => SimulatorState::ShuttingDown,
        _ => SimulatorState::Shutdown,
    }
}

/// Count devices across groups, split into (total, available, booted)
pub fn device_counts(groups: &[SimulatorGroup]) -> (usize, usize, usize) {
    let mut total = 0;
    let mut available = 0;
    let mut booted = 0;
    for group in groups {
        for device in &group.devices {
            total += 1;
            if device.is_available {
                available += 1;
            }
            if device.is_booted() {
                booted += 1;
            }
        }
    }
    (total, available, booted)
}
