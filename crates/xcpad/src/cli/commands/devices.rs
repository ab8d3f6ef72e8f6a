use anyhow::Result;
use xcpad_common::SimulatorState;

use crate::exec::CommandRunner;
use crate::simctl;

/// List available simulator devices
pub async fn run(runner: &impl CommandRunner) -> Result<()> {
    println!("Fetching available simulators...\n");

    let groups = simctl::get_simulators(runner).await?;

    for group in &groups {
        if group.devices.is_empty() {
            continue;
        }
        println!("{}:", group.runtime);

        for device in &group.devices {
            let state_icon = match device.state {
                SimulatorState::Booted => "🟢",
                SimulatorState::Booting | SimulatorState::ShuttingDown => "🟡",
                SimulatorState::Shutdown => "⚪",
            };
            let available = if device.is_available {
                ""
            } else {
                " (unavailable)"
            };

            println!(
                "  {} {} [{}]{}",
                state_icon, device.name, device.udid, available
            );
        }
        println!();
    }

    let (total, available, booted) = simctl::device_counts(&groups);
    println!(
        "Total: {} devices ({} available, {} booted)",
        total, available, booted
    );

    Ok(())
}
