use anyhow::Result;

use crate::cli::SimulatorCommands;
use crate::exec::CommandRunner;
use crate::host::fs;
use crate::picker::{Picker, PickerItem};
use crate::simctl;
use crate::ui::{progress, Styles};

/// Manage simulators
pub async fn run(
    command: SimulatorCommands,
    runner: &impl CommandRunner,
    picker: &impl Picker,
) -> Result<()> {
    match command {
        SimulatorCommands::Start { device } => start(runner, picker, device).await,
        SimulatorCommands::Stop { device } => stop(runner, picker, device).await,
        SimulatorCommands::Open => simctl::open_simulator_app(runner).await,
        SimulatorCommands::RemoveCache => remove_cache().await,
    }
}

async fn start(
    runner: &impl CommandRunner,
    picker: &impl Picker,
    device: Option<String>,
) -> Result<()> {
    let simulator = match device {
        Some(name) => simctl::find_device_by_name(runner, &name).await?,
        None => {
            let groups = simctl::get_simulators(runner).await?;
            let items = simctl::available_simulators(groups)
                .into_iter()
                .filter(|simulator| !simulator.is_booted())
                .map(|simulator| PickerItem::new(simulator.name.clone(), simulator))
                .collect();
            picker.pick("Select simulator to start", items)?
        }
    };

    let pb = progress::spinner(&format!("Booting {}...", simulator.name));
    match simctl::boot_device(runner, &simulator.udid).await {
        Ok(()) => {
            progress::spinner_success(&pb, &format!("{} booted", simulator.name));
            Ok(())
        }
        Err(e) => {
            progress::spinner_error(&pb, &format!("Failed: {e}"));
            Err(e)
        }
    }
}

async fn stop(
    runner: &impl CommandRunner,
    picker: &impl Picker,
    device: Option<String>,
) -> Result<()> {
    let simulator = match device {
        Some(name) => simctl::find_device_by_name(runner, &name).await?,
        None => {
            let groups = simctl::get_simulators(runner).await?;
            let items = simctl::available_simulators(groups)
                .into_iter()
                .filter(|simulator| simulator.is_booted())
                .map(|simulator| PickerItem::new(simulator.name.clone(), simulator))
                .collect();
            picker.pick("Select simulator to stop", items)?
        }
    };

    let pb = progress::spinner(&format!("Shutting down {}...", simulator.name));
    match simctl::shutdown_device(runner, &simulator.udid).await {
        Ok(()) => {
            progress::spinner_success(&pb, &format!("{} shutdown", simulator.name));
            Ok(())
        }
        Err(e) => {
            progress::spinner_error(&pb, &format!("Failed: {e}"));
            Err(e)
        }
    }
}

async fn remove_cache() -> Result<()> {
    let Some(caches) = simctl::simulator_caches_dir() else {
        anyhow::bail!("Could not determine home directory");
    };

    Styles::info(&format!("Removing {}", caches.display()));
    fs::remove_directory(&caches).await?;
    Styles::success("Simulator cache removed");

    Ok(())
}
