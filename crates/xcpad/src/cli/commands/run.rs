use anyhow::Result;
use xcpad_common::{CliConfig, XcpadError};

use crate::cli::RunArgs;
use crate::exec::{CommandRunner, Toolchain};
use crate::host::{self, HostEnv};
use crate::picker::Picker;
use crate::simctl;
use crate::ui::{progress, Styles};
use crate::xcode::{self, BuildRequest};

/// Build a scheme and run it in the simulator
pub async fn run(
    args: RunArgs,
    runner: &impl CommandRunner,
    picker: &impl Picker,
    host: &impl HostEnv,
    toolchain: &Toolchain,
    config: &CliConfig,
) -> Result<()> {
    let workspace = host::get_workspace_path(host)?;
    let (project_file, is_workspace) = xcode::find_xcode_project(&workspace)?;
    let scheme = super::build::resolve_scheme(args.scheme, &workspace, picker)?;
    let configuration =
        super::build::resolve_configuration(args.configuration.as_deref(), config)?;

    let bundle_dir = host::prepare_bundle_dir(host, &scheme).await?;

    Styles::header("Build and Run");
    Styles::kv("Scheme", &scheme);
    Styles::kv("Configuration", &configuration.to_string());
    println!();

    let request = BuildRequest {
        project_file: project_file.clone(),
        is_workspace,
        workspace_dir: workspace,
        scheme: scheme.clone(),
        configuration,
        result_bundle_path: bundle_dir,
        clean: false,
    };

    let beautify = config
        .build
        .xcbeautify
        .then(|| toolchain.xcbeautify.as_deref())
        .flatten();
    xcode::run_build(&request, beautify).await?;

    // Target simulator: explicit flag, then configured preference, then picker
    let simulator = if let Some(name) = args.device {
        simctl::find_device_by_name(runner, &name).await?
    } else if let Some(name) = config.simulator.preferred_device.as_deref() {
        match simctl::find_device_by_name(runner, name).await {
            Ok(simulator) => {
                Styles::info(&format!("Using preferred device: {}", simulator.name));
                simulator
            }
            Err(_) => simctl::ask_simulator_to_run_on(runner, picker).await?,
        }
    } else {
        simctl::ask_simulator_to_run_on(runner, picker).await?
    };

    if !simulator.is_booted() {
        let pb = progress::spinner(&format!("Booting {}...", simulator.name));
        match simctl::boot_device(runner, &simulator.udid).await {
            Ok(()) => progress::spinner_success(&pb, &format!("{} booted", simulator.name)),
            Err(e) => {
                progress::spinner_error(&pb, "Boot failed");
                return Err(e);
            }
        }
    }

    simctl::open_simulator_app(runner).await?;

    let settings =
        xcode::get_build_settings(runner, &project_file, is_workspace, &scheme, configuration)
            .await?;
    let app_path = settings.app_path().ok_or_else(|| {
        XcpadError::malformed_output(
            "xcodebuild -showBuildSettings -json",
            "missing TARGET_BUILD_DIR or FULL_PRODUCT_NAME",
        )
    })?;
    let bundle_id = settings.bundle_identifier.clone().ok_or_else(|| {
        XcpadError::malformed_output(
            "xcodebuild -showBuildSettings -json",
            "missing PRODUCT_BUNDLE_IDENTIFIER",
        )
    })?;

    simctl::install_app(runner, &simulator.udid, &app_path.to_string_lossy()).await?;
    let pid = simctl::launch_app(runner, &simulator.udid, &bundle_id).await?;

    match pid {
        Some(pid) => Styles::success(&format!("Launched {} (pid {})", bundle_id, pid)),
        None => Styles::success(&format!("Launched {}", bundle_id)),
    }

    Ok(())
}
