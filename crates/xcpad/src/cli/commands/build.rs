use anyhow::Result;
use std::path::Path;
use xcpad_common::{BuildConfiguration, CliConfig};

use crate::cli::BuildArgs;
use crate::exec::Toolchain;
use crate::host::{self, HostEnv};
use crate::picker::{Picker, PickerItem};
use crate::ui::Styles;
use crate::xcode::{self, BuildRequest};

/// Build a scheme with xcodebuild
pub async fn run(
    args: BuildArgs,
    picker: &impl Picker,
    host: &impl HostEnv,
    toolchain: &Toolchain,
    config: &CliConfig,
) -> Result<()> {
    let workspace = host::get_workspace_path(host)?;
    let (project_file, is_workspace) = xcode::find_xcode_project(&workspace)?;
    let scheme = resolve_scheme(args.scheme, &workspace, picker)?;
    let configuration = resolve_configuration(args.configuration.as_deref(), config)?;

    let bundle_dir = host::prepare_bundle_dir(host, &scheme).await?;

    Styles::header("Building");
    Styles::kv("Scheme", &scheme);
    Styles::kv("Configuration", &configuration.to_string());
    println!();

    let request = BuildRequest {
        project_file,
        is_workspace,
        workspace_dir: workspace,
        scheme,
        configuration,
        result_bundle_path: bundle_dir,
        clean: args.clean,
    };

    let beautify = config
        .build
        .xcbeautify
        .then(|| toolchain.xcbeautify.as_deref())
        .flatten();
    xcode::run_build(&request, beautify).await?;

    Styles::success("Build succeeded");
    Ok(())
}

/// Use the given scheme, or discover shared schemes and ask
pub(crate) fn resolve_scheme(
    scheme: Option<String>,
    workspace: &Path,
    picker: &impl Picker,
) -> Result<String> {
    if let Some(scheme) = scheme {
        return Ok(scheme);
    }

    let schemes = xcode::find_schemes(workspace)?;
    if schemes.is_empty() {
        anyhow::bail!("No schemes found in workspace");
    }
    if schemes.len() == 1 {
        Styles::info(&format!("Using scheme: {}", schemes[0]));
        return Ok(schemes[0].clone());
    }

    let items = schemes
        .into_iter()
        .map(|scheme| PickerItem::new(scheme.clone(), scheme))
        .collect();
    picker.pick("Select scheme", items)
}

pub(crate) fn resolve_configuration(
    arg: Option<&str>,
    config: &CliConfig,
) -> Result<BuildConfiguration> {
    match arg {
        Some(value) => value.parse().map_err(|e: String| anyhow::anyhow!(e)),
        None => Ok(config.build.configuration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::testing::{CancellingPicker, RecordingPicker};
    use xcpad_common::XcpadError;

    #[test]
    fn explicit_scheme_skips_discovery() {
        let tmp = tempfile::tempdir().unwrap();
        let scheme =
            resolve_scheme(Some("Custom".to_string()), tmp.path(), &CancellingPicker).unwrap();
        assert_eq!(scheme, "Custom");
    }

    #[test]
    fn single_scheme_is_used_without_asking() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("Solo.xcodeproj")).unwrap();

        let scheme = resolve_scheme(None, tmp.path(), &CancellingPicker).unwrap();
        assert_eq!(scheme, "Solo");
    }

    #[test]
    fn multiple_schemes_go_through_the_picker() {
        let tmp = tempfile::tempdir().unwrap();
        let schemes_dir = tmp.path().join("App.xcodeproj/xcshareddata/xcschemes");
        std::fs::create_dir_all(&schemes_dir).unwrap();
        std::fs::write(schemes_dir.join("App.xcscheme"), b"").unwrap();
        std::fs::write(schemes_dir.join("AppTests.xcscheme"), b"").unwrap();

        let picker = RecordingPicker::new();
        let scheme = resolve_scheme(None, tmp.path(), &picker).unwrap();
        assert_eq!(scheme, "App");

        let seen = picker.seen.borrow();
        assert_eq!(seen[0].0, "Select scheme");
        assert_eq!(seen[0].1, vec!["App", "AppTests"]);
    }

    #[test]
    fn scheme_picker_dismissal_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let schemes_dir = tmp.path().join("App.xcodeproj/xcshareddata/xcschemes");
        std::fs::create_dir_all(&schemes_dir).unwrap();
        std::fs::write(schemes_dir.join("A.xcscheme"), b"").unwrap();
        std::fs::write(schemes_dir.join("B.xcscheme"), b"").unwrap();

        let err = resolve_scheme(None, tmp.path(), &CancellingPicker).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<XcpadError>(),
            Some(XcpadError::SelectionCancelled)
        ));
    }

    #[test]
    fn configuration_falls_back_to_config_default() {
        let config = CliConfig::default();
        assert_eq!(
            resolve_configuration(None, &config).unwrap(),
            BuildConfiguration::Debug
        );
        assert_eq!(
            resolve_configuration(Some("release"), &config).unwrap(),
            BuildConfiguration::Release
        );
        assert!(resolve_configuration(Some("prod"), &config).is_err());
    }
}
