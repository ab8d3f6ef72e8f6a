use anyhow::{Context, Result};
use colored::Colorize;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};
use xcpad_common::{BuildConfiguration, BuildSettings, XcpadError};

use crate::exec::CommandRunner;

const SHOW_SETTINGS_COMMAND: &str = "xcodebuild -showBuildSettings -json";

/// Everything one xcodebuild invocation needs
pub struct BuildRequest {
    /// Path to the .xcodeproj or .xcworkspace
    pub project_file: PathBuf,
    pub is_workspace: bool,
    /// Directory xcodebuild runs in
    pub workspace_dir: PathBuf,
    pub scheme: String,
    pub configuration: BuildConfiguration,
    /// Clean, currently-nonexistent path for -resultBundlePath
    pub result_bundle_path: PathBuf,
    pub clean: bool,
}

/// Find .xcodeproj or .xcworkspace in the workspace directory.
/// A workspace is preferred when both exist.
pub fn find_xcode_project(workspace_dir: &Path) -> Result<(PathBuf, bool)> {
    for entry in std::fs::read_dir(workspace_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().map_or(false, |e| e == "xcworkspace") {
            return Ok((path, true));
        }
    }

    for entry in std::fs::read_dir(workspace_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().map_or(false, |e| e == "xcodeproj") {
            return Ok((path, false));
        }
    }

    Err(XcpadError::NoXcodeProject.into())
}

/// Find shared schemes in a workspace directory, falling back to the
/// project name when none are shared
pub fn find_schemes(workspace_dir: &Path) -> Result<Vec<String>> {
    let mut schemes = Vec::new();

    for entry in std::fs::read_dir(workspace_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path
            .extension()
            .map_or(false, |e| e == "xcodeproj" || e == "xcworkspace")
        {
            let schemes_dir = path.join("xcshareddata/xcschemes");
            if schemes_dir.exists() {
                for scheme_entry in std::fs::read_dir(schemes_dir)? {
                    let scheme_path = scheme_entry?.path();
                    if scheme_path.extension().map_or(false, |e| e == "xcscheme") {
                        if let Some(name) = scheme_path.file_stem() {
                            schemes.push(name.to_string_lossy().to_string());
                        }
                    }
                }
            }
        }
    }

    if schemes.is_empty() {
        for entry in std::fs::read_dir(workspace_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map_or(false, |e| e == "xcodeproj") {
                if let Some(name) = path.file_stem() {
                    schemes.push(name.to_string_lossy().to_string());
                }
            }
        }
    }

    schemes.sort();
    Ok(schemes)
}

/// Read build settings for a scheme via `xcodebuild -showBuildSettings -json`
pub async fn get_build_settings(
    runner: &impl CommandRunner,
    project_file: &Path,
    is_workspace: bool,
    scheme: &str,
    configuration: BuildConfiguration,
) -> Result<BuildSettings> {
    let project_flag = if is_workspace { "-workspace" } else { "-project" };
    let file = project_file.to_string_lossy();
    let configuration = configuration.to_string();

    let output = crate::exec::run_checked(
        runner,
        "xcodebuild",
        &[
            "-showBuildSettings",
            "-json",
            project_flag,
            &file,
            "-scheme",
            scheme,
            "-configuration",
            &configuration,
            "-sdk",
            "iphonesimulator",
        ],
    )
    .await?;

    parse_build_settings(&output.stdout).map_err(Into::into)
}

#[derive(Debug, Deserialize)]
struct BuildSettingsEntry {
    #[serde(rename = "buildSettings", default)]
    build_settings: serde_json::Map<String, serde_json::Value>,
}

/// Extract the interesting settings from `-showBuildSettings -json` output
pub fn parse_build_settings(json: &str) -> Result<BuildSettings, XcpadError> {
    let entries: Vec<BuildSettingsEntry> = serde_json::from_str(json)
        .map_err(|e| XcpadError::malformed_output(SHOW_SETTINGS_COMMAND, e.to_string()))?;

    let entry = entries.into_iter().next().ok_or_else(|| {
        XcpadError::malformed_output(SHOW_SETTINGS_COMMAND, "empty settings list")
    })?;

    let get = |key: &str| {
        entry
            .build_settings
            .get(key)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    };

    Ok(BuildSettings {
        target_build_dir: get("TARGET_BUILD_DIR").map(PathBuf::from),
        full_product_name: get("FULL_PRODUCT_NAME"),
        bundle_identifier: get("PRODUCT_BUNDLE_IDENTIFIER"),
    })
}

/// Run xcodebuild for a scheme, streaming its output to the terminal.
///
/// When an xcbeautify path is given, stdout is piped through it; otherwise
/// lines are coloured by their severity marker.
pub async fn run_build(request: &BuildRequest, xcbeautify: Option<&Path>) -> Result<()> {
    info!(
        "Building scheme '{}' ({})",
        request.scheme, request.configuration
    );

    let mut cmd = Command::new("xcodebuild");

    if request.is_workspace {
        cmd.arg("-workspace").arg(&request.project_file);
    } else {
        cmd.arg("-project").arg(&request.project_file);
    }

    cmd.arg("-scheme")
        .arg(&request.scheme)
        .arg("-configuration")
        .arg(request.configuration.to_string())
        .arg("-sdk")
        .arg("iphonesimulator")
        .arg("-destination")
        .arg("generic/platform=iOS Simulator")
        .arg("-resultBundlePath")
        .arg(&request.result_bundle_path);

    if request.clean {
        cmd.arg("clean");
    }
    cmd.arg("build");

    cmd.current_dir(&request.workspace_dir);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    debug!("Running xcodebuild: {:?}", cmd);

    let mut child = cmd
        .spawn()
        .map_err(|e| XcpadError::tool_invocation("xcodebuild", e.to_string()))?;

    let stdout = child
        .stdout
        .take()
        .context("xcodebuild stdout not captured")?;
    let stderr = child
        .stderr
        .take()
        .context("xcodebuild stderr not captured")?;

    let stdout_task = match xcbeautify {
        Some(path) => {
            let mut beautifier = Command::new(path)
                .stdin(Stdio::piped())
                .spawn()
                .map_err(|e| XcpadError::tool_invocation("xcbeautify", e.to_string()))?;
            let mut stdin = beautifier
                .stdin
                .take()
                .context("xcbeautify stdin not captured")?;
            tokio::spawn(async move {
                let mut stdout = stdout;
                let _ = tokio::io::copy(&mut stdout, &mut stdin).await;
                drop(stdin);
                let _ = beautifier.wait().await;
            })
        }
        None => tokio::spawn(async move {
            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                print_build_line(&line);
            }
        }),
    };

    let stderr_task = tokio::spawn(async move {
        let reader = BufReader::new(stderr);
        let mut lines = reader.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            eprintln!("{}", line.red());
        }
    });

    let status = child.wait().await.context("Failed to wait for xcodebuild")?;
    let _ = stdout_task.await;
    let _ = stderr_task.await;

    if !status.success() {
        return Err(XcpadError::tool_invocation(
            "xcodebuild",
            format!("exited with code {:?}", status.code()),
        )
        .into());
    }

    Ok(())
}

/// Colour a build line by its severity marker
fn print_build_line(line: &str) {
    let lower = line.to_lowercase();
    if lower.contains("error:") || lower.contains("fatal error") {
        println!("{}", line.red());
    } else if lower.contains("warning:") {
        println!("{}", line.yellow());
    } else if lower.contains("note:") {
        println!("{}", line.dimmed());
    } else {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS_JSON: &str = r#"[
        {
            "action": "build",
            "target": "MyApp",
            "buildSettings": {
                "TARGET_BUILD_DIR": "/tmp/DerivedData/Build/Products/Debug-iphonesimulator",
                "FULL_PRODUCT_NAME": "MyApp.app",
                "PRODUCT_BUNDLE_IDENTIFIER": "com.example.MyApp",
                "SDKROOT": "iphonesimulator17.0"
            }
        }
    ]"#;

    #[test]
    fn parses_build_settings() {
        let settings = parse_build_settings(SETTINGS_JSON).unwrap();
        assert_eq!(
            settings.bundle_identifier.as_deref(),
            Some("com.example.MyApp")
        );
        assert_eq!(
            settings.app_path(),
            Some(PathBuf::from(
                "/tmp/DerivedData/Build/Products/Debug-iphonesimulator/MyApp.app"
            ))
        );
    }

    #[test]
    fn empty_settings_list_is_malformed() {
        let err = parse_build_settings("[]").unwrap_err();
        assert!(matches!(err, XcpadError::MalformedOutput { .. }));
    }

    #[test]
    fn garbage_settings_are_malformed() {
        let err = parse_build_settings("xcodebuild: error").unwrap_err();
        assert!(matches!(err, XcpadError::MalformedOutput { .. }));
    }

    #[test]
    fn finds_shared_schemes() {
        let tmp = tempfile::tempdir().unwrap();
        let schemes_dir = tmp.path().join("MyApp.xcodeproj/xcshareddata/xcschemes");
        std::fs::create_dir_all(&schemes_dir).unwrap();
        std::fs::write(schemes_dir.join("MyApp.xcscheme"), b"<Scheme/>").unwrap();
        std::fs::write(schemes_dir.join("MyAppTests.xcscheme"), b"<Scheme/>").unwrap();

        let schemes = find_schemes(tmp.path()).unwrap();
        assert_eq!(schemes, vec!["MyApp", "MyAppTests"]);
    }

    #[test]
    fn falls_back_to_project_name_without_shared_schemes() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("Widget.xcodeproj")).unwrap();

        let schemes = find_schemes(tmp.path()).unwrap();
        assert_eq!(schemes, vec!["Widget"]);
    }

    #[test]
    fn workspace_is_preferred_over_project() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("MyApp.xcodeproj")).unwrap();
        std::fs::create_dir_all(tmp.path().join("MyApp.xcworkspace")).unwrap();

        let (path, is_workspace) = find_xcode_project(tmp.path()).unwrap();
        assert!(is_workspace);
        assert!(path.to_string_lossy().ends_with("MyApp.xcworkspace"));
    }

    #[test]
    fn missing_project_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = find_xcode_project(tmp.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<XcpadError>(),
            Some(XcpadError::NoXcodeProject)
        ));
    }
}
