use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;
use xcpad_common::XcpadError;

/// Collected output of a finished external command
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Boundary for invoking external commands, stubbed in tests
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[&str]) -> Result<ExecOutput>;
}

/// Runs commands via tokio::process
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<ExecOutput> {
        debug!("Running {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| XcpadError::tool_invocation(program, e.to_string()))?;

        Ok(ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
            success: output.status.success(),
        })
    }
}

/// Run a command, failing with `ToolInvocation` on nonzero exit
pub async fn run_checked(
    runner: &impl CommandRunner,
    program: &str,
    args: &[&str],
) -> Result<ExecOutput> {
    let output = runner.run(program, args).await?;
    if !output.success {
        return Err(XcpadError::tool_invocation(
            render_command(program, args),
            output.stderr.trim().to_string(),
        )
        .into());
    }
    Ok(output)
}

/// Run a command whose stdout is JSON and parse it into `T`
pub async fn run_json<T: DeserializeOwned>(
    runner: &impl CommandRunner,
    program: &str,
    args: &[&str],
) -> Result<T> {
    let output = run_checked(runner, program, args).await?;
    serde_json::from_str(&output.stdout)
        .map_err(|e| XcpadError::malformed_output(render_command(program, args), e.to_string()).into())
}

fn render_command(program: &str, args: &[&str]) -> String {
    let mut command = program.to_string();
    for arg in args {
        command.push(' ');
        command.push_str(arg);
    }
    command
}

/// Paths of the external tools xcpad wraps, resolved from PATH once at
/// startup and passed by reference to whatever needs them.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    pub xcrun: Option<PathBuf>,
    pub xcodebuild: Option<PathBuf>,
    pub xcbeautify: Option<PathBuf>,
    pub swift_format: Option<PathBuf>,
    pub brew: Option<PathBuf>,
}

impl Toolchain {
    /// Resolve tool paths. Missing tools are surfaced when first used.
    pub fn discover() -> Self {
        let toolchain = Self {
            xcrun: which::which("xcrun").ok(),
            xcodebuild: which::which("xcodebuild").ok(),
            xcbeautify: which::which("xcbeautify").ok(),
            swift_format: which::which("swift-format").ok(),
            brew: which::which("brew").ok(),
        };
        debug!("Discovered toolchain: {:?}", toolchain);
        toolchain
    }

    /// Resolved path for a binary name, if installed
    pub fn lookup(&self, binary: &str) -> Option<&PathBuf> {
        match binary {
            "xcrun" => self.xcrun.as_ref(),
            "xcodebuild" => self.xcodebuild.as_ref(),
            "xcbeautify" => self.xcbeautify.as_ref(),
            "swift-format" => self.swift_format.as_ref(),
            "brew" => self.brew.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Runner that replays a canned response for every invocation
    pub struct StaticRunner {
        pub stdout: String,
        pub stderr: String,
        pub success: bool,
    }

    impl StaticRunner {
        pub fn ok(stdout: &str) -> Self {
            Self {
                stdout: stdout.to_string(),
                stderr: String::new(),
                success: true,
            }
        }

        pub fn failing(stderr: &str) -> Self {
            Self {
                stdout: String::new(),
                stderr: stderr.to_string(),
                success: false,
            }
        }
    }

    #[async_trait]
    impl CommandRunner for StaticRunner {
        async fn run(&self, _program: &str, _args: &[&str]) -> Result<ExecOutput> {
            Ok(ExecOutput {
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
                exit_code: if self.success { Some(0) } else { Some(1) },
                success: self.success,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[tokio::test]
    async fn shell_runner_captures_stdout() {
        let output = ShellRunner.run("sh", &["-c", "echo hello"]).await.unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn shell_runner_reports_missing_binary_as_tool_invocation() {
        let err = ShellRunner
            .run("xcpad-does-not-exist", &[])
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<XcpadError>(),
            Some(XcpadError::ToolInvocation { .. })
        ));
    }

    #[tokio::test]
    async fn run_checked_fails_on_nonzero_exit() {
        let err = run_checked(&ShellRunner, "sh", &["-c", "echo boom >&2; exit 3"])
            .await
            .unwrap_err();
        match err.downcast_ref::<XcpadError>() {
            Some(XcpadError::ToolInvocation { detail, .. }) => assert_eq!(detail, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: u32,
    }

    #[tokio::test]
    async fn run_json_parses_stdout() {
        let payload: Payload = run_json(&ShellRunner, "sh", &["-c", r#"echo '{"value": 7}'"#])
            .await
            .unwrap();
        assert_eq!(payload.value, 7);
    }

    #[tokio::test]
    async fn run_json_flags_malformed_output() {
        let err = run_json::<Payload>(&ShellRunner, "sh", &["-c", "echo not-json"])
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<XcpadError>(),
            Some(XcpadError::MalformedOutput { .. })
        ));
    }
}
