use anyhow::Result;
use xcpad_common::XcpadError;

use crate::exec::{run_checked, CommandRunner, Toolchain};
use crate::ui::{progress, Styles};

/// An external tool xcpad wraps
pub struct Tool {
    pub name: &'static str,
    pub binary: &'static str,
    pub brew_formula: Option<&'static str>,
    pub documentation: &'static str,
    pub required: bool,
}

/// Everything xcpad shells out to
pub const TOOLS: &[Tool] = &[
    Tool {
        name: "xcodebuild",
        binary: "xcodebuild",
        brew_formula: None,
        documentation: "https://developer.apple.com/xcode/",
        required: true,
    },
    Tool {
        name: "simctl",
        binary: "xcrun",
        brew_formula: None,
        documentation: "https://developer.apple.com/documentation/xcode/installing-additional-simulator-runtimes",
        required: true,
    },
    Tool {
        name: "xcbeautify",
        binary: "xcbeautify",
        brew_formula: Some("xcbeautify"),
        documentation: "https://github.com/cpisciotta/xcbeautify",
        required: false,
    },
    Tool {
        name: "swift-format",
        binary: "swift-format",
        brew_formula: Some("swift-format"),
        documentation: "https://github.com/swiftlang/swift-format",
        required: false,
    },
];

pub fn find_tool(name: &str) -> Option<&'static Tool> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// Print installation status for every wrapped tool
pub fn print_status(toolchain: &Toolchain) {
    Styles::header("Tools");
    for tool in TOOLS {
        match toolchain.lookup(tool.binary) {
            Some(path) => {
                Styles::success(&format!("{:<14} {}", tool.name, path.display()));
            }
            None if tool.required => {
                Styles::error(&format!("{:<14} not installed", tool.name));
            }
            None => {
                Styles::warning(&format!(
                    "{:<14} not installed (xcpad tools install {})",
                    tool.name, tool.name
                ));
            }
        }
    }
    println!();
}

/// Install a tool via Homebrew
pub async fn install(runner: &impl CommandRunner, toolchain: &Toolchain, name: &str) -> Result<()> {
    let Some(tool) = find_tool(name) else {
        anyhow::bail!("Unknown tool: {}", name);
    };
    let Some(formula) = tool.brew_formula else {
        anyhow::bail!("{} ships with Xcode and has no Homebrew formula", tool.name);
    };
    if toolchain.brew.is_none() {
        return Err(XcpadError::ToolNotInstalled("brew".to_string()).into());
    }

    let pb = progress::spinner(&format!("Installing {}...", tool.name));
    match run_checked(runner, "brew", &["install", formula]).await {
        Ok(_) => {
            progress::spinner_success(&pb, &format!("{} installed", tool.name));
            Ok(())
        }
        Err(e) => {
            progress::spinner_error(&pb, &format!("Failed: {e}"));
            Err(e)
        }
    }
}

/// Open a tool's documentation in the browser
pub fn open_documentation(name: &str) -> Result<()> {
    let Some(tool) = find_tool(name) else {
        anyhow::bail!("Unknown tool: {}", name);
    };
    open::that(tool.documentation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::testing::StaticRunner;

    #[test]
    fn registry_knows_every_tool_by_name() {
        assert!(find_tool("xcbeautify").is_some());
        assert!(find_tool("swift-format").is_some());
        assert!(find_tool("ghost-tool").is_none());
    }

    #[tokio::test]
    async fn installing_an_unknown_tool_fails() {
        let err = install(&StaticRunner::ok(""), &Toolchain::default(), "ghost-tool")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown tool"));
    }

    #[tokio::test]
    async fn xcode_tools_cannot_be_brew_installed() {
        let err = install(&StaticRunner::ok(""), &Toolchain::default(), "xcodebuild")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no Homebrew formula"));
    }

    #[tokio::test]
    async fn installing_without_brew_fails() {
        let err = install(&StaticRunner::ok(""), &Toolchain::default(), "xcbeautify")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<XcpadError>(),
            Some(XcpadError::ToolNotInstalled(_))
        ));
    }
}
