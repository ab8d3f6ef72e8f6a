use thiserror::Error;

/// Errors that can occur in xcpad operations
#[derive(Debug, Error)]
pub enum XcpadError {
    /// An external command failed to launch or exited nonzero.
    #[error("`{command}` failed: {detail}")]
    ToolInvocation { command: String, detail: String },

    /// An external command produced output we could not interpret.
    #[error("could not parse output of `{command}`: {detail}")]
    MalformedOutput { command: String, detail: String },

    /// The user dismissed a picker without choosing anything.
    #[error("selection cancelled")]
    SelectionCancelled,

    #[error("no workspace folder found")]
    NoWorkspaceOpen,

    #[error("no storage path found")]
    NoStoragePath,

    #[error("tool not installed: {0}")]
    ToolNotInstalled(String),

    #[error("scheme not found: {0}")]
    SchemeNotFound(String),

    #[error("no .xcodeproj or .xcworkspace found in workspace")]
    NoXcodeProject,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl XcpadError {
    pub fn tool_invocation(command: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ToolInvocation {
            command: command.into(),
            detail: detail.into(),
        }
    }

    pub fn malformed_output(command: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedOutput {
            command: command.into(),
            detail: detail.into(),
        }
    }
}
