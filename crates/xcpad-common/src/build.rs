use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Xcode build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfiguration {
    Debug,
    Release,
}

impl Default for BuildConfiguration {
    fn default() -> Self {
        Self::Debug
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::Release => write!(f, "Release"),
        }
    }
}

impl FromStr for BuildConfiguration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(format!("unknown configuration: {other}")),
        }
    }
}

/// Settings extracted from `xcodebuild -showBuildSettings -json`
#[derive(Debug, Clone, Default)]
pub struct BuildSettings {
    /// Directory xcodebuild places the built product in
    pub target_build_dir: Option<PathBuf>,
    /// Product name including the .app extension
    pub full_product_name: Option<String>,
    /// CFBundleIdentifier of the product
    pub bundle_identifier: Option<String>,
}

impl BuildSettings {
    /// Absolute path to the built .app bundle, when both parts are known
    pub fn app_path(&self) -> Option<PathBuf> {
        let dir = self.target_build_dir.as_ref()?;
        let name = self.full_product_name.as_ref()?;
        Some(dir.join(name))
    }
}
