use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;
use xcpad_common::XcpadError;

use crate::exec::{run_checked, CommandRunner, Toolchain};

/// Collect .swift files under the given paths, sorted for stable output
pub fn collect_swift_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_swift(path) {
                files.push(path.clone());
            }
            continue;
        }

        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_swift(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_swift(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "swift")
}

/// Format files in place with swift-format
pub async fn format_files(
    runner: &impl CommandRunner,
    toolchain: &Toolchain,
    files: &[PathBuf],
    extra_args: &[String],
) -> Result<()> {
    let Some(swift_format) = toolchain.swift_format.as_ref() else {
        return Err(XcpadError::ToolNotInstalled("swift-format".to_string()).into());
    };

    info!("Formatting {} files", files.len());

    let mut args: Vec<String> = vec!["--in-place".to_string()];
    args.extend(extra_args.iter().cloned());
    args.extend(files.iter().map(|file| file.to_string_lossy().to_string()));

    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    run_checked(runner, &swift_format.to_string_lossy(), &arg_refs).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_swift_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("Sources/App")).unwrap();
        std::fs::write(tmp.path().join("Sources/App/Main.swift"), b"").unwrap();
        std::fs::write(tmp.path().join("Sources/Helper.swift"), b"").unwrap();
        std::fs::write(tmp.path().join("README.md"), b"").unwrap();

        let files = collect_swift_files(&[tmp.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "swift"));
    }

    #[test]
    fn accepts_a_single_file_path() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("One.swift");
        std::fs::write(&file, b"").unwrap();

        let files = collect_swift_files(&[file.clone()]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[tokio::test]
    async fn formatting_without_swift_format_fails() {
        let toolchain = Toolchain::default();
        let err = format_files(
            &crate::exec::testing::StaticRunner::ok(""),
            &toolchain,
            &[PathBuf::from("One.swift")],
            &[],
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<XcpadError>(),
            Some(XcpadError::ToolNotInstalled(_))
        ));
    }
}
