//! Hand-off to an external media downloader (e.g. `yt-dlp`).

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::OptionsConfig;
use crate::error::{Error, Result};

/// Fragment retries passed to the external tool.
const FRAGMENT_RETRIES: u32 = 20;

/// Arguments for a yt-dlp compatible downloader.
pub fn external_args(url: &str, template: &str, options: &OptionsConfig) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "--format".into(),
        "bestvideo+bestaudio/best".into(),
        "--output".into(),
        template.to_string(),
        "--merge-output-format".into(),
        options.merge_output_format.clone(),
        "--no-playlist".into(),
        "--ignore-errors".into(),
        "--retries".into(),
        options.retries.to_string(),
        "--fragment-retries".into(),
        FRAGMENT_RETRIES.to_string(),
        "--quiet".into(),
        "--no-warnings".into(),
        "--print".into(),
        "after_move:filepath".into(),
    ];

    args.push(if options.continue_partial {
        "--continue".into()
    } else {
        "--no-continue".into()
    });

    if options.overwrite {
        args.push("--force-overwrites".into());
    } else {
        args.push("--no-overwrites".into());
    }

    args.push(url.to_string());
    args
}

/// Run the external downloader and return the file it reports.
pub async fn download_external(
    tool: &str,
    url: &str,
    template: &str,
    options: &OptionsConfig,
) -> Result<PathBuf> {
    tracing::debug!("Handing {} to {}", url, tool);

    let output = Command::new(tool)
        .args(external_args(url, template, options))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| Error::ExternalTool {
            tool: tool.to_string(),
            message: if e.kind() == std::io::ErrorKind::NotFound {
                "not found in PATH".to_string()
            } else {
                e.to_string()
            },
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::ExternalTool {
            tool: tool.to_string(),
            message: format!("exited with status {}: {}", output.status, stderr.trim()),
        });
    }

    let path = reported_path(&stdout).ok_or_else(|| Error::ExternalTool {
        tool: tool.to_string(),
        message: "no file was produced".to_string(),
    })?;

    if !path.exists() {
        return Err(Error::ExternalTool {
            tool: tool.to_string(),
            message: format!("reported file does not exist: {}", path.display()),
        });
    }

    Ok(path)
}

/// Last non-empty stdout line, which `--print after_move:filepath` emits.
fn reported_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}
