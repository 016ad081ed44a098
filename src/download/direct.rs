//! Direct (single HTTP resource) downloading with retry and resume.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use rand::Rng;
use reqwest::{header, Client, StatusCode};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;

use crate::error::{Error, Result};
use crate::fs::naming::part_path;
use crate::fs::paths::ensure_parent_dir;
use crate::media::extension::{extension_from_url, resolve_extension};
use crate::output::create_download_bar;

/// Minimum file size to show progress bar (1 MB).
const PROGRESS_THRESHOLD: u64 = 1024 * 1024;

/// Upper bound for the retry backoff.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Knobs for a direct download.
#[derive(Debug, Clone)]
pub struct DirectOptions {
    /// Total attempts, at least one.
    pub retries: u32,
    pub continue_partial: bool,
    pub overwrite: bool,
    pub show_progress: bool,
}

impl Default for DirectOptions {
    fn default() -> Self {
        Self {
            retries: 10,
            continue_partial: true,
            overwrite: true,
            show_progress: true,
        }
    }
}

/// Outcome of a single attempt.
enum AttemptError {
    /// Worth another try (network errors, 5xx, 408, 429).
    Retryable(Error),
    /// Retrying cannot help (4xx, local IO).
    Fatal(Error),
}

/// Download `url` to the path `path_for(extension)` returns.
///
/// The extension comes from the URL when it has one, otherwise from the
/// response `Content-Type`. Data is streamed into `<path>.part` and renamed
/// on completion.
pub async fn download_direct<F>(
    client: &Client,
    url: &str,
    options: &DirectOptions,
    path_for: F,
) -> Result<PathBuf>
where
    F: Fn(&str) -> PathBuf,
{
    let planned = extension_from_url(url).map(|ext| path_for(&ext));

    if let Some(path) = planned.as_deref() {
        if !options.overwrite && path.exists() {
            tracing::info!("Already downloaded: {}", path.display());
            return Ok(path.to_path_buf());
        }
    }

    let attempts = options.retries.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match attempt_download(client, url, options, planned.as_deref(), &path_for).await {
            Ok(path) => return Ok(path),
            Err(AttemptError::Fatal(e)) => return Err(e),
            Err(AttemptError::Retryable(e)) => {
                tracing::debug!("Attempt {}/{} for {} failed: {}", attempt, attempts, url, e);
                last_error = Some(e);
                if attempt < attempts {
                    sleep(backoff_delay(attempt)).await;
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| Error::Download(format!("No attempts made for {}", url))))
}

async fn attempt_download<F>(
    client: &Client,
    url: &str,
    options: &DirectOptions,
    planned: Option<&Path>,
    path_for: &F,
) -> std::result::Result<PathBuf, AttemptError>
where
    F: Fn(&str) -> PathBuf,
{
    // Resume only when the final name is known before the response arrives
    let resume_from = match planned {
        Some(path) if options.continue_partial => partial_len(&part_path(path)).await,
        _ => 0,
    };

    let mut request = client.get(url);
    if resume_from > 0 {
        request = request.header(header::RANGE, format!("bytes={}-", resume_from));
    }

    let response = request
        .send()
        .await
        .map_err(|e| AttemptError::Retryable(Error::Http(e)))?;
    let status = response.status();
    tracing::debug!("GET {} -> {}", url, status);

    // The partial file already holds everything
    if status == StatusCode::RANGE_NOT_SATISFIABLE && resume_from > 0 {
        if let Some(path) = planned {
            finish_part(&part_path(path), path)
                .await
                .map_err(AttemptError::Fatal)?;
            return Ok(path.to_path_buf());
        }
    }

    if !status.is_success() {
        let err = Error::Download(format!("HTTP {} for {}", status, url));
        return Err(if is_retryable_status(status) {
            AttemptError::Retryable(err)
        } else {
            AttemptError::Fatal(err)
        });
    }

    let append = status == StatusCode::PARTIAL_CONTENT && resume_from > 0;

    let final_path = match planned {
        Some(path) => path.to_path_buf(),
        None => {
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            path_for(&resolve_extension(url, content_type))
        }
    };
    let part = part_path(&final_path);

    ensure_parent_dir(&final_path)
        .await
        .map_err(AttemptError::Fatal)?;

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(&part)
        .await
        .map_err(|e| AttemptError::Fatal(Error::Io(e)))?;

    let already = if append { resume_from } else { 0 };
    let total = response.content_length().map(|len| len + already);
    let progress = match total {
        Some(total) if options.show_progress && total > PROGRESS_THRESHOLD => {
            let name = final_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Some(create_download_bar(total, already, &name))
        }
        _ => None,
    };

    // Stream to file
    let mut stream = response.bytes_stream();
    let mut downloaded = already;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            AttemptError::Retryable(Error::Download(format!("Stream error: {}", e)))
        })?;
        file.write_all(&chunk)
            .await
            .map_err(|e| AttemptError::Fatal(Error::Io(e)))?;
        downloaded += chunk.len() as u64;

        if let Some(ref pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush()
        .await
        .map_err(|e| AttemptError::Fatal(Error::Io(e)))?;
    drop(file);

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    finish_part(&part, &final_path)
        .await
        .map_err(AttemptError::Fatal)?;

    Ok(final_path)
}

/// Size of an existing partial download, or 0.
async fn partial_len(part: &Path) -> u64 {
    fs::metadata(part).await.map(|m| m.len()).unwrap_or(0)
}

/// Move a finished `.part` file over the final path.
async fn finish_part(part: &Path, final_path: &Path) -> Result<()> {
    if fs::try_exists(final_path).await.unwrap_or(false) {
        fs::remove_file(final_path).await?;
    }
    fs::rename(part, final_path).await?;
    Ok(())
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
}

/// Exponential backoff with jitter: 0.5s, 1s, 2s, ... capped at 30s.
fn backoff_delay(attempt: u32) -> Duration {
    let base = Duration::from_millis(500u64.saturating_mul(1 << attempt.saturating_sub(1).min(16)));
    let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..250));
    base.min(MAX_BACKOFF) + jitter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_and_caps() {
        assert!(backoff_delay(1) < Duration::from_millis(750));
        assert!(backoff_delay(3) >= Duration::from_secs(2));
        assert!(backoff_delay(30) <= MAX_BACKOFF + Duration::from_millis(250));
    }

    #[test]
    fn test_retryable_status() {
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::FORBIDDEN));
    }
}
