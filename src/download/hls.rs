//! HLS playlist downloading (video plus separate audio rendition).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use m3u8_rs::{AlternativeMediaType, MasterPlaylist, Playlist};
use reqwest::Client;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::fs::paths::ensure_parent_dir;

/// The streams picked from a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HlsStreams {
    pub video: String,
    pub audio: Option<String>,
}

/// Download an HLS stream and mux it into `output_path` with ffmpeg.
///
/// With `overwrite` off, ffmpeg refuses to replace an existing file.
pub async fn download_hls(
    client: &Client,
    playlist_url: &str,
    output_path: &Path,
    overwrite: bool,
) -> Result<PathBuf> {
    let content = fetch_playlist(client, playlist_url).await?;

    let playlist = m3u8_rs::parse_playlist_res(content.as_bytes())
        .map_err(|e| Error::Hls(format!("Failed to parse playlist: {:?}", e)))?;

    let streams = match playlist {
        Playlist::MasterPlaylist(master) => select_streams(playlist_url, &master)?,
        Playlist::MediaPlaylist(_) => HlsStreams {
            video: playlist_url.to_string(),
            audio: None,
        },
    };

    tracing::debug!(
        "HLS video: {}, audio: {}",
        streams.video,
        streams.audio.as_deref().unwrap_or("none")
    );

    ensure_parent_dir(output_path).await?;
    mux_streams(&streams, output_path, overwrite).await?;

    Ok(output_path.to_path_buf())
}

/// Fetch playlist content from URL.
async fn fetch_playlist(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Hls(format!(
            "Failed to fetch playlist: HTTP {}",
            response.status()
        )));
    }

    let content = response
        .text()
        .await
        .map_err(|e| Error::Hls(format!("Failed to read playlist: {}", e)))?;
    Ok(content)
}

/// Pick the highest-bandwidth video variant and its audio rendition.
pub fn select_streams(base_url: &str, master: &MasterPlaylist) -> Result<HlsStreams> {
    let variant = master
        .variants
        .iter()
        .filter(|v| !v.is_i_frame)
        .max_by_key(|v| v.bandwidth)
        .ok_or_else(|| Error::Hls("No variants in master playlist".into()))?;

    let video = resolve_url(base_url, &variant.uri)?;

    let audio_renditions = master
        .alternatives
        .iter()
        .filter(|alt| alt.media_type == AlternativeMediaType::Audio && alt.uri.is_some());

    // Prefer the variant's own audio group, default rendition first
    let audio = match variant.audio.as_deref() {
        Some(group) => {
            let in_group: Vec<_> = audio_renditions
                .filter(|alt| alt.group_id == group)
                .collect();
            in_group
                .iter()
                .find(|alt| alt.default)
                .or_else(|| in_group.first())
                .and_then(|alt| alt.uri.clone())
        }
        None => audio_renditions.max_by_key(|alt| alt.default).and_then(|alt| alt.uri.clone()),
    };

    let audio = match audio {
        Some(uri) => Some(resolve_url(base_url, &uri)?),
        None => None,
    };

    Ok(HlsStreams { video, audio })
}

/// Resolve a potentially relative URL against a base URL.
fn resolve_url(base: &str, path: &str) -> Result<String> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Ok(path.to_string());
    }

    let base_url = url::Url::parse(base)?;
    let resolved = base_url.join(path)?;
    Ok(resolved.to_string())
}

/// ffmpeg arguments that copy the picked streams into `output`.
fn ffmpeg_args(streams: &HlsStreams, output: &str, overwrite: bool) -> Vec<String> {
    let mut args: Vec<String> = vec![
        if overwrite { "-y" } else { "-n" }.into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        streams.video.clone(),
    ];

    if let Some(audio) = &streams.audio {
        args.extend([
            "-i".into(),
            audio.clone(),
            "-map".into(),
            "0:v:0".into(),
            "-map".into(),
            "1:a:0".into(),
        ]);
    }

    args.extend(["-c".into(), "copy".into(), output.to_string()]);
    args
}

/// Mux the streams into the output container using ffmpeg.
async fn mux_streams(streams: &HlsStreams, output: &Path, overwrite: bool) -> Result<()> {
    let output_str = output
        .to_str()
        .ok_or_else(|| Error::Hls("Invalid path encoding for output".into()))?;
    let existed = tokio::fs::try_exists(output).await.unwrap_or(false);

    let result = Command::new("ffmpeg")
        .args(ffmpeg_args(streams, output_str, overwrite))
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FFmpegNotFound
            } else {
                Error::FFmpeg(format!("Failed to run ffmpeg: {}", e))
            }
        })?;

    if !result.status.success() {
        // Never delete a file ffmpeg was told to keep
        if overwrite || !existed {
            let _ = tokio::fs::remove_file(output).await;
        }
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(Error::FFmpeg(format!(
            "ffmpeg exited with status {}: {}",
            result.status,
            stderr.trim()
        )));
    }

    Ok(())
}
