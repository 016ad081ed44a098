//! File extension resolution.

/// Extension used when nothing better is known.
pub const FALLBACK_EXTENSION: &str = "bin";

/// Extract extension from URL path.
pub fn extension_from_url(url: &str) -> Option<String> {
    // Only the path counts, so a bare host like example.com has no extension
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next()?.to_string(),
    };

    // Get the last segment
    let filename = path.rsplit('/').next()?;

    if !filename.contains('.') {
        return None;
    }

    let ext = filename.rsplit('.').next()?;

    // Validate it looks like an extension (1-10 chars, alphanumeric)
    if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_lowercase())
    } else {
        None
    }
}

/// Convert a `Content-Type` value to a file extension.
pub fn extension_from_content_type(content_type: &str) -> Option<String> {
    let mime = content_type.split(';').next()?.trim().to_lowercase();

    // Prefer the common spelling where mime_guess lists several
    let preferred = match mime.as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "video/mp4" => Some("mp4"),
        "audio/mpeg" => Some("mp3"),
        "video/quicktime" => Some("mov"),
        _ => None,
    };
    if let Some(ext) = preferred {
        return Some(ext.to_string());
    }

    mime_guess::get_mime_extensions_str(&mime)
        .and_then(|exts| exts.first())
        .map(|ext| ext.to_string())
}

/// Pick the extension for a download: URL first, then the response type.
pub fn resolve_extension(url: &str, content_type: Option<&str>) -> String {
    extension_from_url(url)
        .or_else(|| content_type.and_then(extension_from_content_type))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// Check if a URL points at an HLS playlist.
pub fn is_hls_url(url: &str) -> bool {
    extension_from_url(url).as_deref() == Some("m3u8")
}
