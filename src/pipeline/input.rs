//! Input loading: turn a CLI path or URL into a [`CandidateFile`].
//!
//! The loader plays the part a browser plays for `<input type="file">`: it
//! reads the bytes and declares a media type. Intake then decides, on the
//! declared type alone, whether the file is acceptable.
//!
//! - Local file: media type from the extension (`.pdf` → `application/pdf`),
//!   empty when unknown.
//! - URL: media type from `Content-Type` (parameters dropped). A missing or
//!   `application/octet-stream` header falls back to the URL's extension.

use crate::error::InputError;
use crate::pipeline::intake::{CandidateFile, PDF_MEDIA_TYPE};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Load `input` (path or http(s) URL) as a candidate file.
pub async fn load_candidate(input: &str, download_timeout_secs: u64) -> Result<CandidateFile, InputError> {
    if is_url(input) {
        download(input, download_timeout_secs).await
    } else {
        load_local(Path::new(input)).await
    }
}

/// Media type a file picker would declare for `name`.
pub fn media_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "",
    }
}

async fn load_local(path: &Path) -> Result<CandidateFile, InputError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InputError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => InputError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => InputError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type_for(&name);

    debug!("Loaded '{}' ({} bytes, type '{}')", name, bytes.len(), media_type);
    Ok(CandidateFile::new(name, media_type, bytes))
}

async fn download(url: &str, timeout_secs: u64) -> Result<CandidateFile, InputError> {
    info!("Downloading {}", url);

    let failed = |reason: String| InputError::DownloadFailed {
        url: url.to_string(),
        reason,
    };
    let classify = |e: reqwest::Error| {
        if e.is_timeout() {
            InputError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            failed(e.to_string())
        }
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| failed(e.to_string()))?;

    let response = client.get(url).send().await.map_err(classify)?;

    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status())));
    }

    let name = filename_from_url(url);
    let header_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(media_type_essence);

    let media_type = match header_type {
        Some(t) if !t.is_empty() && t != "application/octet-stream" => t,
        _ => media_type_for(&name).to_string(),
    };

    let bytes = response.bytes().await.map_err(classify)?;
    info!("Downloaded '{}' ({} bytes, type '{}')", name, bytes.len(), media_type);

    Ok(CandidateFile::new(name, media_type, bytes.to_vec()))
}

/// `application/pdf; charset=binary` → `application/pdf`.
fn media_type_essence(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Last non-empty path segment of `url`, or `documento.pdf`.
fn filename_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut s| s.next_back().map(str::to_string))
        })
        .filter(|last| !last.is_empty())
        .unwrap_or_else(|| "documento.pdf".to_string())
}
