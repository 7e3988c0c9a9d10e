//! Error types for the laudo-analyzer library.
//!
//! Three error types reflect three distinct places a run can stop:
//!
//! * [`ValidationError`] — **Local**: the user asked for something the
//!   front-end can answer on its own (no file selected, wrong file type).
//!   Shown as a short notice; the state machine never enters `Failed`.
//!
//! * [`AnalyzerError`] — **Attempt**: one analysis attempt failed (missing
//!   credential, transport, HTTP status, malformed body, timeout). The state
//!   machine logs it and replaces it with a fixed user-facing message.
//!
//! * [`InputError`] — **Loading**: the CLI could not turn its argument into a
//!   candidate file (path missing, download failed).

use std::path::PathBuf;
use thiserror::Error;

/// Problems the front-end reports locally, without contacting the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The trigger was pressed with no file selected.
    #[error("Por favor, selecione um arquivo PDF para analisar.")]
    NoFileSelected,

    /// The candidate file does not declare the PDF media type.
    #[error("Apenas arquivos PDF são permitidos ('{name}' tem tipo '{media_type}').")]
    NotAPdf { name: String, media_type: String },
}

/// Every way a single analysis attempt can fail.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    // ── Configuration ─────────────────────────────────────────────────────
    /// No API key was supplied; raised before any network activity.
    #[error("API key for Gemini is not configured.\nSet GEMINI_API_KEY or pass --api-key.")]
    MissingCredential,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Service ───────────────────────────────────────────────────────────
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request to the analysis service failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    #[error("Analysis service returned HTTP {status}: {message}")]
    ApiStatus { status: u16, message: String },

    /// The body was not the JSON shape we expect.
    #[error("Malformed response from analysis service: {0}")]
    MalformedResponse(String),

    /// The response parsed but contained no generated text.
    #[error("Analysis service returned no text")]
    EmptyResponse,

    /// The prompt or document was refused by the service's safety filter.
    #[error("Analysis service blocked the request: {reason}")]
    Blocked { reason: String },

    /// The call exceeded the configured timeout.
    #[error("Analysis timed out after {secs}s")]
    Timeout { secs: u64 },

    // ── Caller ────────────────────────────────────────────────────────────
    /// The caller cancelled the attempt before it completed.
    #[error("Analysis cancelled")]
    Cancelled,
}

impl AnalyzerError {
    /// True for failures that originate in the configuration or the remote
    /// service, as opposed to a caller decision or a builder mistake.
    pub fn is_service_error(&self) -> bool {
        !matches!(self, Self::InvalidConfig(_) | Self::Cancelled)
    }
}

/// Failures while loading a candidate file from a path or URL.
#[derive(Debug, Error)]
pub enum InputError {
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Reading the file failed for another reason.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },
}
