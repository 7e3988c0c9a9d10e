//! # laudo-analyzer
//!
//! Analyse Brazilian occupational-health expert reports (*laudos periciais de
//! insalubridade*) with Google Gemini and render the answer as HTML.
//!
//! ## How it works
//!
//! The whole PDF is sent inline, base64-encoded, together with one fixed
//! Portuguese prompt. The model answers in a six-section Markdown structure
//! aimed at the defence of the employer: process summary, claimant duties,
//! hazardous agents, weak points of the report, technical rebuttal and
//! supplementary questions for the expert.
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Intake    accept application/pdf only
//!  ├─ 2. State     Idle → FileSelected → Analyzing → Succeeded | Failed
//!  ├─ 3. Request   base64 document + fixed prompt, one call, no retries
//!  └─ 4. Render    escape, then ###, **, - and line breaks → HTML
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use laudo_analyzer::{render, Analyzer, AnalyzerConfig, App, CandidateFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalyzerConfig::builder()
//!         .maybe_api_key(std::env::var("GEMINI_API_KEY").ok())
//!         .build()?;
//!     let analyzer = Analyzer::new(config)?;
//!
//!     let mut app = App::new();
//!     let bytes = std::fs::read("laudo.pdf")?;
//!     app.offer(Some(CandidateFile::new("laudo.pdf", "application/pdf", bytes)));
//!     app.run_analysis(&analyzer).await;
//!
//!     if let Some(text) = app.state().result() {
//!         println!("{}", render(text));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `laudo` binary (clap + anyhow + tracing-subscriber + indicatif + dotenvy) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! laudo-analyzer = { version = "0.1", default-features = false }
//! ```
//!
//! The library never reads environment variables: the API key reaches it
//! only through [`AnalyzerConfig`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod observer;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod state;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::Analyzer;
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{AnalyzerError, InputError, ValidationError};
pub use observer::{NoopObserver, SharedObserver, StateObserver};
pub use output::{AnalysisOutput, OutputFormat};
pub use pipeline::gemini::{AnalysisService, GeminiClient};
pub use pipeline::input::load_candidate;
pub use pipeline::intake::{validate, CandidateFile, FileIntake, SelectedFile, PDF_MEDIA_TYPE};
pub use pipeline::render::{render, render_document};
pub use pipeline::request::AnalysisRequest;
pub use prompts::ANALYSIS_PROMPT;
pub use report::{AnalysisReport, ReportSection};
pub use state::{
    AnalysisTicket, App, UiState, GENERIC_FAILURE_MESSAGE, INVALID_FILE_MESSAGE, NO_FILE_MESSAGE,
};
