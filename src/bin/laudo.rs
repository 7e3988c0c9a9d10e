//! CLI binary for laudo-analyzer.
//!
//! A thin shim over the library crate: loads the input, drives the state
//! machine once and writes the result.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use laudo_analyzer::{
    load_candidate, AnalysisOutput, AnalysisReport, Analyzer, AnalyzerConfig, App, NoopObserver, OutputFormat,
    SharedObserver, StateObserver, UiState, DEFAULT_MODEL,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── Spinner observer using indicatif ─────────────────────────────────────────

/// Shows a spinner while the analysis runs and one status line per outcome.
struct SpinnerObserver {
    bar: ProgressBar,
    started: std::sync::Mutex<Option<Instant>>,
}

impl SpinnerObserver {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::hidden();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);

        Arc::new(Self {
            bar,
            started: std::sync::Mutex::new(None),
        })
    }

    fn elapsed(&self) -> String {
        let secs = self
            .started
            .lock()
            .ok()
            .and_then(|s| s.map(|t| t.elapsed().as_secs_f64()))
            .unwrap_or(0.0);
        format!("{secs:.1}s")
    }
}

impl StateObserver for SpinnerObserver {
    fn on_file_selected(&self, name: &str) {
        eprintln!("{} {}", cyan("◆"), bold(name));
    }

    fn on_file_rejected(&self, reason: &str) {
        eprintln!("{} {}", red("✘"), reason);
    }

    fn on_analysis_start(&self, name: &str) {
        if let Ok(mut s) = self.started.lock() {
            *s = Some(Instant::now());
        }
        self.bar.set_draw_target(ProgressDrawTarget::stderr());
        self.bar.set_prefix("Analisando");
        self.bar.set_message(name.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_analysis_complete(&self, _name: &str, len: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} análise concluída  {}  {}",
            green("✔"),
            dim(&format!("{len} bytes")),
            dim(&self.elapsed())
        );
    }

    fn on_analysis_failed(&self, _name: &str, _message: &str) {
        self.bar.finish_and_clear();
        eprintln!("{} análise falhou  {}", red("✘"), dim(&self.elapsed()));
    }

    fn on_analysis_cancelled(&self, _name: &str) {
        self.bar.finish_and_clear();
        eprintln!("{} análise cancelada", cyan("⚠"));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Analyse a report, print the HTML fragment
  laudo laudo.pdf

  # Standalone HTML page
  laudo laudo.pdf --format html-page -o analise.html

  # Raw Markdown answer
  laudo laudo.pdf --format markdown

  # JSON with the six sections split out
  laudo laudo.pdf --format json > analise.json

  # From a URL
  laudo https://example.com/processo/laudo.pdf

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY    Google Gemini API key
  API_KEY           Fallback API key variable
  LAUDO_MODEL       Override model ID
  RUST_LOG          Override log filter (e.g. laudo_analyzer=debug)

A .env file in the working directory is loaded before flags are read.
"#;

/// Analyse occupational-health expert reports (PDF) with Google Gemini.
#[derive(Parser, Debug)]
#[command(
    name = "laudo",
    version,
    about = "Analyse occupational-health expert reports (PDF) with Google Gemini",
    long_about = "Send a PDF expert report (laudo pericial de insalubridade) to Google Gemini \
with a fixed analysis prompt and print the six-section answer as HTML, Markdown or JSON.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Write the result to this file instead of stdout.
    #[arg(short, long, env = "LAUDO_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, env = "LAUDO_FORMAT", value_enum, default_value = "html")]
    format: FormatArg,

    /// Gemini model ID.
    #[arg(long, env = "LAUDO_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Gemini API key (falls back to API_KEY).
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API root URL.
    #[arg(long, env = "LAUDO_BASE_URL")]
    base_url: Option<String>,

    /// Analysis call timeout in seconds.
    #[arg(long, env = "LAUDO_API_TIMEOUT", default_value_t = 300)]
    api_timeout: u64,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "LAUDO_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Disable the spinner.
    #[arg(long, env = "LAUDO_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "LAUDO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "LAUDO_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Html,
    HtmlPage,
    Markdown,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::HtmlPage => OutputFormat::HtmlPage,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Must run before parsing so `.env` values feed clap's env fallbacks.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // INFO logs would tear the spinner; keep them off while it is shown.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Load input ───────────────────────────────────────────────────────
    let candidate = load_candidate(&cli.input, cli.download_timeout)
        .await
        .with_context(|| format!("Failed to load '{}'", cli.input))?;

    // ── Build analyzer ───────────────────────────────────────────────────
    let config = build_config(&cli)?;
    let model = config.model.clone();
    let analyzer = Analyzer::new(config).context("Failed to create HTTP client")?;

    let observer: SharedObserver = if show_progress {
        SpinnerObserver::new() as SharedObserver
    } else {
        Arc::new(NoopObserver)
    };
    let mut app = App::with_observer(observer);

    app.offer(Some(candidate));
    if let Some(notice) = app.notice() {
        eprintln!("{}", red(notice));
        return Ok(ExitCode::FAILURE);
    }

    // ── Run analysis (Ctrl-C cancels) ────────────────────────────────────
    let start = Instant::now();
    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    app.run_analysis_until(&analyzer, cancel).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match app.state() {
        UiState::Succeeded { file, result } => {
            let output = AnalysisOutput::new(file.name(), model, result.as_str(), duration_ms);
            let text = output
                .format(cli.format.into())
                .context("Failed to serialise output")?;
            write_output(&text, cli.output.as_ref())?;

            if !cli.quiet && !show_progress {
                eprintln!("Analysed '{}' in {}ms", file.name(), duration_ms);
            }
            // Printed directly: the log filter is `error` while the spinner runs.
            if let (Some(line), false) = (missing_sections_line(&output.report), cli.quiet) {
                eprintln!("{line}");
            }
            if let (Some(path), false) = (&cli.output, cli.quiet) {
                eprintln!("{}  →  {}", green("✔"), bold(&path.display().to_string()));
            }
            Ok(ExitCode::SUCCESS)
        }
        UiState::Failed { message, .. } => {
            eprintln!("{}", red(message));
            Ok(ExitCode::FAILURE)
        }
        // Cancelled: back to FileSelected.
        _ => Ok(ExitCode::from(130)),
    }
}

/// Map CLI args to `AnalyzerConfig`.
fn build_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("API_KEY").ok());

    let mut builder = AnalyzerConfig::builder()
        .maybe_api_key(api_key)
        .model(cli.model.clone())
        .api_timeout_secs(cli.api_timeout);

    if let Some(ref url) = cli.base_url {
        builder = builder.base_url(url.clone());
    }

    builder.build().context("Invalid configuration")
}

/// Status line for an answer lacking some of the six sections.
fn missing_sections_line(report: &AnalysisReport) -> Option<String> {
    if report.is_complete() {
        return None;
    }
    Some(format!(
        "{} resposta sem as seções {}",
        cyan("⚠"),
        bold(&format!("{:?}", report.missing()))
    ))
}

fn write_output(text: &str, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, text)
            .with_context(|| format!("Failed to write output to {:?}", p)),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")
        }
    }
}
