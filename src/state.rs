//! Application state machine: idle → file selected → analyzing → result.
//!
//! [`App`] owns the single [`UiState`] and is the only place transitions
//! happen. Front-ends feed it events (file offered, trigger pressed, result
//! arrived) and read the state back, or subscribe with a
//! [`StateObserver`].
//!
//! ## Attempts
//!
//! Each analysis gets an attempt id, carried in the [`AnalysisTicket`]
//! returned by [`App::begin_analysis`]. [`App::finish`] only applies a result
//! whose id matches the attempt currently in flight. Selecting another file
//! or cancelling retires the attempt, so a late answer for file A can never
//! be shown next to file B.

use crate::analyze::Analyzer;
use crate::error::{AnalyzerError, ValidationError};
use crate::observer::{NoopObserver, SharedObserver};
use crate::pipeline::intake::{CandidateFile, FileIntake, SelectedFile};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shown when the trigger is pressed with nothing selected.
pub const NO_FILE_MESSAGE: &str = "Por favor, selecione um arquivo PDF para analisar.";

/// Shown when a non-PDF is offered. The detailed rejection is logged.
pub const INVALID_FILE_MESSAGE: &str = "Apenas arquivos PDF são permitidos.";

/// Shown in place of any analysis failure. The underlying error is logged.
pub const GENERIC_FAILURE_MESSAGE: &str = "Ocorreu um erro ao analisar o documento. Verifique o console para mais detalhes e certifique-se que sua API key está configurada.";

/// What the user is looking at. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    FileSelected(SelectedFile),
    Analyzing(SelectedFile),
    Succeeded { file: SelectedFile, result: String },
    Failed { file: SelectedFile, message: String },
}

impl UiState {
    /// The file this state refers to, if any.
    pub fn file(&self) -> Option<&SelectedFile> {
        match self {
            UiState::Idle => None,
            UiState::FileSelected(f) | UiState::Analyzing(f) => Some(f),
            UiState::Succeeded { file, .. } | UiState::Failed { file, .. } => Some(file),
        }
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            UiState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, UiState::Analyzing(_))
    }

    /// Short lowercase label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::FileSelected(_) => "file-selected",
            UiState::Analyzing(_) => "analyzing",
            UiState::Succeeded { .. } => "succeeded",
            UiState::Failed { .. } => "failed",
        }
    }
}

/// Proof that an analysis was started; hand it back to [`App::finish`].
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    attempt: u64,
    file: SelectedFile,
}

impl AnalysisTicket {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn file(&self) -> &SelectedFile {
        &self.file
    }
}

/// The top-level controller.
pub struct App {
    state: UiState,
    intake: FileIntake,
    notice: Option<String>,
    last_attempt: u64,
    in_flight: Option<u64>,
    observer: SharedObserver,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("intake", &self.intake)
            .field("notice", &self.notice)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_observer(Arc::new(NoopObserver))
    }

    pub fn with_observer(observer: SharedObserver) -> Self {
        Self {
            state: UiState::Idle,
            intake: FileIntake::new(),
            notice: None,
            last_attempt: 0,
            in_flight: None,
            observer,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn intake(&self) -> &FileIntake {
        &self.intake
    }

    /// Instructional message for the user (validation, rejected file).
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the trigger control is enabled.
    ///
    /// Enabled whenever a file is held and no analysis is running.
    pub fn trigger_enabled(&self) -> bool {
        matches!(
            self.state,
            UiState::FileSelected(_) | UiState::Succeeded { .. } | UiState::Failed { .. }
        )
    }

    // ── Intake events ───────────────────────────────────────────────────

    pub fn drag_enter(&mut self) {
        self.intake.drag_enter();
    }

    pub fn drag_leave(&mut self) {
        self.intake.drag_leave();
    }

    /// Files dropped on the drop zone (only the first is used).
    pub fn drop_files(&mut self, files: Vec<CandidateFile>) {
        if let Some(accepted) = self.intake.drop_files(files) {
            self.apply_intake(accepted);
        }
    }

    /// Files chosen in the picker (only the first is used; none = cancelled).
    pub fn pick(&mut self, files: Vec<CandidateFile>) {
        if let Some(accepted) = self.intake.pick(files) {
            self.apply_intake(accepted);
        }
    }

    /// Run a candidate (or its absence) through intake and select the result.
    pub fn offer(&mut self, candidate: Option<CandidateFile>) {
        let accepted = self.intake.handle(candidate);
        self.apply_intake(accepted);
    }

    /// Make `file` the current selection, or clear it with `None`.
    ///
    /// Any displayed result, error or notice is cleared, and any analysis in
    /// flight is retired.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        let cleared = file.is_none();
        self.set_selection(file);
        if cleared {
            self.observer.on_file_cleared();
        }
    }

    /// A rejected candidate clears the selection but reports a rejection,
    /// never a plain clear.
    fn apply_intake(&mut self, accepted: Option<SelectedFile>) {
        match self.intake.last_rejection().map(ToString::to_string) {
            Some(reason) => {
                self.set_selection(None);
                warn!("{}", reason);
                self.observer.on_file_rejected(&reason);
                self.set_notice(INVALID_FILE_MESSAGE.to_string());
            }
            None => self.select_file(accepted),
        }
    }

    fn set_selection(&mut self, file: Option<SelectedFile>) {
        if let Some(attempt) = self.in_flight.take() {
            debug!("Retiring attempt {} after new selection", attempt);
        }
        self.notice = None;
        match file {
            Some(f) => {
                info!("Selected '{}'", f.name());
                self.observer.on_file_selected(f.name());
                self.state = UiState::FileSelected(f);
            }
            None => {
                debug!("Selection cleared");
                self.state = UiState::Idle;
            }
        }
    }

    // ── Analysis events ─────────────────────────────────────────────────

    /// Press the trigger.
    ///
    /// - no file: state unchanged, "select a file" notice, `None`
    /// - analysis running: inert, `None`
    /// - otherwise: enters `Analyzing`, clears the previous result or error
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        let file = match &self.state {
            UiState::Idle => {
                debug!("Trigger refused: {}", ValidationError::NoFileSelected);
                self.set_notice(NO_FILE_MESSAGE.to_string());
                return None;
            }
            UiState::Analyzing(_) => {
                debug!("Trigger ignored: analysis already in flight");
                return None;
            }
            UiState::FileSelected(f) => f.clone(),
            UiState::Succeeded { file, .. } | UiState::Failed { file, .. } => file.clone(),
        };

        self.notice = None;
        self.last_attempt += 1;
        self.in_flight = Some(self.last_attempt);
        self.observer.on_analysis_start(file.name());
        self.state = UiState::Analyzing(file.clone());

        Some(AnalysisTicket {
            attempt: self.last_attempt,
            file,
        })
    }

    /// Apply the outcome of an attempt.
    ///
    /// Returns `false` when the ticket is stale (the user moved on) and the
    /// outcome was discarded.
    pub fn finish(&mut self, ticket: AnalysisTicket, outcome: Result<String, AnalyzerError>) -> bool {
        if self.in_flight != Some(ticket.attempt) {
            debug!(
                "Discarding outcome of stale attempt {} for '{}'",
                ticket.attempt,
                ticket.file.name()
            );
            return false;
        }
        self.in_flight = None;
        let file = ticket.file;

        match outcome {
            Ok(result) => {
                info!("Analysis of '{}' succeeded ({} chars)", file.name(), result.len());
                self.observer.on_analysis_complete(file.name(), result.len());
                self.state = UiState::Succeeded { file, result };
            }
            Err(AnalyzerError::Cancelled) => {
                info!("Analysis of '{}' cancelled", file.name());
                self.observer.on_analysis_cancelled(file.name());
                self.state = UiState::FileSelected(file);
            }
            Err(e) => {
                error!("Analysis of '{}' failed: {}", file.name(), e);
                self.observer
                    .on_analysis_failed(file.name(), GENERIC_FAILURE_MESSAGE);
                self.state = UiState::Failed {
                    file,
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                };
            }
        }
        true
    }

    /// Cancel the analysis in flight, returning to `FileSelected`.
    ///
    /// Returns `false` when nothing was running.
    pub fn cancel(&mut self) -> bool {
        let UiState::Analyzing(file) = &self.state else {
            return false;
        };
        let ticket = AnalysisTicket {
            attempt: self.in_flight.unwrap_or(self.last_attempt),
            file: file.clone(),
        };
        self.finish(ticket, Err(AnalyzerError::Cancelled))
    }

    /// Trigger, analyse and record the outcome in one step.
    ///
    /// Returns `false` if the trigger was refused (no file, already running).
    pub async fn run_analysis(&mut self, analyzer: &Analyzer) -> bool {
        self.run_analysis_until(analyzer, std::future::pending()).await
    }

    /// [`App::run_analysis`], cancelled when `cancel` completes.
    pub async fn run_analysis_until<C>(&mut self, analyzer: &Analyzer, cancel: C) -> bool
    where
        C: Future<Output = ()>,
    {
        let Some(ticket) = self.begin_analysis() else {
            return false;
        };
        let outcome = analyzer.analyze_until(ticket.file(), cancel).await;
        self.finish(ticket, outcome)
    }

    fn set_notice(&mut self, message: String) {
        self.observer.on_notice(&message);
        self.notice = Some(message);
    }
}
