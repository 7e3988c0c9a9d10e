//! Observer trait for state-machine transitions.
//!
//! Inject an [`Arc<dyn StateObserver>`] via [`crate::App::with_observer`] to
//! mirror the application state in a front-end: a terminal spinner, a GUI
//! banner, a log line. The library knows nothing about how the host displays
//! things; it only reports what changed.
//!
//! # Example
//!
//! ```rust
//! use laudo_analyzer::{App, StateObserver};
//! use std::sync::Arc;
//!
//! struct Banner;
//!
//! impl StateObserver for Banner {
//!     fn on_analysis_failed(&self, _name: &str, message: &str) {
//!         eprintln!("{message}");
//!     }
//! }
//!
//! let app = App::with_observer(Arc::new(Banner));
//! assert!(!app.trigger_enabled());
//! ```

use std::sync::Arc;

/// Called by [`crate::App`] after each transition.
///
/// All methods default to no-ops so implementations override only what they
/// display. `Send + Sync` so an observer can be shared with a spinner thread.
pub trait StateObserver: Send + Sync {
    /// A PDF was accepted and is now the selected file.
    fn on_file_selected(&self, name: &str) {
        let _ = name;
    }

    /// The selection was cleared without a rejection.
    fn on_file_cleared(&self) {}

    /// A candidate was refused (wrong media type).
    fn on_file_rejected(&self, reason: &str) {
        let _ = reason;
    }

    /// A short instructional message should be shown (e.g. no file selected).
    fn on_notice(&self, message: &str) {
        let _ = message;
    }

    /// An analysis request is about to be sent.
    fn on_analysis_start(&self, name: &str) {
        let _ = name;
    }

    /// The analysis succeeded.
    ///
    /// `len` is the length of the returned text in bytes.
    fn on_analysis_complete(&self, name: &str, len: usize) {
        let _ = (name, len);
    }

    /// The analysis failed; `message` is the fixed user-facing text.
    fn on_analysis_failed(&self, name: &str, message: &str) {
        let _ = (name, message);
    }

    /// The in-flight analysis was cancelled by the user.
    fn on_analysis_cancelled(&self, name: &str) {
        let _ = name;
    }
}

/// Observer that ignores every event. The default for [`crate::App::new`].
pub struct NoopObserver;

impl StateObserver for NoopObserver {}

/// Convenience alias for the type stored in [`crate::App`].
pub type SharedObserver = Arc<dyn StateObserver>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_observer_does_not_panic() {
        let o = NoopObserver;
        o.on_file_selected("a.pdf");
        o.on_file_cleared();
        o.on_file_rejected("png");
        o.on_notice("hi");
        o.on_analysis_start("a.pdf");
        o.on_analysis_complete("a.pdf", 10);
        o.on_analysis_failed("a.pdf", "erro");
        o.on_analysis_cancelled("a.pdf");
    }

    #[test]
    fn arc_dyn_observer_works() {
        let o: SharedObserver = Arc::new(NoopObserver);
        o.on_analysis_start("a.pdf");
    }
}
