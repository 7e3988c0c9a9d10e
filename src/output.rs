//! Output formats for a finished analysis.

use crate::pipeline::render::{render, render_document};
use crate::report::AnalysisReport;
use serde::Serialize;

/// How a successful analysis is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// HTML fragment as shown in the results panel.
    #[default]
    Html,
    /// Standalone HTML page.
    HtmlPage,
    /// The model's text, untouched.
    Markdown,
    /// [`AnalysisOutput`] as pretty JSON.
    Json,
}

/// Everything known about one successful analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutput {
    pub file_name: String,
    pub model: String,
    /// Verbatim service answer.
    pub markdown: String,
    /// Rendered HTML fragment.
    pub html: String,
    pub report: AnalysisReport,
    pub duration_ms: u64,
}

impl AnalysisOutput {
    pub fn new(
        file_name: impl Into<String>,
        model: impl Into<String>,
        markdown: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        let markdown = markdown.into();
        Self {
            file_name: file_name.into(),
            model: model.into(),
            html: render(&markdown),
            report: AnalysisReport::parse(&markdown),
            markdown,
            duration_ms,
        }
    }

    /// Serialise in `format`. Every format except JSON ends with a newline.
    pub fn format(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        let mut out = match format {
            OutputFormat::Html => self.html.clone(),
            OutputFormat::HtmlPage => {
                render_document(&self.markdown, &format!("Análise – {}", self.file_name))
            }
            OutputFormat::Markdown => self.markdown.clone(),
            OutputFormat::Json => return serde_json::to_string_pretty(self),
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}
