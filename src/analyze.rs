//! The analysis request builder.
//!
//! [`Analyzer::analyze`] turns one selected PDF into one service call:
//!
//! ```text
//! credential check ──▶ base64 encode ──▶ AnalysisRequest ──▶ service.generate
//!   (no network)                         (document + prompt)    (timeout-bounded)
//! ```
//!
//! A single attempt either returns the full text or fails. There are no
//! retries and no partial results.

use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::pipeline::encode::encode_document;
use crate::pipeline::gemini::{AnalysisService, GeminiClient};
use crate::pipeline::intake::SelectedFile;
use crate::pipeline::request::AnalysisRequest;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Builds and sends analysis requests.
#[derive(Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    service: Arc<dyn AnalysisService>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .field("service", &"<dyn AnalysisService>")
            .finish()
    }
}

impl Analyzer {
    /// An analyzer talking to Gemini at `config.base_url`.
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        let client = GeminiClient::new(config.base_url.clone())?;
        Ok(Self::with_service(config, Arc::new(client)))
    }

    /// An analyzer using a caller-supplied service (fakes, middleware).
    pub fn with_service(config: AnalyzerConfig, service: Arc<dyn AnalysisService>) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Build the request for `file` without sending it.
    pub fn build_request(&self, file: &SelectedFile) -> AnalysisRequest {
        let payload = encode_document(file.bytes());
        AnalysisRequest::new(self.config.model.clone(), &payload)
    }

    /// Analyse one document and return the generated text verbatim.
    ///
    /// # Errors
    /// - [`AnalyzerError::MissingCredential`] before any encoding or I/O
    /// - [`AnalyzerError::Timeout`] when the call exceeds `api_timeout_secs`
    /// - any service error from the underlying [`AnalysisService`]
    pub async fn analyze(&self, file: &SelectedFile) -> Result<String, AnalyzerError> {
        let api_key = self
            .config
            .credential()
            .ok_or(AnalyzerError::MissingCredential)?;

        let start = Instant::now();
        info!(
            "Analysing '{}' ({} bytes) with {}",
            file.name(),
            file.len(),
            self.config.model
        );

        let request = self.build_request(file);
        let secs = self.config.api_timeout_secs;

        let text = tokio::time::timeout(
            Duration::from_secs(secs),
            self.service.generate(api_key, &request),
        )
        .await
        .map_err(|_| AnalyzerError::Timeout { secs })??;

        debug!(
            "Analysis of '{}' returned {} chars in {:?}",
            file.name(),
            text.len(),
            start.elapsed()
        );
        Ok(text)
    }

    /// [`Analyzer::analyze`], abandoned as soon as `cancel` completes.
    pub async fn analyze_until<C>(&self, file: &SelectedFile, cancel: C) -> Result<String, AnalyzerError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = self.analyze(file) => result,
            _ = cancel => {
                info!("Analysis of '{}' cancelled", file.name());
                Err(AnalyzerError::Cancelled)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{config, FakeService, Reply};
    use super::*;
    use crate::pipeline::intake::{validate, CandidateFile, PDF_MEDIA_TYPE};
    use crate::prompts::ANALYSIS_PROMPT;

    fn laudo() -> SelectedFile {
        validate(CandidateFile::new("laudo.pdf", PDF_MEDIA_TYPE, b"%PDF-1.7".to_vec())).unwrap()
    }

    #[tokio::test]
    async fn returns_text_verbatim() {
        let fake = FakeService::new(Reply::Text("  ### 1. RESUMO\n".into()));
        let analyzer = Analyzer::with_service(config(), fake.clone());
        let text = analyzer.analyze(&laudo()).await.unwrap();
        assert_eq!(text, "  ### 1. RESUMO\n");
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn sends_encoded_document_prompt_and_model() {
        let fake = FakeService::new(Reply::Text("ok".into()));
        let analyzer = Analyzer::with_service(config(), fake.clone());
        analyzer.analyze(&laudo()).await.unwrap();

        let seen = fake.seen.lock().unwrap();
        let (key, req) = &seen[0];
        assert_eq!(key, "fake-key");
        assert_eq!(req.model(), "gemini-2.5-flash");
        assert_eq!(req.payload(), "JVBERi0xLjc=");
        assert_eq!(req.media_type(), "application/pdf");
        assert_eq!(req.prompt(), ANALYSIS_PROMPT);
    }

    #[tokio::test]
    async fn missing_credential_fails_before_service() {
        let fake = FakeService::new(Reply::Text("never".into()));
        let cfg = AnalyzerConfig::builder().build().unwrap();
        let analyzer = Analyzer::with_service(cfg, fake.clone());
        let err = analyzer.analyze(&laudo()).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingCredential));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn service_failure_propagates() {
        let fake = FakeService::new(Reply::Fail(|| AnalyzerError::EmptyResponse));
        let analyzer = Analyzer::with_service(config(), fake);
        assert!(matches!(
            analyzer.analyze(&laudo()).await,
            Err(AnalyzerError::EmptyResponse)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_call_times_out() {
        let fake = FakeService::new(Reply::Hang);
        let analyzer = Analyzer::with_service(config(), fake);
        let err = analyzer.analyze(&laudo()).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Timeout { secs: 5 }));
    }

    #[tokio::test]
    async fn cancel_future_abandons_call() {
        let fake = FakeService::new(Reply::Hang);
        let analyzer = Analyzer::with_service(config(), fake);
        let err = analyzer
            .analyze_until(&laudo(), std::future::ready(()))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Cancelled));
    }
}
