//! Integration tests: App + Analyzer + GeminiClient against a mock Gemini.
//!
//! Every request goes to a local `wiremock` server, so these run offline.
//! `live_analysis` at the bottom talks to the real API and is gated behind
//! `E2E_ENABLED` plus a PDF in `./test_cases/`.

use laudo_analyzer::{
    render, Analyzer, AnalyzerConfig, App, CandidateFile, UiState, GENERIC_FAILURE_MESSAGE,
    NO_FILE_MESSAGE, PDF_MEDIA_TYPE,
};
use serde_json::json;
use std::path::PathBuf;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────────

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn answer(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

/// `RUST_LOG=laudo_analyzer=debug cargo test` shows library logs per test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn analyzer_for(server: &MockServer) -> Analyzer {
    init_tracing();
    let config = assert_ok!(AnalyzerConfig::builder()
        .api_key("test-key")
        .base_url(server.uri())
        .api_timeout_secs(10)
        .build());
    assert_ok!(Analyzer::new(config))
}

fn pdf(name: &str, body: &[u8]) -> CandidateFile {
    CandidateFile::new(name, PDF_MEDIA_TYPE, body.to_vec())
}

// ── Offline flow ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn successful_analysis_renders_html() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [
                { "inlineData": { "mimeType": "application/pdf", "data": "JVBERi0xLjQ=" } }
            ]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer(
            "### 1. RESUMO DO PROCESSO E PARTICIPANTES\n- **Reclamante:** Fulano",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server);
    let mut app = App::new();
    app.offer(Some(pdf("laudo.pdf", b"%PDF-1.4")));
    assert!(app.trigger_enabled());

    assert!(app.run_analysis(&analyzer).await);

    let text = app.state().result().expect("succeeded");
    assert_eq!(
        text,
        "### 1. RESUMO DO PROCESSO E PARTICIPANTES\n- **Reclamante:** Fulano"
    );
    let html = render(text);
    assert!(html.contains("RESUMO DO PROCESSO E PARTICIPANTES</h3>"));
    assert!(html.contains("Reclamante:</strong> Fulano</li>"));
}

#[tokio::test]
async fn service_error_shows_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new();
    app.offer(Some(pdf("laudo.pdf", b"%PDF")));
    app.run_analysis(&analyzer_for(&server)).await;

    assert_eq!(app.state().error_message(), Some(GENERIC_FAILURE_MESSAGE));
    assert!(app.trigger_enabled(), "retry allowed after failure");
}

#[tokio::test]
async fn missing_key_never_reaches_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("x")))
        .expect(0)
        .mount(&server)
        .await;

    let config = assert_ok!(AnalyzerConfig::builder().base_url(server.uri()).build());
    let analyzer = assert_ok!(Analyzer::new(config));

    let mut app = App::new();
    app.offer(Some(pdf("laudo.pdf", b"%PDF")));
    app.run_analysis(&analyzer).await;

    assert!(matches!(app.state(), UiState::Failed { .. }));
}

#[tokio::test]
async fn trigger_without_file_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("x")))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = App::new();
    assert!(!app.run_analysis(&analyzer_for(&server)).await);
    assert_eq!(app.notice(), Some(NO_FILE_MESSAGE));
    assert_eq!(app.state(), &UiState::Idle);
}

#[tokio::test]
async fn selecting_b_clears_a_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("resultado A")))
        .mount(&server)
        .await;

    let mut app = App::new();
    app.offer(Some(pdf("a.pdf", b"%PDF-A")));
    app.run_analysis(&analyzer_for(&server)).await;
    assert_eq!(app.state().result(), Some("resultado A"));

    app.offer(Some(pdf("b.pdf", b"%PDF-B")));
    assert!(app.state().result().is_none());
    assert_eq!(app.intake().selected_name(), Some("b.pdf"));
}

#[tokio::test]
async fn non_pdf_is_refused_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer("x")))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = App::new();
    app.offer(Some(CandidateFile::new("foto.png", "image/png", vec![0x89, b'P'])));
    assert!(app.notice().is_some());
    assert!(!app.run_analysis(&analyzer_for(&server)).await);
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = assert_err!(AnalyzerConfig::builder().base_url("ftp://x").build());
    assert!(err.to_string().contains("http"));
}

// ── Live API (opt-in) ────────────────────────────────────────────────────────

fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_cases")
}

#[tokio::test]
async fn live_analysis() {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP — set E2E_ENABLED=1 to run live tests");
        return;
    }
    let file = test_cases_dir().join("laudo.pdf");
    let Ok(bytes) = std::fs::read(&file) else {
        println!("SKIP — test file not found: {}", file.display());
        return;
    };
    let Ok(key) = std::env::var("GEMINI_API_KEY") else {
        println!("SKIP — GEMINI_API_KEY not set");
        return;
    };

    let config = assert_ok!(AnalyzerConfig::builder().api_key(key).build());
    let analyzer = assert_ok!(Analyzer::new(config));
    let mut app = App::new();
    app.offer(Some(pdf("laudo.pdf", &bytes)));
    app.run_analysis(&analyzer).await;

    let text = app.state().result().expect("live analysis succeeded");
    assert!(text.contains("###"), "expected section headings, got: {text}");
}
