//! The analysis request and its `generateContent` JSON body.
//!
//! ## Part Layout
//!
//! The body carries exactly one user turn with two parts, in this order:
//! 1. **Inline data** — the PDF as base64, tagged `application/pdf`
//! 2. **Text** — [`ANALYSIS_PROMPT`], identical for every request
//!
//! Document first, instruction second: the prompt refers to "o documento PDF
//! em anexo", so the model sees the attachment before the words about it.

use crate::pipeline::encode::strip_data_url_prefix;
use crate::pipeline::intake::PDF_MEDIA_TYPE;
use crate::prompts::ANALYSIS_PROMPT;
use serde::Serialize;

/// One analysis attempt: encoded document, fixed prompt, model id.
///
/// Fields are private so the request cannot change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    model: String,
    payload: String,
}

impl AnalysisRequest {
    /// Pair an encoded document with the fixed prompt.
    ///
    /// Any `data:` URL header on `encoded_document` is discarded.
    pub fn new(model: impl Into<String>, encoded_document: &str) -> Self {
        Self {
            model: model.into(),
            payload: strip_data_url_prefix(encoded_document).to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Base64 document payload, without any data-URL header.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn media_type(&self) -> &'static str {
        PDF_MEDIA_TYPE
    }

    pub fn prompt(&self) -> &'static str {
        ANALYSIS_PROMPT
    }

    /// Borrowing view of the request as the Gemini JSON body.
    pub fn to_wire(&self) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::InlineData(InlineData {
                        mime_type: self.media_type(),
                        data: &self.payload,
                    }),
                    Part::Text(self.prompt()),
                ],
            }],
        }
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'a str,
    pub parts: Vec<Part<'a>>,
}

/// A content part; serialises as `{"inlineData": {...}}` or `{"text": "..."}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part<'a> {
    InlineData(InlineData<'a>),
    Text(&'a str),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}
