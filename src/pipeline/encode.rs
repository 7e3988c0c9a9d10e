//! Document encoding: raw PDF bytes → base64 payload for the JSON body.
//!
//! Gemini accepts binary parts as standard-alphabet base64 strings with no
//! `data:` URL prefix. Encoders that go through a data URL (browsers do)
//! produce `data:application/pdf;base64,<payload>`, so the prefix is
//! stripped whenever present.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Encode document bytes as a transport-safe base64 payload.
pub fn encode_document(bytes: &[u8]) -> String {
    let b64 = STANDARD.encode(bytes);
    debug!("Encoded document {} bytes → {} bytes base64", bytes.len(), b64.len());
    b64
}

/// Remove a leading `data:<mime>;base64,` header, keeping only the payload.
///
/// Strings without a data-URL header are returned unchanged.
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    if !encoded.starts_with("data:") {
        return encoded;
    }
    match encoded.split_once(',') {
        Some((_, payload)) => payload,
        None => encoded,
    }
}
