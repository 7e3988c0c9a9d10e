//! Pipeline stages between a user's file and the rendered analysis.
//!
//! Each submodule does one step and is tested on its own. Only [`gemini`]
//! touches the network on the analysis path; [`input`] may download when the
//! CLI is given a URL.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ intake ──▶ encode ──▶ request ──▶ gemini ──▶ render
//! (path/URL) (PDF only)  (base64)  (doc+prompt)  (HTTP)    (HTML)
//! ```
//!
//! 1. [`input`]   — read a path or download a URL, declare a media type
//! 2. [`intake`]  — accept exactly `application/pdf`, track the drop zone
//! 3. [`encode`]  — base64 the document bytes
//! 4. [`request`] — pair the document with the fixed prompt, build wire JSON
//! 5. [`gemini`]  — one `generateContent` call, text out
//! 6. [`render`]  — escape, then turn headings, bold and list items into HTML

pub mod encode;
pub mod gemini;
pub mod input;
pub mod intake;
pub mod render;
pub mod request;
