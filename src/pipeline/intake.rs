//! File intake: accept a PDF from a picker or a drop, reject anything else.
//!
//! Validation looks only at the media type the platform declared for the
//! file (`File.type` in a browser, [`crate::pipeline::input`] on the CLI).
//! There is no extension or content sniffing here; a file is a PDF iff its
//! declared type is exactly `application/pdf`.

use crate::error::ValidationError;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The only media type File Intake accepts.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file offered by the user, not yet validated.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    /// Declared media type; empty when the platform could not tell.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A validated PDF held in memory for the lifetime of one selection.
///
/// Cloning is cheap: the document bytes are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Validate a single candidate.
pub fn validate(candidate: CandidateFile) -> Result<SelectedFile, ValidationError> {
    if candidate.media_type == PDF_MEDIA_TYPE {
        Ok(SelectedFile {
            name: candidate.name,
            bytes: Arc::from(candidate.bytes),
        })
    } else {
        Err(ValidationError::NotAPdf {
            name: candidate.name,
            media_type: candidate.media_type,
        })
    }
}

/// Local state of the drop zone: highlight flag and displayed file name.
#[derive(Debug, Default)]
pub struct FileIntake {
    dragging: bool,
    selected_name: Option<String>,
    last_rejection: Option<ValidationError>,
}

impl FileIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name shown under the drop zone, if a PDF is selected.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected_name.as_deref()
    }

    /// Whether a drag is hovering over the drop zone.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Why the most recent candidate was refused, if it was.
    pub fn last_rejection(&self) -> Option<&ValidationError> {
        self.last_rejection.as_ref()
    }

    pub fn drag_enter(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Files dropped on the zone. Only the first one is considered; an empty
    /// drop changes nothing apart from clearing the highlight.
    ///
    /// Returns `None` when the drop carried no files, otherwise the outcome
    /// of [`FileIntake::handle`] (itself an `Option`).
    pub fn drop_files(&mut self, files: Vec<CandidateFile>) -> Option<Option<SelectedFile>> {
        self.dragging = false;
        self.pick(files)
    }

    /// Files chosen in the picker. A cancelled picker (no files) is ignored.
    pub fn pick(&mut self, files: Vec<CandidateFile>) -> Option<Option<SelectedFile>> {
        let first = files.into_iter().next()?;
        Some(self.handle(Some(first)))
    }

    /// Validate a candidate (or its absence) and update the displayed name.
    ///
    /// Returns the accepted file, or `None` for an invalid or absent file.
    pub fn handle(&mut self, candidate: Option<CandidateFile>) -> Option<SelectedFile> {
        let Some(candidate) = candidate else {
            self.selected_name = None;
            self.last_rejection = None;
            return None;
        };

        match validate(candidate) {
            Ok(file) => {
                debug!("Accepted PDF '{}' ({} bytes)", file.name(), file.len());
                self.selected_name = Some(file.name().to_string());
                self.last_rejection = None;
                Some(file)
            }
            Err(e) => {
                debug!("Rejected candidate: {}", e);
                self.selected_name = None;
                self.last_rejection = Some(e);
                None
            }
        }
    }
}
