//! Upload intake state machine.
//!
//! Drives the drag/drop + file-picker surface:
//!
//! ```text
//! Idle <-> Dragging          (drag hover, purely cosmetic)
//! Idle/Dragging -> Uploading (drop or pick with a valid file)
//! Uploading -> Idle          (on success or failure)
//! ```
//!
//! An error banner is tracked independently of the phase and cleared at the
//! start of the next attempt. Validation runs synchronously before any I/O;
//! an invalid file never produces a network call. While an upload is in
//! flight, further file intake is ignored (single upload at a time).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Banner text for a file that fails client-side validation.
pub const INVALID_FILE_MESSAGE: &str = "Please upload a WAV or MP3 file.";
/// Banner text for a service failure. Generic on purpose: the service does
/// not interpret backend failures, and neither does the banner.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";

/// A file offered by the webview via drop or the file picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferedFile {
    pub name: String,
    /// Declared media type, when the drop event carried one.
    #[serde(default)]
    pub media_type: Option<String>,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPhase {
    Idle,
    Dragging,
    Uploading,
}

/// What the controller decided to do with an intake event.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeDecision {
    /// Valid file accepted; the controller is now `Uploading` and the caller
    /// must drive the service call and report back via [`UploadController::finish`].
    Accepted(OfferedFile),
    /// File failed validation; error banner set, no network call.
    Rejected,
    /// Empty event, or an upload already in flight. No state change.
    Ignored,
}

/// Snapshot of the upload surface for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadView {
    pub phase: UploadPhase,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct UploadController {
    phase: UploadPhase,
    error: Option<String>,
}

impl Default for UploadController {
    fn default() -> Self {
        UploadController {
            phase: UploadPhase::Idle,
            error: None,
        }
    }
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// Drag hover entered the drop surface. Cosmetic only: no validation,
    /// no network call, and ignored while an upload is in flight.
    pub fn drag_enter(&mut self) {
        if self.phase != UploadPhase::Uploading {
            self.phase = UploadPhase::Dragging;
        }
    }

    /// Drag hover left the drop surface.
    pub fn drag_leave(&mut self) {
        if self.phase == UploadPhase::Dragging {
            self.phase = UploadPhase::Idle;
        }
    }

    /// Process a drop or manual file selection.
    ///
    /// Only the first file is considered even when several are supplied —
    /// a deliberate single-file MVP restriction, not a bug. A zero-file
    /// event is a no-op that leaves the current state untouched.
    pub fn offer(&mut self, files: &[OfferedFile]) -> IntakeDecision {
        if self.phase == UploadPhase::Uploading {
            return IntakeDecision::Ignored;
        }
        let Some(file) = files.first() else {
            return IntakeDecision::Ignored;
        };
        // The drop hover is over either way.
        self.phase = UploadPhase::Idle;

        if !is_valid_audio(&file.name, file.media_type.as_deref()) {
            log::info!("Rejected upload of {:?}: not an audio file", file.name);
            self.error = Some(INVALID_FILE_MESSAGE.to_string());
            return IntakeDecision::Rejected;
        }

        self.error = None;
        self.phase = UploadPhase::Uploading;
        IntakeDecision::Accepted(file.clone())
    }

    /// Record the outcome of the in-flight upload and return to `Idle`.
    pub fn finish(&mut self, outcome: Result<(), String>) {
        self.phase = UploadPhase::Idle;
        if let Err(message) = outcome {
            self.error = Some(message);
        }
    }

    /// Dismiss the inline error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn view(&self) -> UploadView {
        UploadView {
            phase: self.phase,
            error: self.error.clone(),
        }
    }
}

/// Client-side acceptance check: the declared media type indicates audio, or
/// the filename ends in `.mp3`/`.wav` (case-insensitive).
pub fn is_valid_audio(name: &str, media_type: Option<&str>) -> bool {
    if media_type.is_some_and(|m| m.contains("audio")) {
        return true;
    }
    let lower = name.to_lowercase();
    lower.ends_with(".mp3") || lower.ends_with(".wav")
}
