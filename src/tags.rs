//! Per-record tag editing.
//!
//! An explicit two-mode machine with the free-text buffer as state-local
//! data: `Viewing` shows badges, `Editing` holds the buffer. A third,
//! transient `Saving` mode covers the in-flight write so a second save
//! cannot start while one is pending; a failed save drops back to `Editing`
//! with the buffer intact, so no typed input is ever lost.
//!
//! System-generated tags never pass through here; only `custom_tags` are
//! written, and the server's returned record is adopted wholesale on success.

use serde::Serialize;

/// Canonical tag-buffer normalization: split on commas, trim surrounding
/// whitespace, drop pieces that are empty after trimming. Order preserved,
/// no de-duplication — `"sales, urgent, sales"` stays three entries.
pub fn parse_tag_buffer(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEditor {
    Viewing,
    Editing { buffer: String },
    Saving { buffer: String },
}

/// Editor snapshot for rendering. `editing` stays true while a save is in
/// flight so the textarea (and its content) remains on screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagEditorView {
    pub editing: bool,
    pub saving: bool,
    pub buffer: Option<String>,
}

impl Default for TagEditor {
    fn default() -> Self {
        TagEditor::Viewing
    }
}

impl TagEditor {
    /// Enter edit mode, seeding the buffer with the current custom tags as a
    /// comma-delimited string in set order. No-op unless currently viewing.
    pub fn begin(&mut self, current_tags: &[String]) {
        if matches!(self, TagEditor::Viewing) {
            *self = TagEditor::Editing {
                buffer: current_tags.join(", "),
            };
        }
    }

    /// Replace the buffer text. Returns false when not in edit mode.
    pub fn set_buffer(&mut self, text: String) -> bool {
        match self {
            TagEditor::Editing { buffer } => {
                *buffer = text;
                true
            }
            _ => false,
        }
    }

    /// Start a save: parse the buffer and move to `Saving`.
    ///
    /// Returns the parsed tag list to send, or `None` when there is no edit
    /// in progress (or one is already being saved).
    pub fn begin_save(&mut self) -> Option<Vec<String>> {
        match self {
            TagEditor::Editing { buffer } => {
                let parsed = parse_tag_buffer(buffer);
                let buffer = std::mem::take(buffer);
                *self = TagEditor::Saving { buffer };
                Some(parsed)
            }
            _ => None,
        }
    }

    /// The write was confirmed; back to viewing. The caller is responsible
    /// for adopting the server's returned record.
    pub fn save_succeeded(&mut self) {
        *self = TagEditor::Viewing;
    }

    /// The write failed; remain in edit mode with the buffer intact.
    pub fn save_failed(&mut self) {
        if let TagEditor::Saving { buffer } = self {
            let buffer = std::mem::take(buffer);
            *self = TagEditor::Editing { buffer };
        }
    }

    pub fn view(&self) -> TagEditorView {
        match self {
            TagEditor::Viewing => TagEditorView {
                editing: false,
                saving: false,
                buffer: None,
            },
            TagEditor::Editing { buffer } => TagEditorView {
                editing: true,
                saving: false,
                buffer: Some(buffer.clone()),
            },
            TagEditor::Saving { buffer } => TagEditorView {
                editing: true,
                saving: true,
                buffer: Some(buffer.clone()),
            },
        }
    }
}
