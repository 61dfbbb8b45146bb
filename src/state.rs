//! Application state managed by Tauri.
//!
//! Two shared resources, with different ownership rules:
//! - the dashboard call list, replaced wholesale after an upload or reload
//!   (never patched in place, preventing partial-update races)
//! - per-record detail sessions: the record shown in a detail view plus its
//!   tag editor. Each session is owned by one view instance; edits on
//!   different records are independent.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::ApiClient;
use crate::error::UiError;
use crate::tags::TagEditor;
use crate::types::CallRecord;
use crate::upload::UploadController;

/// One call open in a detail view, with its tag-edit state.
#[derive(Debug)]
pub struct DetailSession {
    pub record: CallRecord,
    pub editor: TagEditor,
}

pub struct AppState {
    pub api: ApiClient,
    calls: Mutex<Vec<CallRecord>>,
    upload: Mutex<UploadController>,
    open_calls: Mutex<HashMap<i64, DetailSession>>,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        AppState {
            api,
            calls: Mutex::new(Vec::new()),
            upload: Mutex::new(UploadController::new()),
            open_calls: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the dashboard call list wholesale.
    pub fn replace_calls(&self, calls: Vec<CallRecord>) {
        if let Ok(mut guard) = self.calls.lock() {
            *guard = calls;
        }
    }

    pub fn calls_snapshot(&self) -> Vec<CallRecord> {
        self.calls
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Run a closure against the upload controller.
    pub fn with_upload<T>(
        &self,
        f: impl FnOnce(&mut UploadController) -> T,
    ) -> Result<T, UiError> {
        let mut guard = self
            .upload
            .lock()
            .map_err(|_| UiError::internal("Upload state lock poisoned"))?;
        Ok(f(&mut guard))
    }

    /// Open (or refresh) a detail session for a record. An existing editor
    /// for the same id is discarded: a fresh navigation starts in Viewing.
    pub fn open_detail(&self, record: CallRecord) {
        if let Ok(mut guard) = self.open_calls.lock() {
            guard.insert(
                record.id,
                DetailSession {
                    record,
                    editor: TagEditor::default(),
                },
            );
        }
    }

    /// Drop a detail session on navigation away. Any in-flight save is
    /// simply abandoned; there is nothing to clean up.
    pub fn close_detail(&self, id: i64) {
        if let Ok(mut guard) = self.open_calls.lock() {
            guard.remove(&id);
        }
    }

    /// Run a closure against one open detail session.
    pub fn with_session<T>(
        &self,
        id: i64,
        f: impl FnOnce(&mut DetailSession) -> T,
    ) -> Result<T, UiError> {
        let mut guard = self
            .open_calls
            .lock()
            .map_err(|_| UiError::internal("Detail state lock poisoned"))?;
        let session = guard
            .get_mut(&id)
            .ok_or_else(|| UiError::internal(format!("Call {id} is not open in a detail view")))?;
        Ok(f(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> CallRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "filename": format!("call{id}.wav"),
            "upload_timestamp": "2023-11-21T10:00:00",
            "custom_tags": ["old"]
        }))
        .unwrap()
    }

    fn state() -> AppState {
        AppState::new(ApiClient::new("http://localhost:8000"))
    }

    #[test]
    fn test_call_list_replaced_wholesale() {
        let state = state();
        state.replace_calls(vec![record(1), record(2)]);
        assert_eq!(state.calls_snapshot().len(), 2);
        state.replace_calls(vec![record(3)]);
        let snapshot = state.calls_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, 3);
    }

    #[test]
    fn test_detail_sessions_are_independent_per_record() {
        let state = state();
        state.open_detail(record(1));
        state.open_detail(record(2));

        state
            .with_session(1, |s| {
                let tags = s.record.custom_tags.clone();
                s.editor.begin(&tags);
            })
            .unwrap();

        // Record 2's editor is untouched by record 1's edit.
        let editing = state.with_session(2, |s| s.editor.view().editing).unwrap();
        assert!(!editing);
    }

    #[test]
    fn test_closed_session_is_gone() {
        let state = state();
        state.open_detail(record(1));
        state.close_detail(1);
        assert!(state.with_session(1, |_| ()).is_err());
    }

    #[test]
    fn test_upload_then_tag_edit_scenario() {
        use crate::upload::{IntakeDecision, OfferedFile, UploadPhase};

        let state = state();

        // Upload call1.wav: Idle -> Uploading, intake locked while in flight.
        let decision = state
            .with_upload(|u| {
                u.offer(&[OfferedFile {
                    name: "call1.wav".into(),
                    media_type: Some("audio/wav".into()),
                    path: "/tmp/call1.wav".into(),
                }])
            })
            .unwrap();
        assert!(matches!(decision, IntakeDecision::Accepted(_)));
        assert_eq!(
            state.with_upload(|u| u.phase()).unwrap(),
            UploadPhase::Uploading
        );

        // Backend accepted: Uploading -> Idle, list reloaded wholesale with
        // the new record carrying no custom tags yet.
        state.with_upload(|u| u.finish(Ok(()))).unwrap();
        assert_eq!(state.with_upload(|u| u.phase()).unwrap(), UploadPhase::Idle);
        let new_record: CallRecord = serde_json::from_value(serde_json::json!({
            "id": 10,
            "filename": "call1.wav",
            "upload_timestamp": "2023-11-21T10:00:00"
        }))
        .unwrap();
        state.replace_calls(vec![new_record.clone()]);
        assert!(state.calls_snapshot()[0].custom_tags.is_empty());

        // Open the detail view and edit tags to "demo, follow-up".
        state.open_detail(new_record);
        state
            .with_session(10, |s| {
                let current = s.record.custom_tags.clone();
                s.editor.begin(&current);
                s.editor.set_buffer("demo, follow-up".into());
            })
            .unwrap();
        let parsed = state
            .with_session(10, |s| s.editor.begin_save())
            .unwrap()
            .unwrap();
        assert_eq!(parsed, vec!["demo".to_string(), "follow-up".to_string()]);

        // The server's response is authoritative and replaces the record
        // wholesale, including fields that were not part of the request.
        let updated: CallRecord = serde_json::from_value(serde_json::json!({
            "id": 10,
            "filename": "call1.wav",
            "upload_timestamp": "2023-11-21T10:00:00",
            "transcript": "Agent: Hello...",
            "tags": ["sales"],
            "custom_tags": ["demo", "follow-up"]
        }))
        .unwrap();
        let view = state
            .with_session(10, |s| {
                s.record = updated;
                s.editor.save_succeeded();
                crate::views::call_detail(
                    &s.record,
                    "http://localhost:8000/calls/10/export".into(),
                    s.editor.view(),
                )
            })
            .unwrap();
        assert!(!view.tag_editor.editing);
        assert_eq!(view.custom_tags, vec!["demo", "follow-up"]);
        assert_eq!(view.system_tags, vec!["sales"]);
        assert_eq!(view.transcript, "Agent: Hello...");
    }

    #[test]
    fn test_reopening_resets_editor_to_viewing() {
        let state = state();
        state.open_detail(record(1));
        state
            .with_session(1, |s| s.editor.begin(&["old".to_string()]))
            .unwrap();
        state.open_detail(record(1));
        let editing = state.with_session(1, |s| s.editor.view().editing).unwrap();
        assert!(!editing);
    }
}
