//! Tauri IPC surface.
//!
//! Commands are thin: they route between the webview, the state machines in
//! `upload`/`tags`, and the REST client, and return render-ready view models.
//! Locks are never held across an await.

use std::sync::Arc;

use serde::Serialize;
use tauri::State;

use crate::error::UiError;
use crate::state::AppState;
use crate::tags::TagEditorView;
use crate::types::CallRecord;
use crate::upload::{IntakeDecision, OfferedFile, UploadView, UPLOAD_FAILED_MESSAGE};
use crate::views::{self, CallCardView, CallDetailView, DashboardView};

/// Load everything the dashboard shell needs.
///
/// The call list degrades to empty and the analytics section to `None` on
/// failure; this command itself only fails on internal state errors, so the
/// shell always renders.
#[tauri::command]
pub async fn load_dashboard(state: State<'_, Arc<AppState>>) -> Result<DashboardView, UiError> {
    let records = state.api.list_calls(None).await;
    let analytics = match state.api.get_analytics().await {
        Ok(snapshot) => Some(views::analytics_view(&snapshot)),
        Err(e) => {
            log::warn!("Analytics fetch failed, omitting section: {e}");
            None
        }
    };
    let cards: Vec<CallCardView> = records.iter().map(views::call_card).collect();
    state.replace_calls(records);
    let upload = state.with_upload(|u| u.view())?;
    Ok(DashboardView {
        calls: cards,
        analytics,
        upload,
    })
}

/// Reload the call list, optionally filtered by tag.
#[tauri::command]
pub async fn refresh_calls(
    state: State<'_, Arc<AppState>>,
    tag: Option<String>,
) -> Result<Vec<CallCardView>, UiError> {
    let records = state.api.list_calls(tag.as_deref()).await;
    let cards = records.iter().map(views::call_card).collect();
    state.replace_calls(records);
    Ok(cards)
}

#[tauri::command]
pub fn upload_drag_enter(state: State<'_, Arc<AppState>>) -> Result<UploadView, UiError> {
    state.with_upload(|u| {
        u.drag_enter();
        u.view()
    })
}

#[tauri::command]
pub fn upload_drag_leave(state: State<'_, Arc<AppState>>) -> Result<UploadView, UiError> {
    state.with_upload(|u| {
        u.drag_leave();
        u.view()
    })
}

#[tauri::command]
pub fn dismiss_upload_error(state: State<'_, Arc<AppState>>) -> Result<UploadView, UiError> {
    state.with_upload(|u| {
        u.dismiss_error();
        u.view()
    })
}

/// Result of a drop/pick event, whether or not an upload actually ran.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub upload: UploadView,
    pub uploaded: bool,
    /// Freshly reloaded call list after a successful upload, `None` otherwise.
    pub calls: Option<Vec<CallCardView>>,
}

/// Handle a drop or file-picker selection.
///
/// Validation happens synchronously in the controller; only a valid first
/// file produces a network call. On success the call list is reloaded
/// wholesale — the simplest correct refresh policy with no incremental
/// update channel.
#[tauri::command]
pub async fn offer_upload(
    state: State<'_, Arc<AppState>>,
    files: Vec<OfferedFile>,
) -> Result<UploadResult, UiError> {
    let decision = state.with_upload(|u| u.offer(&files))?;
    let file = match decision {
        IntakeDecision::Accepted(file) => file,
        IntakeDecision::Rejected | IntakeDecision::Ignored => {
            return Ok(UploadResult {
                upload: state.with_upload(|u| u.view())?,
                uploaded: false,
                calls: None,
            });
        }
    };

    let outcome = perform_upload(&state, &file).await;
    let uploaded = outcome.is_ok();
    state.with_upload(|u| {
        u.finish(outcome.map(|_| ()).map_err(|e| {
            log::warn!("Upload of {:?} failed: {e}", file.name);
            UPLOAD_FAILED_MESSAGE.to_string()
        }))
    })?;

    let calls = if uploaded {
        let records = state.api.list_calls(None).await;
        let cards = records.iter().map(views::call_card).collect();
        state.replace_calls(records);
        Some(cards)
    } else {
        None
    };

    Ok(UploadResult {
        upload: state.with_upload(|u| u.view())?,
        uploaded,
        calls,
    })
}

async fn perform_upload(
    state: &AppState,
    file: &OfferedFile,
) -> Result<CallRecord, crate::api::ApiError> {
    let bytes = tokio::fs::read(&file.path).await?;
    let record = state.api.upload_call(&file.name, bytes).await?;
    log::info!("Uploaded {:?} as call {}", file.name, record.id);
    Ok(record)
}

/// Fetch one call and open a detail session for it.
///
/// A missing id propagates as a NotFound error the webview renders as a
/// "not found" state.
#[tauri::command]
pub async fn open_call_detail(
    state: State<'_, Arc<AppState>>,
    id: i64,
) -> Result<CallDetailView, UiError> {
    let record = state.api.get_call(id).await?;
    let view = views::call_detail(
        &record,
        state.api.export_link(id),
        crate::tags::TagEditor::default().view(),
    );
    state.open_detail(record);
    Ok(view)
}

/// Drop the detail session on navigation away.
#[tauri::command]
pub fn close_call_detail(state: State<'_, Arc<AppState>>, id: i64) {
    state.close_detail(id);
}

#[tauri::command]
pub fn begin_tag_edit(
    state: State<'_, Arc<AppState>>,
    id: i64,
) -> Result<TagEditorView, UiError> {
    state.with_session(id, |session| {
        let current = session.record.custom_tags.clone();
        session.editor.begin(&current);
        session.editor.view()
    })
}

#[tauri::command]
pub fn set_tag_buffer(
    state: State<'_, Arc<AppState>>,
    id: i64,
    text: String,
) -> Result<TagEditorView, UiError> {
    state.with_session(id, |session| {
        session.editor.set_buffer(text);
        session.editor.view()
    })
}

/// Persist the edit buffer.
///
/// On success the server's returned record replaces the session's record
/// wholesale (the response is authoritative, including server-computed
/// fields) and the editor returns to viewing. On failure the editor stays
/// in edit mode with the buffer intact and the error propagates for a
/// blocking notification.
#[tauri::command]
pub async fn save_tags(
    state: State<'_, Arc<AppState>>,
    id: i64,
) -> Result<CallDetailView, UiError> {
    let parsed = state
        .with_session(id, |session| session.editor.begin_save())?
        .ok_or_else(|| UiError::internal("No tag edit in progress"))?;

    match state.api.update_tags(id, &parsed).await {
        Ok(updated) => state.with_session(id, |session| {
            session.record = updated;
            session.editor.save_succeeded();
            views::call_detail(
                &session.record,
                state.api.export_link(id),
                session.editor.view(),
            )
        }),
        Err(e) => {
            state.with_session(id, |session| session.editor.save_failed())?;
            Err(e.into())
        }
    }
}

/// Downloadable-export locator. Pure construction, no network call.
#[tauri::command]
pub fn export_link(state: State<'_, Arc<AppState>>, id: i64) -> String {
    state.api.export_link(id)
}
