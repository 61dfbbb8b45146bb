//! Callscope: desktop dashboard for a call-intelligence pipeline.
//!
//! Operators upload recorded sales calls; a remote backend transcribes and
//! analyzes them; this client shows transcripts, sentiment/intent metadata,
//! aggregate analytics, and user-editable tags. The webview is a thin
//! renderer — every state machine and transform lives in this crate:
//!
//! - `api`: the sole boundary to the backend (REST/JSON via reqwest)
//! - `upload`: drag/drop + file-picker state machine
//! - `tags`: per-record view/edit tag lifecycle
//! - `analytics`: pure aggregate-map -> render-sequence transforms
//! - `views`: render-ready view models
//! - `state` / `commands`: managed state and the IPC surface

pub mod analytics;
pub mod api;
mod commands;
pub mod config;
pub mod error;
pub mod state;
pub mod tags;
pub mod types;
pub mod upload;
pub mod views;

use std::sync::Arc;

use state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::load();
    log::info!("Backend endpoint: {}", config.api_base_url);
    let state = Arc::new(AppState::new(api::ApiClient::from_config(&config)));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            commands::load_dashboard,
            commands::refresh_calls,
            commands::upload_drag_enter,
            commands::upload_drag_leave,
            commands::dismiss_upload_error,
            commands::offer_upload,
            commands::open_call_detail,
            commands::close_call_detail,
            commands::begin_tag_edit,
            commands::set_tag_buffer,
            commands::save_tags,
            commands::export_link,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
