//! Backend endpoint configuration.
//!
//! A single base-URL setting selects the backend address. Resolution order:
//! 1. `CALLSCOPE_API_URL` environment variable
//! 2. `~/.callscope/config.json` (`{"apiBaseUrl": "..."}`)
//! 3. Context default: `http://backend:8000` when `CALLSCOPE_CONTAINER` is
//!    set (compose-internal service name), `http://localhost:8000` otherwise.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const DEFAULT_LOCAL_URL: &str = "http://localhost:8000";
const DEFAULT_CONTAINER_URL: &str = "http://backend:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub api_base_url: String,
}

/// On-disk shape of ~/.callscope/config.json. Every field optional so a
/// partial file still loads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileConfig {
    #[serde(default)]
    api_base_url: Option<String>,
}

pub fn load() -> Config {
    let file = config_path().and_then(|path| read_config_file(&path));
    let env_url = std::env::var("CALLSCOPE_API_URL")
        .ok()
        .filter(|value| !value.trim().is_empty());
    let in_container = std::env::var_os("CALLSCOPE_CONTAINER").is_some();
    Config {
        api_base_url: resolve_base_url(env_url, file, in_container),
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".callscope").join("config.json"))
}

fn read_config_file(path: &Path) -> Option<FileConfig> {
    let raw = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring malformed config at {}: {e}", path.display());
            None
        }
    }
}

fn resolve_base_url(
    env_url: Option<String>,
    file: Option<FileConfig>,
    in_container: bool,
) -> String {
    if let Some(url) = env_url {
        return url;
    }
    if let Some(url) = file.and_then(|f| f.api_base_url) {
        return url;
    }
    if in_container {
        DEFAULT_CONTAINER_URL.to_string()
    } else {
        DEFAULT_LOCAL_URL.to_string()
    }
}
