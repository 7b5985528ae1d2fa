//! Configuration management for the pairgate gateway.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every getter falls back to a default so
//! the gateway starts with an empty environment:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf, time::Duration};

const APP_DIR: &str = "pairgate";

fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Loads environment variables from `.env` in the local data directory.
///
/// The file is looked up under:
/// - Linux: `~/.local/share/pairgate/.env`
/// - macOS: `~/Library/Application Support/pairgate/.env`
/// - Windows: `%LOCALAPPDATA%/pairgate/.env`
///
/// A missing file is not an error; the directory is created so the user has
/// somewhere to put one.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if async_fs::metadata(&path).await.is_err() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Address the HTTP server binds to.
///
/// `SERVER_ADDRESS` wins when set; otherwise the gateway listens on every
/// interface at `PORT` (default `3000`).
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| format!("0.0.0.0:{}", port()))
}

pub fn port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000)
}

/// Directory holding `pairs.json`, `posts.json` and `visits.json`.
///
/// Defaults to `<data_local_dir>/pairgate/data`.
pub fn data_dir() -> PathBuf {
    env::var("PAIRGATE_DATA_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| app_dir().join("data"))
}

/// Directory served for every non-API path; `/` maps to its `index.html`.
pub fn public_dir() -> PathBuf {
    PathBuf::from(var_or("PAIRGATE_PUBLIC_DIR", "public"))
}

pub fn ai_api_url() -> String {
    var_or("AI_API_URL", "https://lance-frank-asta.onrender.com/api/gpt")
}

pub fn song_api_url() -> String {
    var_or(
        "SONG_API_URL",
        "https://izumiiiiiiii.dpdns.org/downloader/youtube-play",
    )
}

pub fn image_api_url() -> String {
    var_or("IMAGE_API_URL", "https://shizoapi.onrender.com/api/ai/imagine")
}

/// API key appended to image generation requests.
///
/// The default is the public demo key the upstream hands out.
pub fn image_api_key() -> String {
    var_or("IMAGE_API_KEY", "shizo")
}

pub fn tiktok_api_url() -> String {
    var_or(
        "TIKTOK_API_URL",
        "https://api.siputzx.my.id/api/stalk/tiktok",
    )
}

pub fn pies_api_url() -> String {
    var_or("PIES_API_URL", "https://shizoapi.onrender.com/api/pies")
}

/// Overall timeout for a single upstream request, from `UPSTREAM_TIMEOUT_SECS`.
pub fn upstream_timeout() -> Duration {
    let secs = env::var("UPSTREAM_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(30);
    Duration::from_secs(secs)
}
