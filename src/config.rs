use std::{env, path::PathBuf, time::Duration};

use crate::remote::clamp_limit;

// Runtime settings read from the environment (a `.env` file is loaded first
// by the binary). Gameplay numbers live in `tuning`.

pub const DEFAULT_PLAYER_NAME: &str = "PLAYER";
pub const MAX_PLAYER_NAME_LEN: usize = 12;

/// Fixed logical step, ≈60 FPS.
pub const FRAME: Duration = Duration::from_millis(16);

pub fn api_base_url() -> String {
    env::var("INVADERS_API_URL").unwrap_or_else(|_| "http://localhost:4000/api".to_string())
}

pub fn player_name() -> String {
    sanitize_player_name(&env::var("INVADERS_PLAYER").unwrap_or_default())
}

pub fn leaderboard_limit() -> usize {
    let limit = env::var("INVADERS_LEADERBOARD_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    clamp_limit(limit)
}

pub fn http_timeout() -> Duration {
    let millis = env::var("INVADERS_HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}

pub fn log_file() -> PathBuf {
    env::var("INVADERS_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("space_invaders.log"))
}

/// Trimmed, at most `MAX_PLAYER_NAME_LEN` characters, never empty.
pub fn sanitize_player_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_PLAYER_NAME.to_string();
    }
    trimmed.chars().take(MAX_PLAYER_NAME_LEN).collect()
}
