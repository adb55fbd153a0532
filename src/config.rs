//! Build-time Configuration
//!
//! Values baked in at compile time through environment variables.

use tracing::Level;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u32 = 3000;

/// Backend origin; empty means same origin
pub fn api_base_url() -> &'static str {
    option_env!("TODO_API_BASE_URL").unwrap_or("")
}

/// Absolute URL for an API path such as `/api/todos`
pub fn api_url(path: &str) -> String {
    join_url(api_base_url(), path)
}

/// Console verbosity; `TODO_LOG_LEVEL` defaults to info
pub fn log_level() -> Level {
    parse_level(option_env!("TODO_LOG_LEVEL"))
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|level| level.trim().parse().ok())
        .unwrap_or(Level::INFO)
}
