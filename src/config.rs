//! Application Configuration
//!
//! Values are baked in at build time through environment variables and fall
//! back to defaults suited to a same-origin deployment behind `/api`.

use log::LevelFilter;

/// Runtime configuration for the console
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Absolute base URL of the REST backend, without trailing slash
    pub api_base: String,
    /// localStorage key holding the bearer token
    pub token_key: String,
    /// Maximum log level written to the console
    pub log_level: LevelFilter,
    /// Pointer travel (px) before a press turns into a drag
    pub drag_threshold_px: i32,
}

const DEFAULT_TOKEN_KEY: &str = "token";
const DEFAULT_API_PATH: &str = "/api";

impl AppConfig {
    /// Build from compile-time environment (`DESK_API_BASE`, `DESK_TOKEN_KEY`,
    /// `DESK_LOG_LEVEL`) with defaults for anything unset.
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("DESK_API_BASE"),
            option_env!("DESK_TOKEN_KEY"),
            option_env!("DESK_LOG_LEVEL"),
            page_origin(),
        )
    }

    fn from_values(
        api_base: Option<&str>,
        token_key: Option<&str>,
        log_level: Option<&str>,
        origin: Option<String>,
    ) -> Self {
        let api_base = match api_base.map(str::trim).filter(|s| !s.is_empty()) {
            Some(base) if base.starts_with("http://") || base.starts_with("https://") => base.to_string(),
            // Relative base: resolve against the page origin
            Some(path) => format!("{}{}", origin.clone().unwrap_or_default(), ensure_leading_slash(path)),
            None => format!(
                "{}{}",
                origin.unwrap_or_else(|| "http://localhost:8080".to_string()),
                DEFAULT_API_PATH
            ),
        };

        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token_key: token_key
                .filter(|k| !k.trim().is_empty())
                .unwrap_or(DEFAULT_TOKEN_KEY)
                .to_string(),
            log_level: log_level
                .map(console_logger::parse_level)
                .unwrap_or(LevelFilter::Info),
            drag_threshold_px: leptos_dragdrop::DRAG_THRESHOLD_PX,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, None)
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "http://localhost:8080/api");
        assert_eq!(config.token_key, "token");
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.drag_threshold_px, 5);
    }

    #[test]
    fn test_relative_base_resolves_against_origin() {
        let config = AppConfig::from_values(
            Some("backend/api/"),
            None,
            Some("debug"),
            Some("https://desk.example.com".to_string()),
        );
        assert_eq!(config.api_base, "https://desk.example.com/backend/api");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_absolute_base_kept() {
        let config = AppConfig::from_values(
            Some("https://api.example.com/"),
            Some("desk-token"),
            None,
            Some("https://desk.example.com".to_string()),
        );
        assert_eq!(config.api_base, "https://api.example.com");
        assert_eq!(config.token_key, "desk-token");
    }
}
