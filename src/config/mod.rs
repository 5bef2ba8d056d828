use crate::api::BookingContract;
use tracing::level_filters::LevelFilter;
use std::str::FromStr;

pub(crate) const DEFAULT_API_URL: &str = "https://pg-booking-backend-448h.onrender.com/api";

/// Runtime settings injected by the hosting page through `window.ENV`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub log_level: LevelFilter,
    pub booking_contract: BookingContract,
}

impl EnvConfig {
    pub fn new() -> Self {
        Self::from_values(
            read_env_key("API_URL", "api_url"),
            read_env_key("LOG_LEVEL", "log_level"),
            read_env_key("BOOKING_CONTRACT", "booking_contract"),
        )
    }

    pub fn from_values(
        api_url: Option<String>,
        log_level: Option<String>,
        booking_contract: Option<String>,
    ) -> Self {
        Self {
            api_url: resolve_api_url(api_url),
            log_level: log_level
                .and_then(|v| LevelFilter::from_str(&v.trim().to_ascii_lowercase()).ok())
                .unwrap_or(LevelFilter::INFO),
            booking_contract: booking_contract
                .and_then(|v| BookingContract::from_str(v.trim()).ok())
                .unwrap_or_default(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn resolve_api_url(raw: Option<String>) -> String {
    raw.map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

// `window.ENV.API_URL` is the documented spelling; the lower-case key is still honored.
fn read_env_key(upper: &str, lower: &str) -> Option<String> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    [upper, lower].iter().find_map(|k| {
        js_sys::Reflect::get(&env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
    })
}
