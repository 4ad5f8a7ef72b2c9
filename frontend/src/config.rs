use std::str::FromStr;

use log::LevelFilter;

use crate::services::logging::Logger;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5678";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Build-time settings of the web app
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Resolve the settings baked in with `BILLED_API_URL` and `BILLED_LOG`
    pub fn load() -> Self {
        Self::from_values(option_env!("BILLED_API_URL"), option_env!("BILLED_LOG"))
    }

    pub fn from_values(api_base_url: Option<&str>, log_level: Option<&str>) -> Self {
        Self {
            api_base_url: try_load("BILLED_API_URL", api_base_url, DEFAULT_API_BASE_URL.to_string()),
            log_level: try_load("BILLED_LOG", log_level, DEFAULT_LOG_LEVEL),
        }
    }
}

fn try_load<T: FromStr>(key: &str, value: Option<&str>, default: T) -> T {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };

    raw.parse().unwrap_or_else(|_| {
        Logger::warn_with_component("config", &format!("Invalid {} value {:?}, using default", key, raw));
        default
    })
}
