use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::backend::BackendConfig;

/// Substrings left behind by project templates when the backend was never
/// set up.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "your-project",
    "your_supabase",
    "your-anon-key",
    "placeholder",
    "<",
    ">",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub backend_url: String,
    pub backend_key: String,
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_BACKEND_URL, APP_BACKEND_KEY, APP_PORT, ...
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("backend_url", "")?
            .set_default("backend_key", "")?
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("request_timeout_secs", 10)?
            .build()?;

        config.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Decides once whether the remote data service is usable.
    pub fn backend(&self) -> BackendConfig {
        let url = self.backend_url.trim();
        let key = self.backend_key.trim();

        if url.is_empty() || key.is_empty() {
            return BackendConfig::unconfigured("backend url or key is empty");
        }
        if [url, key].iter().any(|value| has_placeholder(value)) {
            return BackendConfig::unconfigured("backend url or key is a template placeholder");
        }
        if !url.starts_with("https://") {
            return BackendConfig::unconfigured("backend url is not https");
        }

        match Url::parse(url) {
            Ok(base_url) => BackendConfig::Configured {
                base_url,
                access_key: key.to_string(),
            },
            Err(_) => BackendConfig::unconfigured("backend url does not parse"),
        }
    }
}

fn has_placeholder(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
