//! Compile-time application settings.
//!
//! Values are baked in at build time (`LEDGERLY_API_URL=https://api.example.com trunk build`)
//! because the bundle runs in the browser and has no process environment to read.

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST backend without a trailing slash. Empty means same origin.
    pub api_base_url: String,
    pub google_client_id: Option<String>,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("LEDGERLY_API_URL"),
            option_env!("LEDGERLY_GOOGLE_CLIENT_ID"),
            option_env!("LEDGERLY_LOG"),
        )
    }

    fn from_values(api_url: Option<&str>, client_id: Option<&str>, log: Option<&str>) -> Self {
        Self {
            api_base_url: clean_base_url(api_url.unwrap_or_default()),
            google_client_id: client_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            log_filter: log
                .map(str::trim)
                .filter(|filter| !filter.is_empty())
                .unwrap_or(DEFAULT_LOG_FILTER)
                .to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

fn clean_base_url(url: &str) -> String {
    url.trim().strip_suffix('/').unwrap_or(url.trim()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_trailing_slash() {
        let config = AppConfig::from_values(Some("https://api.example.com/"), None, None);
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn missing_url_means_same_origin() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "");
        assert_eq!(config.google_client_id, None);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = AppConfig::from_values(Some("http://localhost:3000"), Some("  "), Some(""));
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.google_client_id, None);
        assert_eq!(config.log_filter, "info");
    }
}
