use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost";
pub const DEFAULT_PORT: &str = "8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub port: String,
}

impl Config {
    pub fn load() -> Self {
        let base_url = get_env_or("BASE_URL", DEFAULT_BASE_URL);
        let port = get_env_or("PORT", DEFAULT_PORT);
        Self { base_url, port }
    }

    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Logging settings are read before the subscriber exists, so unlike
/// [`Config::load`] nothing here is logged.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

impl LogConfig {
    pub fn load() -> Self {
        let filter =
            non_empty_env("RUST_LOG").unwrap_or_else(|| "info,tower_http=debug".to_string());
        let json = non_empty_env("LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        Self { filter, json }
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.is_empty())
}

fn get_env_or(var: &str, default: &str) -> String {
    non_empty_env(var).unwrap_or_else(|| {
        tracing::warn!(
            "{} environment variable not set, using default: {}",
            var,
            default
        );
        default.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_addr_binds_all_interfaces() {
        let config = Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            port: "9000".to_string(),
        };
        assert_eq!(config.server_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn missing_variable_falls_back_to_default() {
        assert_eq!(
            get_env_or("SHORTKEY_TEST_SURELY_UNSET", "fallback"),
            "fallback"
        );
    }
}
