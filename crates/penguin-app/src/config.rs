//! Application configuration.

use std::path::PathBuf;

/// Default host the server binds to.
const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port for the HTML form.
const DEFAULT_PORT: u16 = 9410;
/// Default port for the WebSocket bridge.
const DEFAULT_WS_PORT: u16 = 9411;

/// Runtime configuration for the predictor application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the four fitted artifacts.
    pub artifact_dir: PathBuf,
    /// Interface to bind.
    pub host: String,
    /// Port serving the form page.
    pub port: u16,
    /// Port serving the WebSocket IPC.
    pub ws_port: u16,
}

impl AppConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `host:ws_port` for the WebSocket listener.
    pub fn ws_bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.ws_port)
    }
}

fn env_port(name: &str, default: u16) -> u16 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifact_dir: std::env::var_os("PENGUIN_ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            host: std::env::var("PENGUIN_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env_port("PENGUIN_PORT", DEFAULT_PORT),
            ws_port: env_port("PENGUIN_WS_PORT", DEFAULT_WS_PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_joins_host_and_port() {
        let config = AppConfig {
            artifact_dir: PathBuf::from("models"),
            host: "0.0.0.0".into(),
            port: 8080,
            ws_port: 8081,
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.ws_bind_addr(), "0.0.0.0:8081");
    }
}
