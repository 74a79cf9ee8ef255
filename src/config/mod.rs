// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig,
    ServerConfig,
};

/// Environment variable prefix, e.g. `FARMAID_SERVER__PORT=8080`
const ENV_PREFIX: &str = "FARMAID";

impl Config {
    /// Load configuration from specified file path (extension optional)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("logging.json", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("http.server_name", "FarmAid/0.1")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("routes.api_prefix", "/api")?
            .set_default("routes.homepage_template", "templates/index.html")?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from `config.toml` in the working directory
    pub fn load() -> Result<Self, ServerError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::InvalidAddress { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, PoisonError};

    use super::*;

    // Environment is process-wide; tests asserting on env-overridable keys hold this
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_without_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let cfg = Config::load_from("does/not/exist/farmaid").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.routes.api_prefix, "/api");
        assert_eq!(cfg.routes.homepage_template, "templates/index.html");
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert_eq!(cfg.http.max_body_size, 10_485_760);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.max_connections, None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let _env = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let path = std::env::temp_dir().join(format!(
            "farmaid_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"
[server]
port = 8081
workers = 2

[performance]
max_connections = 64

[routes]
api_prefix = "/v2"

[routes.health]
enabled = false
"#,
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(cfg.server.port, 8081);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.performance.max_connections, Some(64));
        assert_eq!(cfg.routes.api_prefix, "/v2");
        assert!(!cfg.routes.health.enabled);
        // Untouched keys keep their defaults
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.routes.health.readiness_path, "/readyz");
    }

    #[test]
    fn test_env_overrides_defaults() {
        let _env = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        std::env::set_var("FARMAID_SERVER__PORT", "8080");
        std::env::set_var("FARMAID_PERFORMANCE__WRITE_TIMEOUT", "45");
        let cfg = Config::load_from("does/not/exist/farmaid");
        std::env::remove_var("FARMAID_SERVER__PORT");
        std::env::remove_var("FARMAID_PERFORMANCE__WRITE_TIMEOUT");

        let cfg = cfg.unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.performance.write_timeout, 45);
        assert_eq!(cfg.server.host, "127.0.0.1");
    }

    #[test]
    fn test_api_root_strips_trailing_slash() {
        let mut routes = RoutesConfig {
            api_prefix: "/api/".to_string(),
            homepage_template: "templates/index.html".to_string(),
            health: HealthConfig::default(),
        };
        assert_eq!(routes.api_root(), "/api");

        routes.api_prefix = "/api".to_string();
        assert_eq!(routes.api_root(), "/api");

        // A bare "/" mounts the groups at the root
        routes.api_prefix = "/".to_string();
        assert_eq!(routes.api_root(), "");
    }

    #[test]
    fn test_socket_addr() {
        let _env = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut cfg = Config::load_from("does/not/exist/farmaid").unwrap();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:5000".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not an ip".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }
}
