//! Server configuration for the todo manager REST API.
//!
//! Every option can be given on the command line or through an environment
//! variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TODO_SERVER_PORT` | 4567 | Server port |
//! | `TODO_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `TODO_LOG_LEVEL` | info | Log level |
//! | `TODO_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `TODO_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `TODO_ENABLE_CORS` | true | Enable CORS |
//! | `TODO_CORS_ORIGINS` | * | Allowed origins |
//! | `TODO_CORS_METHODS` | GET,HEAD,POST,PUT,DELETE,OPTIONS | Allowed methods |
//! | `TODO_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `TODO_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//! | `TODO_SEED_DATA` | true | Start with the sample todos, project and categories |
//!
//! # Example
//!
//! ```rust
//! use todo_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     seed_data: false,
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "127.0.0.1:3000");
//! ```

use clap::Parser;

const DEFAULT_CORS_METHODS: &str = "GET,HEAD,POST,PUT,DELETE,OPTIONS";
const DEFAULT_CORS_HEADERS: &str = "Content-Type,Accept";

/// Server configuration for the todo manager.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-manager")]
#[command(about = "Todo manager REST service")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "TODO_SERVER_PORT", default_value = "4567")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "TODO_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "TODO_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "TODO_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "TODO_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "TODO_ENABLE_CORS", default_value = "true", action = clap::ArgAction::Set)]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "TODO_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "TODO_CORS_METHODS", default_value = DEFAULT_CORS_METHODS)]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "TODO_CORS_HEADERS", default_value = DEFAULT_CORS_HEADERS)]
    pub cors_headers: String,

    /// Enable request ID tracking.
    #[arg(long, env = "TODO_ENABLE_REQUEST_ID", default_value = "true", action = clap::ArgAction::Set)]
    pub enable_request_id: bool,

    /// Seed the store with sample data on startup.
    #[arg(long, env = "TODO_SEED_DATA", default_value = "true", action = clap::ArgAction::Set)]
    pub seed_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4567,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: DEFAULT_CORS_METHODS.to_string(),
            cors_headers: DEFAULT_CORS_HEADERS.to_string(),
            enable_request_id: true,
            seed_data: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Command line arguments are ignored; anything unparseable falls back
    /// to the defaults.
    pub fn from_env() -> Self {
        Self::try_parse_from(["todo-manager"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.host.trim().is_empty() {
            errors.push("Host cannot be empty".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if !matches!(
            self.log_level.to_ascii_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            errors.push(format!("Unknown log level: {}", self.log_level));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests. Sample data stays on, since most tests exercise it.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 64 * 1024,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            enable_request_id: false,
            seed_data: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 4567);
        assert_eq!(config.host, "127.0.0.1");
        assert!(config.enable_cors);
        assert!(config.seed_data);
    }

    #[test]
    fn test_parse_defaults_match_default() {
        let parsed = ServerConfig::try_parse_from(["todo-manager"]).unwrap();
        let default = ServerConfig::default();
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.max_body_size, default.max_body_size);
        assert_eq!(parsed.cors_methods, default.cors_methods);
        assert_eq!(parsed.seed_data, default.seed_data);
    }

    #[test]
    fn test_parse_flags() {
        let parsed = ServerConfig::try_parse_from([
            "todo-manager",
            "--port",
            "8080",
            "--seed-data",
            "false",
        ])
        .unwrap();
        assert_eq!(parsed.port, 8080);
        assert!(!parsed.seed_data);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_errors() {
        let config = ServerConfig {
            max_body_size: 0,
            request_timeout: 0,
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("log level")));
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert!(config.validate().is_ok());
    }
}
