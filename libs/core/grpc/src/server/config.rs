//! Server configuration loaded from environment variables.

use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse};
use std::net::SocketAddr;

const DEFAULT_HOST: &str = "[::]";
const DEFAULT_PORT: u16 = 50051;
const DEFAULT_MAX_WORKERS: usize = 10;
const DEFAULT_MAX_MESSAGE_SIZE: usize = 8 * 1024 * 1024; // 8MB
const DEFAULT_METRICS_PORT: u16 = 8001;

/// Configuration for the gRPC server.
#[derive(Debug, Clone)]
pub struct GrpcServerConfig {
    /// Host to bind to (default: [::], all interfaces)
    pub host: String,
    /// Port to listen on (default: 50051)
    pub port: u16,
    /// Inference workers and per-connection concurrency limit (default: 10)
    pub max_workers: usize,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
    /// Maximum message size for decoding (default: 8MB)
    pub max_decoding_message_size: usize,
    /// Maximum message size for encoding (default: 8MB)
    pub max_encoding_message_size: usize,
    /// Port of the side HTTP listener serving /metrics (default: 8001)
    pub metrics_port: u16,
    /// TCP keepalive interval in seconds (default: 60)
    pub keepalive_secs: u64,
}

impl Default for GrpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_workers: DEFAULT_MAX_WORKERS,
            enable_compression: true,
            max_decoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_encoding_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            metrics_port: DEFAULT_METRICS_PORT,
            keepalive_secs: 60,
        }
    }
}

impl FromEnv for GrpcServerConfig {
    /// Reads:
    /// - `GRPC_HOST` (default: [::])
    /// - `GRPC_PORT` (default: 50051)
    /// - `GRPC_MAX_WORKERS` (default: 10, must be at least 1)
    /// - `GRPC_COMPRESSION` (default: true)
    /// - `GRPC_MAX_MESSAGE_SIZE` (default: 8388608 / 8MB)
    /// - `METRICS_PORT` (default: 8001)
    fn from_env() -> Result<Self, ConfigError> {
        let max_workers = env_parse("GRPC_MAX_WORKERS", DEFAULT_MAX_WORKERS)?;
        if max_workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "GRPC_MAX_WORKERS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }
        let max_message_size = env_parse("GRPC_MAX_MESSAGE_SIZE", DEFAULT_MAX_MESSAGE_SIZE)?;

        Ok(Self {
            host: env_or_default("GRPC_HOST", DEFAULT_HOST),
            port: env_parse("GRPC_PORT", DEFAULT_PORT)?,
            max_workers,
            enable_compression: env_flag("GRPC_COMPRESSION", true),
            max_decoding_message_size: max_message_size,
            max_encoding_message_size: max_message_size,
            metrics_port: env_parse("METRICS_PORT", DEFAULT_METRICS_PORT)?,
            keepalive_secs: 60,
        })
    }
}

impl GrpcServerConfig {
    /// Create a new server config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host to bind to.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port to listen on.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers.max(1);
        self
    }

    /// Enable or disable compression.
    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    /// Set maximum message size.
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_decoding_message_size = size;
        self.max_encoding_message_size = size;
        self
    }

    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.addr_string().parse()
    }

    /// Address of the /metrics listener, on the same host as the gRPC server.
    pub fn metrics_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.metrics_port).parse()
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "GRPC_HOST",
        "GRPC_PORT",
        "GRPC_MAX_WORKERS",
        "GRPC_COMPRESSION",
        "GRPC_MAX_MESSAGE_SIZE",
        "METRICS_PORT",
    ];

    #[test]
    fn test_default_config() {
        let config = GrpcServerConfig::default();
        assert_eq!(config.host, "[::]");
        assert_eq!(config.port, 50051);
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.metrics_port, 8001);
        assert!(config.enable_compression);
        assert_eq!(config.socket_addr().unwrap().port(), 50051);
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = GrpcServerConfig::from_env().unwrap();
            assert_eq!(config.addr_string(), "[::]:50051");
            assert_eq!(config.max_decoding_message_size, 8 * 1024 * 1024);
            assert_eq!(config.metrics_addr().unwrap().port(), 8001);
        });
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [
                ("GRPC_HOST", Some("127.0.0.1")),
                ("GRPC_PORT", Some("6000")),
                ("GRPC_MAX_WORKERS", Some("3")),
                ("GRPC_COMPRESSION", Some("false")),
                ("GRPC_MAX_MESSAGE_SIZE", Some("1024")),
                ("METRICS_PORT", Some("9100")),
            ],
            || {
                let config = GrpcServerConfig::from_env().unwrap();
                assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:6000");
                assert_eq!(config.max_workers, 3);
                assert!(!config.enable_compression);
                assert_eq!(config.max_encoding_message_size, 1024);
                assert_eq!(config.metrics_port, 9100);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_zero_workers() {
        temp_env::with_var("GRPC_MAX_WORKERS", Some("0"), || {
            let err = GrpcServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("GRPC_MAX_WORKERS"));
        });
    }

    #[test]
    fn test_from_env_rejects_bad_port() {
        temp_env::with_var("GRPC_PORT", Some("fifty"), || {
            assert!(GrpcServerConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_builder_pattern() {
        let config = GrpcServerConfig::new()
            .with_host("0.0.0.0")
            .with_port(8080)
            .with_max_workers(0)
            .with_compression(false)
            .with_max_message_size(4096);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_workers, 1);
        assert!(!config.enable_compression);
        assert_eq!(config.max_decoding_message_size, 4096);
    }
}
