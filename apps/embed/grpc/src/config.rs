use core_config::{AppInfo, ConfigError, Environment, FromEnv, app_info};
use core_grpc::GrpcServerConfig;
use domain_embedding::ModelConfig;

/// gRPC process configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub grpc: GrpcServerConfig,
    pub model: ModelConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            grpc: GrpcServerConfig::from_env()?,
            model: ModelConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("GRPC_PORT", None::<&str>),
                ("GRPC_MAX_WORKERS", None),
                ("METRICS_PORT", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.grpc.port, 50051);
                assert_eq!(config.grpc.max_workers, 10);
                assert_eq!(config.grpc.metrics_port, 8001);
                assert_eq!(config.app.name, "embed_grpc");
            },
        );
    }

    #[test]
    fn test_model_errors_surface() {
        temp_env::with_var("EMBEDDING_DIMENSION", Some("-3"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
