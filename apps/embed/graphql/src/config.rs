use core_config::{AppInfo, ConfigError, Environment, FromEnv, app_info, env_parse, server::ServerConfig};
use domain_embedding::ModelConfig;

pub const DEFAULT_PORT: u16 = 8002;
pub const DEFAULT_INFERENCE_WORKERS: usize = 4;

/// GraphQL process configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub inference_workers: usize,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let inference_workers = env_parse("INFERENCE_WORKERS", DEFAULT_INFERENCE_WORKERS)?;
        if inference_workers == 0 {
            return Err(ConfigError::InvalidValue {
                key: "INFERENCE_WORKERS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env_with_port(DEFAULT_PORT)?,
            model: ModelConfig::from_env()?,
            inference_workers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars([("PORT", None::<&str>), ("INFERENCE_WORKERS", None)], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.server.port, 8002);
            assert_eq!(config.inference_workers, 4);
        });
    }

    #[test]
    fn test_bad_port() {
        temp_env::with_var("PORT", Some("graphql"), || {
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }
}
