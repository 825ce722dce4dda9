use core_config::{AppInfo, ConfigError, Environment, FromEnv, app_info, env_parse, server::ServerConfig};
use domain_embedding::{ModelConfig, RestErrorMode};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_INFERENCE_WORKERS: usize = 4;

/// REST process configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub inference_workers: usize,
    pub error_mode: RestErrorMode,
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
            error_mode: env_parse("REST_ERROR_MODE", RestErrorMode::default())?,
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
                ("PORT", None::<&str>),
                ("INFERENCE_WORKERS", None),
                ("REST_ERROR_MODE", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 8000);
                assert_eq!(config.inference_workers, 4);
                assert_eq!(config.error_mode, RestErrorMode::Collapsed);
                assert_eq!(config.app.name, "embed_rest");
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("PORT", Some("9000")),
                ("INFERENCE_WORKERS", Some("8")),
                ("REST_ERROR_MODE", Some("distinct")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.inference_workers, 8);
                assert_eq!(config.error_mode, RestErrorMode::Distinct);
            },
        );
    }

    #[test]
    fn test_invalid_values() {
        temp_env::with_var("INFERENCE_WORKERS", Some("0"), || {
            assert!(Config::from_env().is_err());
        });
        temp_env::with_var("REST_ERROR_MODE", Some("loud"), || {
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::ParseError { .. })
            ));
        });
    }
}
