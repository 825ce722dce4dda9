//! Model backends behind the [`EmbeddingModel`] trait.

mod catalog;
#[cfg(feature = "fastembed")]
mod fastembed;
mod hashing;

pub use catalog::{DEFAULT_MODEL, ModelCatalog};
#[cfg(feature = "fastembed")]
pub use fastembed::FastEmbedModel;
pub use hashing::HashingEmbedder;

use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::ModelInfo;

/// Synchronous, CPU-bound embedding model.
///
/// Implementations are loaded once and shared read-only across every
/// worker; calls must not rely on `&mut self`.
#[cfg_attr(test, mockall::automock)]
pub trait EmbeddingModel: Send + Sync {
    fn info(&self) -> ModelInfo;

    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f64>>;

    /// One vector per input, in input order.
    fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f64>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Hashing,
    FastEmbed,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "fastembed") {
            Backend::FastEmbed
        } else {
            Backend::Hashing
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashing" => Ok(Backend::Hashing),
            "fastembed" => Ok(Backend::FastEmbed),
            other => Err(format!(
                "unknown backend '{other}', expected 'hashing' or 'fastembed'"
            )),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Backend::Hashing => "hashing",
            Backend::FastEmbed => "fastembed",
        })
    }
}

/// Which model to load and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub name: String,
    pub backend: Backend,
    /// Overrides the catalog dimension (hashing backend only).
    pub dimension: Option<usize>,
    pub cache_dir: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            backend: Backend::default(),
            dimension: None,
            cache_dir: None,
        }
    }
}

impl ModelConfig {
    pub fn hashing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            backend: Backend::Hashing,
            ..Self::default()
        }
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

impl FromEnv for ModelConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let dimension = env_optional::<usize>("EMBEDDING_DIMENSION")?;
        if dimension == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "EMBEDDING_DIMENSION".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            name: env_or_default("EMBEDDING_MODEL", DEFAULT_MODEL),
            backend: env_parse("EMBEDDING_BACKEND", Backend::default())?,
            dimension,
            cache_dir: env_optional::<PathBuf>("EMBEDDING_CACHE_DIR")?,
        })
    }
}

/// Load the configured model. Called once per process before serving.
pub fn load_model(config: &ModelConfig) -> EmbeddingResult<Arc<dyn EmbeddingModel>> {
    let model: Arc<dyn EmbeddingModel> = match config.backend {
        Backend::Hashing => {
            let dimension = config
                .dimension
                .or_else(|| ModelCatalog::dimension(&config.name))
                .ok_or_else(|| {
                    EmbeddingError::Config(format!(
                        "unknown model '{}', set EMBEDDING_DIMENSION",
                        config.name
                    ))
                })?;
            Arc::new(HashingEmbedder::new(config.name.clone(), dimension)?)
        }
        Backend::FastEmbed => load_pretrained(config)?,
    };

    let info = model.info();
    tracing::info!(
        model = %info.name,
        dimension = info.dimension,
        backend = %config.backend,
        "Embedding model loaded"
    );
    Ok(model)
}

#[cfg(feature = "fastembed")]
fn load_pretrained(config: &ModelConfig) -> EmbeddingResult<Arc<dyn EmbeddingModel>> {
    if config.dimension.is_some() {
        tracing::warn!("EMBEDDING_DIMENSION is ignored by the fastembed backend");
    }
    Ok(Arc::new(FastEmbedModel::load(
        &config.name,
        config.cache_dir.clone(),
    )?))
}

#[cfg(not(feature = "fastembed"))]
fn load_pretrained(_config: &ModelConfig) -> EmbeddingResult<Arc<dyn EmbeddingModel>> {
    Err(EmbeddingError::Config(
        "this build does not include the fastembed backend".to_string(),
    ))
}
