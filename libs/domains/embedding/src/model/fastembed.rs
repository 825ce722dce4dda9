use std::path::PathBuf;

use fastembed::{EmbeddingModel as PretrainedModel, InitOptions, TextEmbedding};

use super::{EmbeddingModel, catalog::ModelCatalog};
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::ModelInfo;

/// Pretrained sentence-transformer weights served through ONNX runtime.
///
/// The session is shared read-only; concurrent calls run in parallel.
pub struct FastEmbedModel {
    inner: TextEmbedding,
    info: ModelInfo,
}

impl FastEmbedModel {
    pub fn load(name: &str, cache_dir: Option<PathBuf>) -> EmbeddingResult<Self> {
        let (variant, dimension) = resolve(name)?;

        let mut options = InitOptions::new(variant).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }

        let inner = TextEmbedding::try_new(options)
            .map_err(|e| EmbeddingError::Config(format!("failed to load '{name}': {e}")))?;

        Ok(Self {
            inner,
            info: ModelInfo::new(name, dimension),
        })
    }

    fn run(&self, texts: Vec<&str>) -> EmbeddingResult<Vec<Vec<f64>>> {
        let output = self
            .inner
            .embed(texts, None)
            .map_err(|e| EmbeddingError::internal(e.to_string()))?;
        Ok(output
            .into_iter()
            .map(|v| v.into_iter().map(f64::from).collect())
            .collect())
    }
}

fn resolve(name: &str) -> EmbeddingResult<(PretrainedModel, usize)> {
    let variant = match ModelCatalog::canonical(name).to_ascii_lowercase().as_str() {
        "all-minilm-l6-v2" => PretrainedModel::AllMiniLML6V2,
        "all-minilm-l12-v2" => PretrainedModel::AllMiniLML12V2,
        "bge-small-en-v1.5" => PretrainedModel::BGESmallENV15,
        "bge-base-en-v1.5" => PretrainedModel::BGEBaseENV15,
        "nomic-embed-text-v1.5" => PretrainedModel::NomicEmbedTextV15,
        _ => {
            return Err(EmbeddingError::Config(format!(
                "model '{name}' is not available in the fastembed backend"
            )));
        }
    };
    let dimension = ModelCatalog::dimension(name)
        .ok_or_else(|| EmbeddingError::Config(format!("unknown dimension for '{name}'")))?;
    Ok((variant, dimension))
}

impl EmbeddingModel for FastEmbedModel {
    fn info(&self) -> ModelInfo {
        self.info.clone()
    }

    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f64>> {
        self.run(vec![text])?
            .pop()
            .ok_or_else(|| EmbeddingError::internal("model returned no embedding"))
    }

    fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f64>>> {
        self.run(texts.iter().map(String::as_str).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_models() {
        let (_, dim) = resolve("all-MiniLM-L6-v2").unwrap();
        assert_eq!(dim, 384);
        let (_, dim) = resolve("BAAI/bge-base-en-v1.5").unwrap();
        assert_eq!(dim, 768);
    }

    #[test]
    fn test_model_is_shareable_across_workers() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<FastEmbedModel>();
    }

    #[test]
    fn test_resolve_unknown_model_is_config_error() {
        assert!(matches!(
            resolve("my-private-model"),
            Err(EmbeddingError::Config(_))
        ));
    }
}
