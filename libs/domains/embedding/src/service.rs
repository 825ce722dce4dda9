use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{EMPTY_BATCH, EMPTY_TEXT, EmbeddingError, EmbeddingResult};
use crate::model::EmbeddingModel;
use crate::models::{BatchEmbedding, Embedding, HealthStatus, ModelInfo};
use crate::pool::InferencePool;

/// The embedding contract every protocol adapter is written against.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingContract: Send + Sync {
    /// Embed one non-empty text.
    async fn embed(&self, text: &str) -> EmbeddingResult<Embedding>;

    /// Embed a non-empty batch. `vectors[i]` belongs to `texts[i]`.
    async fn embed_batch(&self, texts: Vec<String>) -> EmbeddingResult<BatchEmbedding>;

    fn dimension(&self) -> usize;

    fn model_name(&self) -> String;
}

/// Health as reported by every adapter for a given contract.
pub fn health(contract: &dyn EmbeddingContract) -> HealthStatus {
    HealthStatus::healthy(contract.model_name(), contract.dimension())
}

/// Contract implementation over a loaded model and an inference pool.
pub struct EmbeddingService {
    model: Arc<dyn EmbeddingModel>,
    info: ModelInfo,
    pool: InferencePool,
}

impl EmbeddingService {
    pub fn new(model: Arc<dyn EmbeddingModel>, pool: InferencePool) -> Self {
        let info = model.info();
        tracing::info!(
            model = %info.name,
            dimension = info.dimension,
            workers = pool.size(),
            "Embedding service ready"
        );
        Self { model, info, pool }
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus::from(&self.info)
    }

    fn check_vector(&self, vector: &[f64]) -> EmbeddingResult<()> {
        if vector.len() != self.info.dimension {
            return Err(EmbeddingError::internal(format!(
                "model returned {} values, expected {}",
                vector.len(),
                self.info.dimension
            )));
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(EmbeddingError::internal("model returned a non-finite value"));
        }
        Ok(())
    }
}

fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

#[async_trait]
impl EmbeddingContract for EmbeddingService {
    async fn embed(&self, text: &str) -> EmbeddingResult<Embedding> {
        if text.is_empty() {
            tracing::warn!("Rejected embed request: {}", EMPTY_TEXT);
            return Err(EmbeddingError::validation(EMPTY_TEXT));
        }

        let model = self.model.clone();
        let text = text.to_owned();
        let (vector, elapsed) = self
            .pool
            .run(move || {
                let start = Instant::now();
                let vector = model.embed(&text)?;
                Ok((vector, start.elapsed()))
            })
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Embedding failed"))?;

        self.check_vector(&vector)?;
        let inference_time_ms = millis(elapsed);
        tracing::debug!(inference_time_ms, "Embedded text");

        Ok(Embedding {
            vector,
            dimension: self.info.dimension,
            inference_time_ms,
        })
    }

    async fn embed_batch(&self, texts: Vec<String>) -> EmbeddingResult<BatchEmbedding> {
        if texts.is_empty() {
            tracing::warn!("Rejected batch request: {}", EMPTY_BATCH);
            return Err(EmbeddingError::validation(EMPTY_BATCH));
        }

        let expected = texts.len();
        let model = self.model.clone();
        let (vectors, elapsed) = self
            .pool
            .run(move || {
                let start = Instant::now();
                let vectors = model.embed_batch(&texts)?;
                Ok((vectors, start.elapsed()))
            })
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Batch embedding failed"))?;

        if vectors.len() != expected {
            return Err(EmbeddingError::internal(format!(
                "model returned {} embeddings for {} texts",
                vectors.len(),
                expected
            )));
        }
        for vector in &vectors {
            self.check_vector(vector)?;
        }

        let inference_time_ms = millis(elapsed);
        tracing::debug!(count = expected, inference_time_ms, "Embedded batch");

        Ok(BatchEmbedding {
            count: vectors.len(),
            vectors,
            dimension: self.info.dimension,
            inference_time_ms,
        })
    }

    fn dimension(&self) -> usize {
        self.info.dimension
    }

    fn model_name(&self) -> String {
        self.info.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HashingEmbedder, MockEmbeddingModel};

    fn mock_model(dimension: usize) -> MockEmbeddingModel {
        let mut model = MockEmbeddingModel::new();
        model
            .expect_info()
            .returning(move || ModelInfo::new("mock-model", dimension));
        model
    }

    fn service(model: impl EmbeddingModel + 'static) -> EmbeddingService {
        EmbeddingService::new(Arc::new(model), InferencePool::new(2))
    }

    #[tokio::test]
    async fn test_embed_hello_world() {
        let svc = service(HashingEmbedder::new("all-MiniLM-L6-v2", 384).unwrap());
        let result = svc.embed("hello world").await.unwrap();
        assert_eq!(result.vector.len(), 384);
        assert_eq!(result.dimension, 384);
        assert!(result.inference_time_ms.is_finite());
        assert!(result.inference_time_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_embed_empty_text_never_reaches_model() {
        let mut model = mock_model(4);
        model.expect_embed().never();
        let svc = service(model);

        let err = svc.embed("").await.unwrap_err();
        assert_eq!(err, EmbeddingError::Validation("Text cannot be empty".into()));
    }

    #[tokio::test]
    async fn test_embed_batch_empty_is_validation() {
        let mut model = mock_model(4);
        model.expect_embed_batch().never();
        let svc = service(model);

        let err = svc.embed_batch(vec![]).await.unwrap_err();
        assert_eq!(
            err,
            EmbeddingError::Validation("Texts list cannot be empty".into())
        );
    }

    #[tokio::test]
    async fn test_embed_batch_allows_empty_elements_and_keeps_order() {
        let svc = service(HashingEmbedder::new("m", 16).unwrap());
        let texts: Vec<String> = ["a", "", "c"].iter().map(|s| s.to_string()).collect();

        let batch = svc.embed_batch(texts).await.unwrap();
        assert_eq!(batch.count, 3);
        assert_eq!(batch.vectors.len(), 3);
        assert_eq!(batch.vectors[0], svc.embed("a").await.unwrap().vector);
        assert!(batch.vectors[1].iter().all(|v| *v == 0.0));
        assert_eq!(batch.vectors[2], svc.embed("c").await.unwrap().vector);
    }

    #[tokio::test]
    async fn test_model_failure_is_internal() {
        let mut model = mock_model(4);
        model
            .expect_embed()
            .returning(|_| Err(EmbeddingError::internal("onnx failure")));
        let svc = service(model);

        let err = svc.embed("hello").await.unwrap_err();
        assert!(!err.is_validation());
        assert_eq!(err, EmbeddingError::internal("onnx failure"));
    }

    #[tokio::test]
    async fn test_wrong_length_vector_is_internal() {
        let mut model = mock_model(4);
        model.expect_embed().returning(|_| Ok(vec![0.1, 0.2]));
        let svc = service(model);

        let err = svc.embed("hello").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Internal(_)));
    }

    #[tokio::test]
    async fn test_non_finite_vector_is_internal() {
        let mut model = mock_model(2);
        model.expect_embed().returning(|_| Ok(vec![f64::NAN, 0.0]));
        let svc = service(model);

        assert!(matches!(
            svc.embed("hello").await,
            Err(EmbeddingError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_dropped_batch_element_is_internal() {
        let mut model = mock_model(2);
        model
            .expect_embed_batch()
            .returning(|_| Ok(vec![vec![1.0, 0.0]]));
        let svc = service(model);

        let err = svc
            .embed_batch(vec!["a".into(), "b".into()])
            .await
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::Internal(_)));
    }

    #[tokio::test]
    async fn test_accessors_and_health() {
        let svc = service(mock_model(8));
        assert_eq!(svc.dimension(), 8);
        assert_eq!(svc.model_name(), "mock-model");

        let health = health(&svc);
        assert_eq!(health.status, "healthy");
        assert_eq!(health, svc.health());
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let svc = service(HashingEmbedder::new("m", 32).unwrap());
        let first = svc.embed("same text").await.unwrap();
        let second = svc.embed("same text").await.unwrap();
        assert_eq!(first.vector, second.vector);
    }
}
