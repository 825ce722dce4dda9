//! Shared test utilities for the embedding gateway
//!
//! This crate provides reusable fixtures for domain and app tests:
//! - `StaticModel`: deterministic fake model with a chosen dimension
//! - `FailingModel`: a model whose every call fails
//! - `TestDataBuilder`: deterministic input texts derived from a test name
//! - `assertions`: metric snapshot assertions
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{StaticModel, TestDataBuilder, service_with};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let service = service_with(StaticModel::new(8));
//!     let texts = TestDataBuilder::from_test_name("my_test").texts(3);
//! }
//! ```

use std::sync::Arc;

use domain_embedding::{
    EmbeddingError, EmbeddingModel, EmbeddingResult, EmbeddingService, InferencePool, ModelInfo,
};
use observability::MetricsRegistry;

/// Name reported by the fake models.
pub const FAKE_MODEL: &str = "fake-model";

/// Deterministic model: each value is derived from the text bytes and position.
#[derive(Debug, Clone)]
pub struct StaticModel {
    dimension: usize,
}

impl StaticModel {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    pub fn vector_for(&self, text: &str) -> Vec<f64> {
        let seed = text
            .bytes()
            .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        (0..self.dimension)
            .map(|i| ((seed.wrapping_add(i as u64 * 7919)) % 1000) as f64 / 1000.0)
            .collect()
    }
}

impl EmbeddingModel for StaticModel {
    fn info(&self) -> ModelInfo {
        ModelInfo::new(FAKE_MODEL, self.dimension)
    }

    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f64>> {
        Ok(self.vector_for(text))
    }

    fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f64>>> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }
}

/// Model whose every inference fails with an internal error.
#[derive(Debug, Clone)]
pub struct FailingModel {
    dimension: usize,
    reason: String,
}

impl FailingModel {
    pub fn new(dimension: usize, reason: impl Into<String>) -> Self {
        Self {
            dimension,
            reason: reason.into(),
        }
    }
}

impl EmbeddingModel for FailingModel {
    fn info(&self) -> ModelInfo {
        ModelInfo::new(FAKE_MODEL, self.dimension)
    }

    fn embed(&self, _text: &str) -> EmbeddingResult<Vec<f64>> {
        Err(EmbeddingError::internal(self.reason.clone()))
    }

    fn embed_batch(&self, _texts: &[String]) -> EmbeddingResult<Vec<Vec<f64>>> {
        Err(EmbeddingError::internal(self.reason.clone()))
    }
}

/// Contract over `model` with a small inference pool.
pub fn service_with(model: impl EmbeddingModel + 'static) -> Arc<EmbeddingService> {
    Arc::new(EmbeddingService::new(Arc::new(model), InferencePool::new(2)))
}

/// Fresh, isolated metrics registry.
pub fn test_metrics() -> Arc<MetricsRegistry> {
    Arc::new(MetricsRegistry::new().unwrap_or_else(|e| panic!("metrics registry: {e}")))
}

/// Builder for test data with deterministic content
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_embed_batch");
    /// assert_eq!(builder.texts(3).len(), 3);
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A non-empty text unique to this builder and index
    pub fn text(&self, index: usize) -> String {
        format!("test sentence {} number {}", self.seed, index)
    }

    pub fn texts(&self, count: usize) -> Vec<String> {
        (0..count).map(|i| self.text(i)).collect()
    }
}

/// Test assertion helpers
pub mod assertions {
    use observability::snapshot::sample_value;

    /// Assert the value of one sample in a Prometheus export
    pub fn assert_sample(export: &str, name: &str, labels: &[(&str, &str)], expected: f64) {
        let actual = sample_value(export, name, labels);
        assert_eq!(
            actual,
            Some(expected),
            "{name}{labels:?}: expected {expected}, got {actual:?}\n{export}"
        );
    }

    /// Assert two vectors are bit-for-bit identical
    pub fn assert_same_vector(actual: &[f64], expected: &[f64], context: &str) {
        assert_eq!(actual.len(), expected.len(), "{context}: length differs");
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert_eq!(a.to_bits(), e.to_bits(), "{context}: element {i} differs");
        }
    }
}
