use serde::{Deserialize, Serialize};

/// Status string reported by every health surface.
pub const HEALTHY: &str = "healthy";

/// Identity of a loaded model. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub dimension: usize,
}

impl ModelInfo {
    pub fn new(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            dimension,
        }
    }
}

/// A single embedding produced by the contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub vector: Vec<f64>,
    pub dimension: usize,
    /// Model-only inference time.
    pub inference_time_ms: f64,
}

/// Embeddings for a batch, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEmbedding {
    pub vectors: Vec<Vec<f64>>,
    pub count: usize,
    pub dimension: usize,
    pub inference_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub model: String,
    pub embedding_dimension: usize,
}

impl HealthStatus {
    pub fn healthy(model: impl Into<String>, embedding_dimension: usize) -> Self {
        Self {
            status: HEALTHY.to_string(),
            model: model.into(),
            embedding_dimension,
        }
    }
}

impl From<&ModelInfo> for HealthStatus {
    fn from(info: &ModelInfo) -> Self {
        HealthStatus::healthy(info.name.clone(), info.dimension)
    }
}

/// Clamp a dimension or count into the signed 32-bit range used on the wire.
pub(crate) fn wire_int(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_from_info() {
        let info = ModelInfo::new("all-MiniLM-L6-v2", 384);
        let health = HealthStatus::from(&info);
        assert_eq!(health.status, "healthy");
        assert_eq!(health.model, "all-MiniLM-L6-v2");
        assert_eq!(health.embedding_dimension, 384);
    }

    #[test]
    fn test_wire_int_saturates() {
        assert_eq!(wire_int(384), 384);
        assert_eq!(wire_int(usize::MAX), i32::MAX);
    }
}
