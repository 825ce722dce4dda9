use crate::models::{BatchEmbedding, Embedding, HealthStatus, wire_int};

// Import generated proto types
use rpc::embedding::v1::{
    BatchEmbedResponse, EmbedResponse, EmbeddingVector, HealthCheckResponse,
};

// ===== Single embedding =====

impl From<Embedding> for EmbedResponse {
    fn from(embedding: Embedding) -> Self {
        EmbedResponse {
            dimension: wire_int(embedding.dimension),
            embedding: embedding.vector,
            inference_time_ms: embedding.inference_time_ms,
        }
    }
}

// ===== Batch =====

impl From<BatchEmbedding> for BatchEmbedResponse {
    fn from(batch: BatchEmbedding) -> Self {
        BatchEmbedResponse {
            count: wire_int(batch.count),
            dimension: wire_int(batch.dimension),
            inference_time_ms: batch.inference_time_ms,
            embeddings: batch
                .vectors
                .into_iter()
                .map(|values| EmbeddingVector { values })
                .collect(),
        }
    }
}

impl From<BatchEmbedResponse> for BatchEmbedding {
    fn from(proto: BatchEmbedResponse) -> Self {
        BatchEmbedding {
            count: proto.count.max(0) as usize,
            dimension: proto.dimension.max(0) as usize,
            inference_time_ms: proto.inference_time_ms,
            vectors: proto.embeddings.into_iter().map(|v| v.values).collect(),
        }
    }
}

// ===== Health =====

impl From<HealthStatus> for HealthCheckResponse {
    fn from(health: HealthStatus) -> Self {
        HealthCheckResponse {
            status: health.status,
            model: health.model,
            embedding_dimension: wire_int(health.embedding_dimension),
        }
    }
}

impl From<HealthCheckResponse> for HealthStatus {
    fn from(proto: HealthCheckResponse) -> Self {
        HealthStatus {
            status: proto.status,
            model: proto.model,
            embedding_dimension: proto.embedding_dimension.max(0) as usize,
        }
    }
}
