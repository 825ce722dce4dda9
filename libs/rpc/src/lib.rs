//! Protobuf messages and tonic client/server stubs for the embedding API.
//!
//! Sources live in `proto/`; the generated code under `src/generated/` is
//! committed so consumers build without `protoc`.

pub mod embedding {
    pub mod v1 {
        include!("generated/embedding/v1/embedding.v1.rs");
        // embedding.v1.tonic.rs is auto-included by embedding.v1.rs
    }
}

#[cfg(test)]
mod tests {
    use super::embedding::v1::*;
    use prost::Message;

    #[test]
    fn test_service_name() {
        assert_eq!(
            embedding_service_server::SERVICE_NAME,
            "embedding.v1.EmbeddingService"
        );
    }

    #[test]
    fn test_doubles_survive_the_wire_unchanged() {
        let response = EmbedResponse {
            embedding: vec![0.1, -0.25, 1.0 / 3.0],
            dimension: 3,
            inference_time_ms: 1.5,
        };

        let decoded = EmbedResponse::decode(response.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, response);
        assert_eq!(decoded.embedding[2].to_bits(), (1.0f64 / 3.0).to_bits());
    }

    #[test]
    fn test_empty_batch_request_decodes_to_empty_list() {
        let decoded = BatchEmbedRequest::decode(&[][..]).unwrap();
        assert!(decoded.texts.is_empty());
    }
}
