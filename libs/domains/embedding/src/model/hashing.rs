use sha2::{Digest, Sha256};

use super::EmbeddingModel;
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::ModelInfo;

const WORD_WEIGHT: f64 = 1.0;
const TRIGRAM_WEIGHT: f64 = 0.5;

/// Deterministic offline embedder based on signed feature hashing.
///
/// Lower-cased alphanumeric words and their character trigrams are hashed
/// with SHA-256 into `dimension` buckets, then the vector is L2-normalised.
/// Text without any token embeds to the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    info: ModelInfo,
}

impl HashingEmbedder {
    pub fn new(name: impl Into<String>, dimension: usize) -> EmbeddingResult<Self> {
        if dimension == 0 {
            return Err(EmbeddingError::Config(
                "embedding dimension must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            info: ModelInfo::new(name, dimension),
        })
    }

    fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.info.dimension];
        let lowered = text.to_lowercase();

        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            self.accumulate(&mut vector, b'w', word, WORD_WEIGHT);

            let padded: Vec<char> = std::iter::once('<')
                .chain(word.chars())
                .chain(std::iter::once('>'))
                .collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                self.accumulate(&mut vector, b't', &trigram, TRIGRAM_WEIGHT);
            }
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }

    fn accumulate(&self, vector: &mut [f64], kind: u8, token: &str, weight: f64) {
        let digest = Sha256::new()
            .chain_update([kind, 0])
            .chain_update(token.as_bytes())
            .finalize();

        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(head) % vector.len() as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }
}

impl EmbeddingModel for HashingEmbedder {
    fn info(&self) -> ModelInfo {
        self.info.clone()
    }

    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f64>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> EmbeddingResult<Vec<Vec<f64>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }
}
