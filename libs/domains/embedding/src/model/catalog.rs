/// Model used when `EMBEDDING_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

const KNOWN_MODELS: &[(&str, usize)] = &[
    ("all-MiniLM-L6-v2", 384),
    ("all-MiniLM-L12-v2", 384),
    ("bge-small-en-v1.5", 384),
    ("bge-base-en-v1.5", 768),
    ("nomic-embed-text-v1.5", 768),
];

/// Known model names and the vector dimension each one produces.
pub struct ModelCatalog;

impl ModelCatalog {
    /// Dimension for a known model. Lookup ignores case and an
    /// optional `sentence-transformers/` or `BAAI/` style org prefix.
    pub fn dimension(name: &str) -> Option<usize> {
        let key = Self::canonical(name);
        KNOWN_MODELS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(key))
            .map(|(_, dim)| *dim)
    }

    pub fn known() -> &'static [(&'static str, usize)] {
        KNOWN_MODELS
    }

    pub(crate) fn canonical(name: &str) -> &str {
        let name = name.trim();
        name.rsplit_once('/').map_or(name, |(_, tail)| tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_384() {
        assert_eq!(ModelCatalog::dimension(DEFAULT_MODEL), Some(384));
    }

    #[test]
    fn test_org_prefix_and_case_are_ignored() {
        assert_eq!(
            ModelCatalog::dimension("sentence-transformers/all-MiniLM-L6-v2"),
            Some(384)
        );
        assert_eq!(ModelCatalog::dimension("BAAI/BGE-BASE-EN-V1.5"), Some(768));
    }

    #[test]
    fn test_unknown_model() {
        assert_eq!(ModelCatalog::dimension("my-private-model"), None);
        assert_eq!(ModelCatalog::known().len(), 5);
    }
}
