use std::fmt;

/// Longest label value kept verbatim; longer values are truncated.
pub const MAX_LABEL_LEN: usize = 128;

/// Wire protocol that served a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Protocol {
    Rest,
    Grpc,
    Graphql,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Rest => "rest",
            Protocol::Grpc => "grpc",
            Protocol::Graphql => "graphql",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Make an arbitrary string safe to use as a Prometheus label value.
///
/// Control characters become `_`, surrounding whitespace is trimmed and the
/// result is capped at [`MAX_LABEL_LEN`] characters. Empty input maps to
/// `"unknown"`.
pub fn sanitize_label(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .take(MAX_LABEL_LEN)
        .collect();

    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_labels() {
        assert_eq!(Protocol::Rest.as_str(), "rest");
        assert_eq!(Protocol::Grpc.to_string(), "grpc");
        assert_eq!(Protocol::Graphql.as_str(), "graphql");
    }

    #[test]
    fn test_sanitize_passes_ordinary_values() {
        assert_eq!(sanitize_label("/embed/batch"), "/embed/batch");
        assert_eq!(
            sanitize_label("embedding.v1.EmbeddingService"),
            "embedding.v1.EmbeddingService"
        );
    }

    #[test]
    fn test_sanitize_replaces_control_characters() {
        assert_eq!(sanitize_label("a\nb\u{0}c"), "a_b_c");
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let long = "é".repeat(500);
        let out = sanitize_label(&long);
        assert_eq!(out.chars().count(), MAX_LABEL_LEN);
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_label(""), "unknown");
        assert_eq!(sanitize_label("   "), "unknown");
    }
}
