//! Minimal reader for the Prometheus text format, used by tests and
//! operators poking at `/metrics` output.

/// Return the value of the first sample named `name` whose labels include
/// every `(key, value)` pair in `labels`.
///
/// Comment lines are skipped. Only exact sample names match, so pass the
/// suffixed name (`..._count`, `..._sum`) for histogram series.
pub fn sample_value(export: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    export
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(parse_line)
        .find(|sample| {
            sample.name == name
                && labels
                    .iter()
                    .all(|(k, v)| sample.labels.iter().any(|(sk, sv)| sk == k && sv == v))
        })
        .map(|sample| sample.value)
}

struct Sample {
    name: String,
    labels: Vec<(String, String)>,
    value: f64,
}

fn parse_line(line: &str) -> Option<Sample> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (series, value) = line.rsplit_once(' ')?;
    let value = value.parse().ok()?;

    let Some((name, rest)) = series.split_once('{') else {
        return Some(Sample {
            name: series.to_string(),
            labels: Vec::new(),
            value,
        });
    };

    let body = rest.strip_suffix('}')?;
    Some(Sample {
        name: name.to_string(),
        labels: parse_labels(body),
        value,
    })
}

fn parse_labels(body: &str) -> Vec<(String, String)> {
    let mut labels = Vec::new();
    let mut chars = body.chars().peekable();

    loop {
        let key: String = chars.by_ref().take_while(|c| *c != '=').collect();
        if key.is_empty() || chars.next() != Some('"') {
            break;
        }

        let mut value = String::new();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('n') => value.push('\n'),
                    Some(other) => value.push(other),
                    None => break,
                },
                '"' => break,
                c => value.push(c),
            }
        }

        labels.push((key.trim_start_matches(',').to_string(), value));
        if chars.peek() == Some(&',') {
            chars.next();
        }
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"# HELP embedding_requests_total Total number of embedding API requests
# TYPE embedding_requests_total counter
embedding_requests_total{protocol="rest",method="POST",endpoint="/embed",status="200"} 3
embedding_requests_total{protocol="grpc",method="Embed",endpoint="embedding.v1.EmbeddingService",status="OK"} 2
embedding_request_duration_seconds_count{protocol="rest",method="POST",endpoint="/embed"} 3
process_up 1
"#;

    #[test]
    fn test_sample_value_matches_label_subset() {
        assert_eq!(
            sample_value(EXPORT, "embedding_requests_total", &[("protocol", "grpc")]),
            Some(2.0)
        );
        assert_eq!(
            sample_value(
                EXPORT,
                "embedding_request_duration_seconds_count",
                &[("endpoint", "/embed")]
            ),
            Some(3.0)
        );
    }

    #[test]
    fn test_sample_value_without_labels() {
        assert_eq!(sample_value(EXPORT, "process_up", &[]), Some(1.0));
    }

    #[test]
    fn test_sample_value_missing() {
        assert_eq!(
            sample_value(EXPORT, "embedding_requests_total", &[("protocol", "graphql")]),
            None
        );
    }

    #[test]
    fn test_escaped_label_values() {
        let export = "x{path=\"a\\\"b\",status=\"200\"} 7\n";
        assert_eq!(sample_value(export, "x", &[("path", "a\"b")]), Some(7.0));
        assert_eq!(sample_value(export, "x", &[("status", "200")]), Some(7.0));
    }
}
