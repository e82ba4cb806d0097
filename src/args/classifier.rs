//! Argument classifier: one raw argument → one classified argument.

/// A classified raw argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedArg {
    /// `--name` or `--name=value`.
    Long {
        name: String,
        value: Option<String>,
    },
    /// `-abc`: the first character, followed by the rest of the cluster.
    ShortCluster { first: char, rest: Vec<char> },
    /// Anything not introduced by a dash (and a lone `-`).
    Value(String),
}

/// Classify a single raw argument.
///
/// Rules are checked in order: no leading dash is a bare value, a leading
/// `--` is a long flag (split at the first `=`), a single leading dash is a
/// short-flag cluster.
pub fn classify(raw: &str) -> ClassifiedArg {
    if let Some(body) = raw.strip_prefix("--") {
        return match body.split_once('=') {
            Some((name, value)) => ClassifiedArg::Long {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
            None => ClassifiedArg::Long {
                name: body.to_string(),
                value: None,
            },
        };
    }

    if let Some(body) = raw.strip_prefix('-') {
        let mut chars = body.chars();
        if let Some(first) = chars.next() {
            return ClassifiedArg::ShortCluster {
                first,
                rest: chars.collect(),
            };
        }
    }

    ClassifiedArg::Value(raw.to_string())
}
