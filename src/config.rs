//! Writer configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`TracingHashWriter`](crate::TracingHashWriter).
///
/// Only the trace layout and the optional depth guard are configurable. The
/// canonical byte stream, and therefore the digest, is the same under every
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Prefix repeated once per nesting level at the start of a record.
    pub indent_symbol: String,
    /// Separator between tokens of the same record.
    pub token_separator: String,
    /// Whether to build the trace at all.
    pub record_trace: bool,
    /// Maximum nesting depth, `None` for unbounded.
    pub max_depth: Option<usize>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent_symbol: "\t".to_string(),
            token_separator: "\t".to_string(),
            record_trace: true,
            max_depth: None,
        }
    }
}

impl WriterConfig {
    /// Set the indentation prefix.
    pub fn with_indent_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.indent_symbol = symbol.into();
        self
    }

    /// Set the token separator.
    pub fn with_token_separator(mut self, separator: impl Into<String>) -> Self {
        self.token_separator = separator.into();
        self
    }

    /// Skip building the trace (digest only).
    pub fn without_trace(mut self) -> Self {
        self.record_trace = false;
        self
    }

    /// Fail once nesting exceeds `limit` levels.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WriterConfig::default();
        assert_eq!(config.indent_symbol, "\t");
        assert_eq!(config.token_separator, "\t");
        assert!(config.record_trace);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: WriterConfig =
            serde_json::from_str(r#"{"indent_symbol": "  ", "max_depth": 64}"#).unwrap();
        assert_eq!(config.indent_symbol, "  ");
        assert_eq!(config.token_separator, "\t");
        assert_eq!(config.max_depth, Some(64));
    }

    #[test]
    fn test_builder() {
        let config = WriterConfig::default()
            .with_indent_symbol("..")
            .with_token_separator(" ")
            .without_trace()
            .with_max_depth(8);
        assert_eq!(config.indent_symbol, "..");
        assert_eq!(config.token_separator, " ");
        assert!(!config.record_trace);
        assert_eq!(config.max_depth, Some(8));
    }
}
