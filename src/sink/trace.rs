//! Trace sink: the indented, line-oriented rendering of a session.

use std::fmt::{Display, Write};

use crate::config::WriterConfig;

/// Append-only text buffer with one line per record.
///
/// A record starts with a line break (except the first) followed by the
/// indentation prefix repeated `depth` times. Further tokens on the same
/// record are joined by the separator.
#[derive(Debug, Clone)]
pub struct TraceSink {
    buf: String,
    indent_symbol: String,
    separator: String,
    enabled: bool,
    has_records: bool,
}

impl Default for TraceSink {
    fn default() -> Self {
        Self::new(&WriterConfig::default())
    }
}

impl TraceSink {
    /// Create a sink laid out according to `config`.
    pub fn new(config: &WriterConfig) -> Self {
        Self {
            buf: String::new(),
            indent_symbol: config.indent_symbol.clone(),
            separator: config.token_separator.clone(),
            enabled: config.record_trace,
            has_records: false,
        }
    }

    /// Append a token.
    ///
    /// With `fresh_record` set the token opens a new line at `depth`;
    /// otherwise it continues the current line.
    pub fn push_token(&mut self, depth: usize, fresh_record: bool, token: impl Display) {
        if !self.enabled {
            return;
        }

        if fresh_record {
            if self.has_records {
                self.buf.push('\n');
            }
            for _ in 0..depth {
                self.buf.push_str(&self.indent_symbol);
            }
            self.has_records = true;
        } else {
            self.buf.push_str(&self.separator);
        }

        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{token}");
    }

    /// Whether tokens are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Trace text so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume into the trace text.
    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_and_indentation() {
        let mut sink = TraceSink::default();
        sink.push_token(0, true, "Order");
        sink.push_token(1, true, "id");
        sink.push_token(1, false, 7);
        sink.push_token(2, true, "deep");
        assert_eq!(sink.as_str(), "Order\n\tid\t7\n\t\tdeep");
    }

    #[test]
    fn test_custom_layout() {
        let config = WriterConfig::default()
            .with_indent_symbol("  ")
            .with_token_separator(" = ");
        let mut sink = TraceSink::new(&config);
        sink.push_token(0, true, "map");
        sink.push_token(1, true, "a");
        sink.push_token(1, false, 1);
        assert_eq!(sink.as_str(), "map\n  a = 1");
    }

    #[test]
    fn test_disabled_records_nothing() {
        let mut sink = TraceSink::new(&WriterConfig::default().without_trace());
        sink.push_token(0, true, "ignored");
        assert!(sink.as_str().is_empty());
        assert!(!sink.is_enabled());
    }

    #[test]
    fn test_empty_first_record_still_breaks_next_line() {
        let mut sink = TraceSink::default();
        sink.push_token(0, true, "");
        sink.push_token(0, true, "next");
        assert_eq!(sink.as_str(), "\nnext");
    }
}
