//! Dual writer: feeds the trace sink and the binary sink in lock-step.
//!
//! ## Records
//!
//! Every top-level write opens a new record (a new trace line) at the
//! current depth. The returned [`LineWriter`] appends further tokens to the
//! same record, so related values read as one line:
//!
//! ```rust
//! use content_hash_kernel::TracingHashWriter;
//!
//! let mut writer = TracingHashWriter::new();
//! writer.trace("point").write(3i32).write(4i32);
//! assert_eq!(writer.trace_text(), "point\t3\t4");
//! ```
//!
//! ## Labels vs. values
//!
//! [`TracingHashWriter::trace`] and [`LineWriter::trace`] write to the trace
//! only. Every other write goes to both sinks, so the trace is always a
//! faithful rendering of what entered the digest.
//!
//! ## Scopes
//!
//! [`TracingHashWriter::scope`] returns an [`IndentGuard`] that raises the
//! depth by one and lowers it again when dropped, including when an error is
//! propagated out of the scope with `?`.

use std::fmt::Display;
use std::ops::{Deref, DerefMut};

use crate::config::WriterConfig;
use crate::error::HashError;
use crate::sink::{BinarySink, TraceSink};
use crate::types::primitive::EscapedText;
use crate::types::{Primitive, Trace};

/// Lifecycle of the session a writer belongs to.
///
/// Finalization consumes the session, so there is no `Finalized` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting writes.
    Open,
    /// An error was raised; no digest will be produced.
    Failed,
}

/// Writer that records every value in both the trace and the canonical byte stream.
#[derive(Debug)]
pub struct TracingHashWriter {
    binary: BinarySink,
    trace: TraceSink,
    depth: usize,
    max_depth: Option<usize>,
    state: SessionState,
    failure_trace: Option<String>,
}

impl Default for TracingHashWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingHashWriter {
    /// Create a writer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&WriterConfig::default())
    }

    /// Create a writer with a custom configuration.
    pub fn with_config(config: &WriterConfig) -> Self {
        Self {
            binary: BinarySink::new(),
            trace: TraceSink::new(config),
            depth: 0,
            max_depth: config.max_depth,
            state: SessionState::Open,
            failure_trace: None,
        }
    }

    /// Start a new record at the current depth.
    pub fn record(&mut self) -> LineWriter<'_> {
        let depth = self.depth;
        LineWriter::new(self, depth)
    }

    /// Start a new record one level deeper than the current depth.
    pub fn indented(&mut self) -> LineWriter<'_> {
        let depth = self.depth + 1;
        LineWriter::new(self, depth)
    }

    /// Start a new record with a trace-only label.
    pub fn trace(&mut self, label: impl Display) -> LineWriter<'_> {
        let mut line = self.record();
        line.trace(label);
        line
    }

    /// Start a new record with a primitive value.
    pub fn write<'v>(&mut self, value: impl Into<Primitive<'v>>) -> LineWriter<'_> {
        let mut line = self.record();
        line.write(value);
        line
    }

    /// Enter a nested scope.
    ///
    /// Fails if the session already failed or the configured depth limit
    /// would be exceeded.
    pub fn scope(&mut self) -> Result<IndentGuard<'_>, HashError> {
        self.ensure_open()?;

        if let Some(limit) = self.max_depth {
            if self.depth >= limit {
                let err = HashError::DepthLimitExceeded {
                    limit,
                    trace: self.trace_text().to_string(),
                };
                return Err(self.fail(err, "scope"));
            }
        }

        self.depth += 1;
        tracing::trace!(depth = self.depth, "enter hash scope");
        Ok(IndentGuard { writer: self })
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Trace text so far.
    pub fn trace_text(&self) -> &str {
        self.trace.as_str()
    }

    /// Snapshot of the trace so far.
    pub fn trace_snapshot(&self) -> Trace {
        Trace::new(self.trace.as_str().to_string())
    }

    /// Canonical bytes so far.
    pub fn bytes(&self) -> &[u8] {
        self.binary.as_bytes()
    }

    /// Reject further dispatching writes on a failed session.
    pub(crate) fn ensure_open(&self) -> Result<(), HashError> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Failed => Err(HashError::SessionFailed {
                trace: self
                    .failure_trace
                    .clone()
                    .unwrap_or_else(|| self.trace.as_str().to_string()),
            }),
        }
    }

    /// Mark the session failed and hand the error back for propagation.
    pub(crate) fn fail(&mut self, err: HashError, type_name: &str) -> HashError {
        if self.state == SessionState::Open {
            tracing::warn!(
                error_kind = err.kind(),
                type_name = type_name,
                depth = self.depth,
                "Hash session failed"
            );
            self.state = SessionState::Failed;
            self.failure_trace = Some(err.trace().to_string());
        }
        err
    }

    /// Record a failure reported by user code (e.g. a composite's `describe`).
    pub fn describe_error(&mut self, type_name: &str, reason: impl Into<String>) -> HashError {
        let err = HashError::Describe {
            type_name: type_name.to_string(),
            reason: reason.into(),
            trace: self.trace.as_str().to_string(),
        };
        self.fail(err, type_name)
    }

    pub(crate) fn into_parts(self) -> (BinarySink, TraceSink) {
        (self.binary, self.trace)
    }
}

/// One trace record being built.
///
/// The first token opens the line; later tokens are appended with the
/// separator.
pub struct LineWriter<'w> {
    writer: &'w mut TracingHashWriter,
    depth: usize,
    fresh: bool,
}

impl<'w> LineWriter<'w> {
    fn new(writer: &'w mut TracingHashWriter, depth: usize) -> Self {
        Self {
            writer,
            depth,
            fresh: true,
        }
    }

    fn push_token(&mut self, token: impl Display) {
        self.writer.trace.push_token(self.depth, self.fresh, token);
        self.fresh = false;
    }

    /// Append a trace-only label.
    pub fn trace(&mut self, label: impl Display) -> &mut Self {
        if self.writer.trace.is_enabled() {
            let label = label.to_string();
            self.push_token(EscapedText(&label));
        }
        self
    }

    /// Append a primitive to both sinks.
    pub fn write<'v>(&mut self, value: impl Into<Primitive<'v>>) -> &mut Self {
        let value = value.into();
        self.push_token(value);
        self.writer.binary.write(value);
        self
    }
}

/// Guard for a nested scope; lowers the depth when dropped.
///
/// Dereferences to the writer, so nested writes go through the guard.
pub struct IndentGuard<'w> {
    writer: &'w mut TracingHashWriter,
}

impl Deref for IndentGuard<'_> {
    type Target = TracingHashWriter;

    fn deref(&self) -> &Self::Target {
        self.writer
    }
}

impl DerefMut for IndentGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.writer
    }
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        self.writer.depth -= 1;
    }
}
