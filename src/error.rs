//! Errors raised while hashing.
//!
//! Every error is fatal for the session that raised it and carries the trace
//! accumulated up to the failure, which is the main tool for working out why
//! a value could not be hashed.

/// Error raised by a hashing session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// The value is not a primitive, composite, mapping or sequence.
    #[error("Unrecognized type {type_name}\n{trace}")]
    UnsupportedType {
        /// Name of the offending type.
        type_name: String,
        /// Trace up to the failure.
        trace: String,
    },

    /// Mapping keys cannot be put in a total order.
    #[error("Mapping keys of {type_name} are not mutually comparable\n{trace}")]
    IncomparableMappingKeys {
        /// Name of the mapping type.
        type_name: String,
        /// Trace up to the failure.
        trace: String,
    },

    /// A mapping key sorted fine but has no primitive encoding.
    #[error("Mapping key must be primitive. Got {key_type}\n{trace}")]
    NonPrimitiveMappingKey {
        /// Name of the key's type.
        key_type: String,
        /// Trace up to the failure.
        trace: String,
    },

    /// Nesting went deeper than the configured limit.
    #[error("Nesting depth exceeded limit of {limit}\n{trace}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
        /// Trace up to the failure.
        trace: String,
    },

    /// A composite reported its own failure while describing itself.
    #[error("Failed to describe {type_name}: {reason}\n{trace}")]
    Describe {
        /// Name of the composite.
        type_name: String,
        /// What went wrong.
        reason: String,
        /// Trace up to the failure.
        trace: String,
    },

    /// The session already failed and accepts no further writes.
    #[error("Hash session already failed\n{trace}")]
    SessionFailed {
        /// Trace as preserved at the original failure.
        trace: String,
    },
}

impl HashError {
    /// Trace captured when the error was raised.
    pub fn trace(&self) -> &str {
        match self {
            Self::UnsupportedType { trace, .. }
            | Self::IncomparableMappingKeys { trace, .. }
            | Self::NonPrimitiveMappingKey { trace, .. }
            | Self::DepthLimitExceeded { trace, .. }
            | Self::Describe { trace, .. }
            | Self::SessionFailed { trace } => trace,
        }
    }

    /// Short stable name of the error kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "unsupported_type",
            Self::IncomparableMappingKeys { .. } => "incomparable_mapping_keys",
            Self::NonPrimitiveMappingKey { .. } => "non_primitive_mapping_key",
            Self::DepthLimitExceeded { .. } => "depth_limit_exceeded",
            Self::Describe { .. } => "describe",
            Self::SessionFailed { .. } => "session_failed",
        }
    }
}
