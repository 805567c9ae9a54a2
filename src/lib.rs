//! # content-hash-kernel
//!
//! Deterministic, platform-independent digests over in-memory object graphs,
//! with a human-readable trace of exactly what was fed into the digest.
//!
//! The kernel answers one question:
//!
//! > Did two runs, possibly on different machines, observe **the same** data?
//!
//! and, when the answer is unexpectedly "no", shows where they diverged.
//!
//! ## Architecture
//!
//! ```text
//! value → ValueKind dispatch → TracingHashWriter ─┬→ TraceSink  → Trace
//!              ↑      │                           └→ BinarySink → DigestFunction → ContentDigest
//!              └──────┘ (composites, mappings, sequences recurse)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same value → identical digest and identical trace, in any process
//! - Mapping entries are ordered by key, never by insertion or iteration order
//! - Sequence order is preserved and significant
//! - Strings hash through a fixed recurrence, not the host's string hasher
//! - Composite type names are digested; container labels (`dict`, `list`) are not
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use content_hash_kernel::compute_hash_with_trace;
//!
//! let mut prices = HashMap::new();
//! prices.insert("pear".to_string(), 3i64);
//! prices.insert("apple".to_string(), 2i64);
//!
//! let outcome = compute_hash_with_trace(&prices).unwrap();
//! assert_eq!(outcome.trace.lines(), vec!["dict", "\tapple\t2", "\tpear\t3"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod finalizer;
pub mod sink;
pub mod stable_hash;
pub mod types;
pub mod value;
pub mod writer;

// Re-exports
pub use config::WriterConfig;
pub use error::HashError;
pub use finalizer::{
    compute_hash, compute_hash_with, compute_hash_with_trace, ContentHashExt, DigestFunction,
    FnDigest, HashOutcome, HashSession, KeyedDigest, Sha256Full, Sha256Truncated, Xxh64Digest,
    DEFAULT_DIGEST_LEN,
};
pub use sink::{BinarySink, TraceSink};
pub use stable_hash::platform_independent_hash;
pub use types::{ContentDigest, Decimal, DecimalError, Primitive, Trace};
pub use value::{Describe, HashValue, MapEntries, RawBytes, RawChars, SeqItems, ValueKind};
pub use writer::{IndentGuard, LineWriter, SessionState, TracingHashWriter};

/// Version of the canonical encoding.
/// Increment on any change that alters the bytes produced for a value.
pub const CANONICAL_ENCODING_VERSION: &str = "1.0.0";
