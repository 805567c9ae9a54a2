//! Hash sessions and digest finalization.
//!
//! A [`HashSession`] owns one writer for one top-level computation. Values
//! are written into it, then [`HashSession::finalize`] consumes it, runs the
//! digest function over the whole canonical byte stream and returns the
//! digest together with the trace. Consuming the session makes writes after
//! finalization impossible.
//!
//! ## Digest Functions
//!
//! | Function | Size | Use |
//! |----------|------|-----|
//! | [`Sha256Truncated`] (default) | 16 bytes | change detection, cache keys |
//! | [`Sha256Full`] | 32 bytes | when 128 bits is not enough |
//! | [`KeyedDigest`] | 16 bytes | HMAC-SHA256, digests namespaced by a secret |
//! | [`Xxh64Digest`] | 8 bytes | in-process caches only, not cryptographic |
//! | [`FnDigest`] | any | caller-supplied function |

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use xxhash_rust::xxh64::xxh64;

use crate::config::WriterConfig;
use crate::error::HashError;
use crate::types::{ContentDigest, Trace};
use crate::value::HashValue;
use crate::writer::{SessionState, TracingHashWriter};

/// Length of the default digest in bytes.
pub const DEFAULT_DIGEST_LEN: usize = 16;

/// Function from the canonical byte stream to a fixed-size digest.
pub trait DigestFunction {
    /// Stable name, for logs.
    fn name(&self) -> &'static str;

    /// Digest the full byte stream.
    fn digest(&self, bytes: &[u8]) -> ContentDigest;
}

/// SHA-256 truncated to 128 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Truncated;

impl DigestFunction for Sha256Truncated {
    fn name(&self) -> &'static str {
        "sha256-128"
    }

    fn digest(&self, bytes: &[u8]) -> ContentDigest {
        let full = Sha256::digest(bytes);
        ContentDigest::new(&full[..DEFAULT_DIGEST_LEN])
    }
}

/// Full SHA-256.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Full;

impl DigestFunction for Sha256Full {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn digest(&self, bytes: &[u8]) -> ContentDigest {
        ContentDigest::new(Sha256::digest(bytes).to_vec())
    }
}

/// HMAC-SHA256 keyed with a caller secret, truncated to 128 bits.
///
/// Two deployments with different secrets never share digests, so one cannot
/// serve cache entries computed by the other.
#[derive(Clone)]
pub struct KeyedDigest {
    mac: Hmac<Sha256>,
}

impl KeyedDigest {
    /// Create a keyed digest from a secret (32+ bytes recommended).
    pub fn new(secret: &[u8]) -> Result<Self, hmac::digest::InvalidLength> {
        Ok(Self {
            mac: Hmac::<Sha256>::new_from_slice(secret)?,
        })
    }
}

impl std::fmt::Debug for KeyedDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedDigest").finish_non_exhaustive()
    }
}

impl DigestFunction for KeyedDigest {
    fn name(&self) -> &'static str {
        "hmac-sha256-128"
    }

    fn digest(&self, bytes: &[u8]) -> ContentDigest {
        let mut mac = self.mac.clone();
        mac.update(bytes);
        let result = mac.finalize().into_bytes();
        ContentDigest::new(&result[..DEFAULT_DIGEST_LEN])
    }
}

/// xxh64 of the byte stream, big-endian.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh64Digest {
    /// Hash seed.
    pub seed: u64,
}

impl DigestFunction for Xxh64Digest {
    fn name(&self) -> &'static str {
        "xxh64"
    }

    fn digest(&self, bytes: &[u8]) -> ContentDigest {
        ContentDigest::new(xxh64(bytes, self.seed).to_be_bytes().to_vec())
    }
}

/// Caller-supplied digest function.
pub struct FnDigest<F> {
    name: &'static str,
    func: F,
}

impl<F: Fn(&[u8]) -> Vec<u8>> FnDigest<F> {
    /// Wrap a function under a name used in logs.
    pub fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F: Fn(&[u8]) -> Vec<u8>> DigestFunction for FnDigest<F> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn digest(&self, bytes: &[u8]) -> ContentDigest {
        ContentDigest::new((self.func)(bytes))
    }
}

/// Result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashOutcome {
    /// The digest.
    pub digest: ContentDigest,
    /// Trace of everything that was digested.
    pub trace: Trace,
    /// Length of the canonical byte stream.
    pub byte_len: usize,
}

/// One top-level digest computation.
#[derive(Debug)]
pub struct HashSession<D: DigestFunction = Sha256Truncated> {
    writer: TracingHashWriter,
    digest_fn: D,
}

impl HashSession<Sha256Truncated> {
    /// Session with the default digest and configuration.
    pub fn new() -> Self {
        Self::with_digest(Sha256Truncated)
    }

    /// Session with the default digest and a custom configuration.
    pub fn with_config(config: &WriterConfig) -> Self {
        Self::with_digest_and_config(Sha256Truncated, config)
    }
}

impl Default for HashSession<Sha256Truncated> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DigestFunction> HashSession<D> {
    /// Session with a custom digest function.
    pub fn with_digest(digest_fn: D) -> Self {
        Self::with_digest_and_config(digest_fn, &WriterConfig::default())
    }

    /// Session with a custom digest function and configuration.
    pub fn with_digest_and_config(digest_fn: D, config: &WriterConfig) -> Self {
        Self {
            writer: TracingHashWriter::with_config(config),
            digest_fn,
        }
    }

    /// Write a value into the session.
    pub fn write_value<V: HashValue + ?Sized>(&mut self, value: &V) -> Result<(), HashError> {
        self.writer.write_value(value)
    }

    /// Direct access to the writer, for hand-built streams.
    pub fn writer(&mut self) -> &mut TracingHashWriter {
        &mut self.writer
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.writer.state()
    }

    /// Trace so far.
    pub fn trace_text(&self) -> &str {
        self.writer.trace_text()
    }

    /// Digest the canonical byte stream, consuming the session.
    pub fn finalize(self) -> Result<HashOutcome, HashError> {
        self.writer.ensure_open()?;

        let (binary, trace) = self.writer.into_parts();
        let bytes = binary.as_bytes();
        let digest = self.digest_fn.digest(bytes);

        tracing::debug!(
            digest_fn = self.digest_fn.name(),
            byte_len = bytes.len(),
            digest = %digest,
            "Hash session finalized"
        );

        Ok(HashOutcome {
            digest,
            trace: Trace::new(trace.into_string()),
            byte_len: bytes.len(),
        })
    }
}

/// Digest a value with the default digest function.
pub fn compute_hash<V: HashValue + ?Sized>(value: &V) -> Result<ContentDigest, HashError> {
    compute_hash_with_trace(value).map(|outcome| outcome.digest)
}

/// Digest a value and keep the trace.
pub fn compute_hash_with_trace<V: HashValue + ?Sized>(value: &V) -> Result<HashOutcome, HashError> {
    let mut session = HashSession::new();
    session.write_value(value)?;
    session.finalize()
}

/// Digest a value with a custom digest function and configuration.
pub fn compute_hash_with<V, D>(
    value: &V,
    digest_fn: D,
    config: &WriterConfig,
) -> Result<HashOutcome, HashError>
where
    V: HashValue + ?Sized,
    D: DigestFunction,
{
    let mut session = HashSession::with_digest_and_config(digest_fn, config);
    session.write_value(value)?;
    session.finalize()
}

/// Method-call form of [`compute_hash`].
pub trait ContentHashExt: HashValue {
    /// Digest with the default digest function.
    fn content_hash(&self) -> Result<ContentDigest, HashError> {
        compute_hash(self)
    }

    /// Digest and trace with the default digest function.
    fn content_hash_with_trace(&self) -> Result<HashOutcome, HashError> {
        compute_hash_with_trace(self)
    }
}

impl<T: HashValue + ?Sized> ContentHashExt for T {}
