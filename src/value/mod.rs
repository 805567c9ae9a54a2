//! Value model and the traversal engine.
//!
//! ## Dispatch
//!
//! Every value reports its [`ValueKind`] once; the writer then drives the
//! canonical traversal for that kind:
//!
//! | Kind | Trace | Digested |
//! |------|-------|----------|
//! | `Primitive` | the value | canonical encoding |
//! | `Composite` | type name, then fields one level deeper | type name + fields |
//! | `Mapping` | `dict`, then sorted entries one level deeper | keys + values |
//! | `Sequence` | `list`, then items one level deeper | items |
//! | `Unrecognized` | nothing | fails with [`HashError::UnsupportedType`] |
//!
//! ## Mapping Order
//!
//! Mapping entries are always re-sorted by key, never taken in iteration
//! order, so two maps with the same content hash identically regardless of
//! how they were built. A primitive value shares its key's record; any other
//! value goes under a `value` label one level deeper.
//!
//! ## Cycles
//!
//! Traversal is plain recursion. A value graph that contains itself (only
//! possible through shared ownership) recurses until the stack overflows
//! unless [`WriterConfig::max_depth`](crate::WriterConfig::max_depth) is set.

pub mod std_impls;
pub mod json;

use crate::error::HashError;
use crate::types::Primitive;
use crate::writer::TracingHashWriter;

pub use std_impls::{RawBytes, RawChars};

/// Entries of a mapping, in arbitrary order.
pub type MapEntries<'a> = Box<dyn Iterator<Item = (&'a dyn HashValue, &'a dyn HashValue)> + 'a>;

/// Items of a sequence, in traversal order.
pub type SeqItems<'a> = Box<dyn Iterator<Item = &'a dyn HashValue> + 'a>;

/// How a value takes part in hashing.
pub enum ValueKind<'a> {
    /// One of the closed set of primitives.
    Primitive(Primitive<'a>),
    /// A value that describes its own fields.
    Composite(&'a dyn Describe),
    /// Key/value pairs; traversed in ascending key order.
    Mapping(MapEntries<'a>),
    /// Items; traversed in iteration order.
    Sequence(SeqItems<'a>),
    /// None of the above. Hashing fails.
    Unrecognized,
}

impl ValueKind<'_> {
    /// Short name of the kind, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Composite(_) => "composite",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// A value that can be fed to a [`TracingHashWriter`].
pub trait HashValue {
    /// Classify the value for traversal.
    fn kind(&self) -> ValueKind<'_>;

    /// Key used to order this value when it is a mapping key.
    ///
    /// Defaults to the value itself when it is primitive. Override to make a
    /// composite key sortable; it will still be rejected as a key at write time.
    fn sort_key(&self) -> Option<Primitive<'_>> {
        match self.kind() {
            ValueKind::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Type name reported in errors.
    fn type_label(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A composite that enumerates its own fields.
///
/// Field order is part of the digest and must be stable across runs.
///
/// ```rust
/// use content_hash_kernel::{impl_composite, compute_hash, Describe, HashError, TracingHashWriter};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Describe for Point {
///     fn type_name(&self) -> &str {
///         "Point"
///     }
///
///     fn describe(&self, writer: &mut TracingHashWriter) -> Result<(), HashError> {
///         writer.trace("x").write(self.x);
///         writer.trace("y").write(self.y);
///         Ok(())
///     }
/// }
///
/// impl_composite!(Point);
///
/// let a = compute_hash(&Point { x: 1, y: 2 }).unwrap();
/// let b = compute_hash(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(a, b);
/// ```
pub trait Describe {
    /// Type name; written as a digested label, so renaming a type changes its hash.
    fn type_name(&self) -> &str;

    /// Write each logically relevant field, in a fixed order.
    fn describe(&self, writer: &mut TracingHashWriter) -> Result<(), HashError>;
}

/// Implement [`HashValue`] for types that implement [`Describe`].
#[macro_export]
macro_rules! impl_composite {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::HashValue for $ty {
                fn kind(&self) -> $crate::ValueKind<'_> {
                    $crate::ValueKind::Composite(self)
                }
            }
        )+
    };
}

impl TracingHashWriter {
    /// Write an arbitrary value, dispatching on its kind.
    pub fn write_value<V: HashValue + ?Sized>(&mut self, value: &V) -> Result<(), HashError> {
        self.dispatch(value.kind(), value.type_label())
    }

    fn dispatch(&mut self, kind: ValueKind<'_>, type_label: &str) -> Result<(), HashError> {
        self.ensure_open()?;

        match kind {
            ValueKind::Primitive(p) => {
                self.write(p);
                Ok(())
            }
            ValueKind::Composite(composite) => self.write_composite(composite),
            ValueKind::Mapping(entries) => self.write_mapping(entries, type_label),
            ValueKind::Sequence(items) => self.write_sequence(items),
            ValueKind::Unrecognized => Err(self.raise(type_label, |trace| {
                HashError::UnsupportedType {
                    type_name: type_label.to_string(),
                    trace,
                }
            })),
        }
    }

    fn write_composite(&mut self, composite: &dyn Describe) -> Result<(), HashError> {
        let type_name = composite.type_name();
        self.write(type_name);

        let mut scope = self.scope()?;
        let result = composite.describe(&mut scope);
        result.map_err(|err| scope.fail(err, type_name))
    }

    fn write_mapping(&mut self, entries: MapEntries<'_>, type_label: &str) -> Result<(), HashError> {
        self.trace("dict");
        let mut scope = self.scope()?;

        let mut keyed = Vec::new();
        for (key, value) in entries {
            match key.sort_key() {
                Some(sort_key) => keyed.push((sort_key, key, value)),
                None => match key.kind() {
                    ValueKind::Composite(_) | ValueKind::Mapping(_) | ValueKind::Sequence(_) => {
                        return Err(scope.non_primitive_key(key.type_label()));
                    }
                    ValueKind::Primitive(_) | ValueKind::Unrecognized => {
                        return Err(scope.incomparable_keys(type_label));
                    }
                },
            }
        }

        // Same-kind, non-NaN primitives are totally ordered; check that
        // before sorting so the comparator below is consistent.
        if let Some((first, _, _)) = keyed.first() {
            let first = *first;
            let total = keyed.iter().all(|(k, _, _)| {
                first.try_cmp(k).is_some() && k.try_cmp(k).is_some()
            });
            if !total {
                return Err(scope.incomparable_keys(type_label));
            }
        }
        keyed.sort_by(|a, b| a.0.try_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        for (_, key, value) in keyed {
            let key_value = match key.kind() {
                ValueKind::Primitive(p) => p,
                _ => return Err(scope.non_primitive_key(key.type_label())),
            };

            match value.kind() {
                ValueKind::Primitive(p) => {
                    scope.write(key_value).write(p);
                }
                nested_kind => {
                    scope.write(key_value);
                    scope.trace("value");
                    let mut nested = scope.scope()?;
                    nested.dispatch(nested_kind, value.type_label())?;
                }
            }
        }

        Ok(())
    }

    fn write_sequence(&mut self, items: SeqItems<'_>) -> Result<(), HashError> {
        self.trace("list");
        let mut scope = self.scope()?;
        for item in items {
            scope.write_value(item)?;
        }
        Ok(())
    }

    fn incomparable_keys(&mut self, type_label: &str) -> HashError {
        self.raise(type_label, |trace| HashError::IncomparableMappingKeys {
            type_name: type_label.to_string(),
            trace,
        })
    }

    fn non_primitive_key(&mut self, key_type: &str) -> HashError {
        self.raise(key_type, |trace| HashError::NonPrimitiveMappingKey {
            key_type: key_type.to_string(),
            trace,
        })
    }

    /// Build an error from the current trace and mark the session failed.
    fn raise(&mut self, type_name: &str, make: impl FnOnce(String) -> HashError) -> HashError {
        let err = make(self.trace_text().to_string());
        self.fail(err, type_name)
    }
}
