//! [`HashValue`] impls for standard library types.
//!
//! `usize`/`isize` are deliberately absent: their width depends on the
//! target, which would make digests platform dependent. `HashSet` is absent
//! because its iteration order is randomized per process; use `BTreeSet`.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use super::{HashValue, ValueKind};
use crate::types::{Decimal, Primitive};

macro_rules! scalar_hash_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HashValue for $ty {
                fn kind(&self) -> ValueKind<'_> {
                    ValueKind::Primitive(Primitive::from(*self))
                }
            }
        )*
    };
}

scalar_hash_value!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, char, Decimal);

impl HashValue for str {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Primitive(Primitive::Str(self))
    }
}

impl HashValue for String {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Primitive(Primitive::Str(self.as_str()))
    }
}

/// Raw byte array, hashed as one length-prefixed primitive.
///
/// A plain `Vec<u8>` is a sequence of `u8` values (one record per byte);
/// wrap it in `RawBytes` to hash it as a blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawBytes<B: AsRef<[u8]>>(pub B);

impl<B: AsRef<[u8]>> HashValue for RawBytes<B> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Primitive(Primitive::Bytes(self.0.as_ref()))
    }

    fn type_label(&self) -> &str {
        "RawBytes"
    }
}

/// Raw character array, hashed as one length-prefixed primitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawChars<C: AsRef<[char]>>(pub C);

impl<C: AsRef<[char]>> HashValue for RawChars<C> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Primitive(Primitive::Chars(self.0.as_ref()))
    }

    fn type_label(&self) -> &str {
        "RawChars"
    }
}

macro_rules! forward_hash_value {
    ($($wrapper:ident),* $(,)?) => {
        $(
            impl<T: HashValue + ?Sized> HashValue for $wrapper<T> {
                fn kind(&self) -> ValueKind<'_> {
                    (**self).kind()
                }

                fn sort_key(&self) -> Option<Primitive<'_>> {
                    (**self).sort_key()
                }

                fn type_label(&self) -> &str {
                    (**self).type_label()
                }
            }
        )*
    };
}

forward_hash_value!(Box, Rc, Arc);

impl<T: HashValue + ?Sized> HashValue for &T {
    fn kind(&self) -> ValueKind<'_> {
        (**self).kind()
    }

    fn sort_key(&self) -> Option<Primitive<'_>> {
        (**self).sort_key()
    }

    fn type_label(&self) -> &str {
        (**self).type_label()
    }
}

impl<T: HashValue> HashValue for [T] {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Sequence(Box::new(self.iter().map(|item| item as &dyn HashValue)))
    }
}

impl<T: HashValue, const N: usize> HashValue for [T; N] {
    fn kind(&self) -> ValueKind<'_> {
        self.as_slice().kind()
    }
}

impl<T: HashValue> HashValue for Vec<T> {
    fn kind(&self) -> ValueKind<'_> {
        self.as_slice().kind()
    }
}

impl<T: HashValue> HashValue for VecDeque<T> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Sequence(Box::new(self.iter().map(|item| item as &dyn HashValue)))
    }
}

impl<T: HashValue> HashValue for BTreeSet<T> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Sequence(Box::new(self.iter().map(|item| item as &dyn HashValue)))
    }
}

impl<K: HashValue, V: HashValue, S> HashValue for HashMap<K, V, S> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Mapping(Box::new(
            self.iter()
                .map(|(k, v)| (k as &dyn HashValue, v as &dyn HashValue)),
        ))
    }
}

impl<K: HashValue, V: HashValue> HashValue for BTreeMap<K, V> {
    fn kind(&self) -> ValueKind<'_> {
        ValueKind::Mapping(Box::new(
            self.iter()
                .map(|(k, v)| (k as &dyn HashValue, v as &dyn HashValue)),
        ))
    }
}
