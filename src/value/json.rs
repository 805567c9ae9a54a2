//! [`HashValue`] for `serde_json::Value`.
//!
//! Lets dynamically typed data (config blobs, API payloads) be hashed with
//! the same rules as typed values: objects are mappings, arrays are
//! sequences, numbers are `i64`, `u64` or `f64` in that order of preference.
//! `null` has no canonical encoding and fails as an unsupported type.

use serde_json::Value;

use super::{HashValue, ValueKind};
use crate::types::Primitive;

impl HashValue for Value {
    fn kind(&self) -> ValueKind<'_> {
        match self {
            Value::Null => ValueKind::Unrecognized,
            Value::Bool(b) => ValueKind::Primitive(Primitive::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ValueKind::Primitive(Primitive::I64(i))
                } else if let Some(u) = n.as_u64() {
                    ValueKind::Primitive(Primitive::U64(u))
                } else if let Some(f) = n.as_f64() {
                    ValueKind::Primitive(Primitive::F64(f))
                } else {
                    ValueKind::Unrecognized
                }
            }
            Value::String(s) => ValueKind::Primitive(Primitive::Str(s.as_str())),
            Value::Array(items) => ValueKind::Sequence(Box::new(
                items.iter().map(|item| item as &dyn HashValue),
            )),
            Value::Object(map) => ValueKind::Mapping(Box::new(
                map.iter()
                    .map(|(k, v)| (k as &dyn HashValue, v as &dyn HashValue)),
            )),
        }
    }

    fn type_label(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
