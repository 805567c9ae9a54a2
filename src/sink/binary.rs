//! Binary sink: the canonical byte stream that gets digested.

use crate::types::Primitive;

/// Append-only buffer of canonical bytes.
#[derive(Debug, Default, Clone)]
pub struct BinarySink {
    buf: Vec<u8>,
}

impl BinarySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the canonical encoding of a primitive.
    pub fn write(&mut self, value: Primitive<'_>) {
        value.encode_into(&mut self.buf);
    }

    /// Everything written so far, from the start.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume into the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_in_order() {
        let mut sink = BinarySink::new();
        sink.write(Primitive::U8(1));
        sink.write(Primitive::U16(2));
        sink.write(Primitive::Bool(true));
        assert_eq!(sink.as_bytes(), &[1, 2, 0, 1]);
        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn test_empty() {
        let sink = BinarySink::new();
        assert!(sink.is_empty());
        assert!(sink.into_bytes().is_empty());
    }
}
