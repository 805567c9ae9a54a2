//! Human-readable trace of a hashing session.

use serde::{Deserialize, Serialize};

/// The trace text produced alongside a digest.
///
/// One line per record, indented by traversal depth. Comparing the traces of
/// two digests that were expected to match shows where the inputs diverged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace(String);

impl Trace {
    /// Wrap trace text.
    pub fn new(text: String) -> Self {
        Self(text)
    }

    /// Full trace text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trace split into records.
    pub fn lines(&self) -> Vec<&str> {
        if self.0.is_empty() {
            return Vec::new();
        }
        self.0.split('\n').collect()
    }

    /// Number of records.
    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// Whether nothing was traced.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First record at which two traces differ, as `(line_index, ours, theirs)`.
    ///
    /// A missing line on either side is reported as `None`.
    pub fn first_divergence<'a>(
        &'a self,
        other: &'a Trace,
    ) -> Option<(usize, Option<&'a str>, Option<&'a str>)> {
        let ours = self.lines();
        let theirs = other.lines();
        let len = ours.len().max(theirs.len());

        (0..len).find_map(|i| {
            let a = ours.get(i).copied();
            let b = theirs.get(i).copied();
            (a != b).then_some((i, a, b))
        })
    }

    /// Consume into the text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let trace = Trace::new("root\n\ta\t1\n\tb\t2".to_string());
        assert_eq!(trace.lines(), vec!["root", "\ta\t1", "\tb\t2"]);
        assert_eq!(trace.line_count(), 3);
        assert!(Trace::default().lines().is_empty());
    }

    #[test]
    fn test_first_divergence() {
        let a = Trace::new("x\n\t1\n\t2".to_string());
        let b = Trace::new("x\n\t1\n\t3".to_string());
        assert_eq!(a.first_divergence(&b), Some((2, Some("\t2"), Some("\t3"))));
        assert_eq!(a.first_divergence(&a.clone()), None);

        let shorter = Trace::new("x\n\t1".to_string());
        assert_eq!(a.first_divergence(&shorter), Some((2, Some("\t2"), None)));
    }
}
