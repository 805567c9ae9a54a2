//! The two sinks fed in lock-step by the writer.

pub mod binary;
pub mod trace;

pub use binary::BinarySink;
pub use trace::TraceSink;
