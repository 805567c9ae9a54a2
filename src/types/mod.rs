//! Core value and output types.

pub mod decimal;
pub mod primitive;
pub mod digest;
pub mod trace;

pub use decimal::{Decimal, DecimalError};
pub use primitive::Primitive;
pub use digest::ContentDigest;
pub use trace::Trace;
