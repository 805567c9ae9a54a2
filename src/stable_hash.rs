//! Platform-independent string hashing.
//!
//! `str`'s `Hash` impl and `std::collections::hash_map::DefaultHasher` are
//! free to change between Rust releases and are randomly keyed per process,
//! so they can never feed a digest that must match across machines. This
//! module defines a fixed arithmetic recurrence instead:
//!
//! ```text
//! h(0)   = 17
//! h(i+1) = h(i) * 257 + codepoint(i)      (wrapping, mod 2^32)
//! ```
//!
//! The recurrence iterates Unicode scalar values, so the result does not
//! depend on how the host stores text, on the locale, or on word size.

/// Seed of the recurrence.
pub const STRING_HASH_SEED: i32 = 17;

/// Multiplier of the recurrence.
pub const STRING_HASH_MULTIPLIER: i32 = 257;

/// Hash a string to a stable 32-bit value.
///
/// # Example
///
/// ```rust
/// use content_hash_kernel::stable_hash::platform_independent_hash;
///
/// assert_eq!(platform_independent_hash(""), 17);
/// assert_eq!(platform_independent_hash("a"), 17 * 257 + 97);
/// ```
pub fn platform_independent_hash(text: &str) -> i32 {
    text.chars().fold(STRING_HASH_SEED, |acc, c| {
        acc.wrapping_mul(STRING_HASH_MULTIPLIER)
            .wrapping_add(c as i32)
    })
}

/// Hash a sequence of chars with the same recurrence as [`platform_independent_hash`].
pub fn platform_independent_hash_chars(chars: &[char]) -> i32 {
    chars.iter().fold(STRING_HASH_SEED, |acc, &c| {
        acc.wrapping_mul(STRING_HASH_MULTIPLIER)
            .wrapping_add(c as i32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_seed() {
        assert_eq!(platform_independent_hash(""), STRING_HASH_SEED);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(platform_independent_hash("a"), 17 * 257 + 97);
        assert_eq!(platform_independent_hash("ab"), (17 * 257 + 97) * 257 + 98);
    }

    #[test]
    fn test_wraps_instead_of_overflowing() {
        let long = "z".repeat(10_000);
        // Must not panic in debug builds.
        let h1 = platform_independent_hash(&long);
        let h2 = platform_independent_hash(&long);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_uses_scalar_values_not_utf8_bytes() {
        // 'é' is two UTF-8 bytes but one scalar value (U+00E9).
        assert_eq!(platform_independent_hash("é"), 17 * 257 + 0xE9);
        // Astral plane characters are a single step of the recurrence.
        let expected = 17i32.wrapping_mul(257).wrapping_add(0x1F600);
        assert_eq!(platform_independent_hash("😀"), expected);
    }

    #[test]
    fn test_chars_agree_with_str() {
        let text = "Hello 世界";
        let chars: Vec<char> = text.chars().collect();
        assert_eq!(
            platform_independent_hash(text),
            platform_independent_hash_chars(&chars)
        );
    }

    #[test]
    fn test_order_matters() {
        assert_ne!(platform_independent_hash("ab"), platform_independent_hash("ba"));
    }
}
