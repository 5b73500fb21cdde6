//! Error types for the term algebra.
//!
//! The taxonomy is deliberately small and closed. Factoring misses during
//! reduction (no shared prefix/suffix between alternatives) are ordinary
//! control flow inside the reducer and never appear here.

use text_size::TextSize;
use thiserror::Error;

/// Errors reported by the public API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is not a valid regular expression. The offset is the byte
    /// position past which no further input could be consumed.
    #[error("invalid regular expression: cannot parse past offset {offset:?}")]
    Parse {
        /// Byte offset of the first unconsumed character.
        offset: TextSize,
    },

    /// `render` was invoked on a term whose denotation has no textual form:
    /// the empty character class, a `{0}` or `{∞,∞}` multiplier, or the
    /// empty pattern.
    #[error("term has no regex representation: {reason}")]
    NotRenderable {
        /// What made the term unprintable.
        reason: &'static str,
    },

    /// Intersection or subtraction of two mults whose multiplicands differ.
    #[error("mults have no common multiplicand")]
    NoCommonMultiplicand,

    /// A multiplier operation left the domain of well-defined multipliers,
    /// e.g. subtracting an unbounded multiplier from a bounded one.
    #[error("multiplier arithmetic out of domain: {reason}")]
    Domain {
        /// What made the operation undefined.
        reason: &'static str,
    },
}

impl Error {
    /// Create a parse error at a byte offset.
    pub fn parse_at(offset: usize) -> Self {
        Self::Parse {
            offset: TextSize::new(offset as u32),
        }
    }

    /// Create a not-renderable error.
    pub fn not_renderable(reason: &'static str) -> Self {
        Self::NotRenderable { reason }
    }

    /// Create a domain error.
    pub fn domain(reason: &'static str) -> Self {
        Self::Domain { reason }
    }
}

/// Convenient result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse_at(7);
        assert_eq!(
            err.to_string(),
            "invalid regular expression: cannot parse past offset 7"
        );
    }

    #[test]
    fn test_not_renderable_display() {
        let err = Error::not_renderable("empty character class");
        assert!(err.to_string().contains("empty character class"));
    }
}
