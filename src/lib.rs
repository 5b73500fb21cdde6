//! # regalg
//!
//! Symbolic algebra for regular expressions. A regex here is not a
//! matching engine but a value: parse text into a [`Pattern`] term,
//! combine terms with `+` (concatenation), `|` (alternation) and `&`
//! (intersection), simplify them with [`Reduce::reduce`], print them back
//! out with [`Term::render`], or compile them to a finite-state acceptor
//! for language-level questions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! fsm      → acceptors: construction, combination, back-conversion
//!   ↓
//! parser   → recursive-descent parser over a char cursor
//!   ↓
//! reduce   → fix-point rewrite engine (the Reduce trait)
//!   ↓
//! syntax   → term kinds: CharClass, Multiplier, Mult, Conc, Pattern
//!   ↓
//! error    → closed error taxonomy
//! ```
//!
//! ## Example
//!
//! ```
//! use regalg::{Reduce, parse};
//!
//! let pattern = parse("0|[1-9]").unwrap();
//! assert_eq!(pattern.reduce().render().unwrap(), "[0-9]");
//! ```
//!
//! The supported dialect is deliberately conservative: alternation,
//! grouping, character classes with the ranges `A-Z`, `a-z` and `0-9`,
//! the shorthands `\w \W \d \D \s \S .`, and the quantifiers `?`, `*`,
//! `+`, `{n}`, `{n,}`, `{n,m}`. No anchors, captures, backreferences or
//! flags.

// ============================================================================
// MODULES (dependency order: error → syntax → reduce → parser → fsm)
// ============================================================================

/// Closed error taxonomy
pub mod error;

/// Term kinds: CharClass, Multiplier, Mult, Conc, Pattern, Term
pub mod syntax;

/// Fix-point rewrite engine
pub mod reduce;

/// Recursive-descent parser
pub mod parser;

/// Finite-state acceptors
pub mod fsm;

// Re-export the working surface.
pub use error::{Error, Result};
pub use fsm::{Alphabet, Fsm, Symbol, shared_alphabet};
pub use parser::parse;
pub use reduce::Reduce;
pub use syntax::charclass::{DIGIT, DOT, NON_DIGIT, NON_SPACE, NON_WORD, SPACE, WORD};
pub use syntax::multiplier::{INF, ONE, PLUS, QM, STAR, ZERO};
pub use syntax::{Bound, CharClass, Conc, Mult, Multiplicand, Multiplier, Pattern, Term};
