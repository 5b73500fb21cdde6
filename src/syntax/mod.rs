//! The term kinds of the regex algebra.
//!
//! A regular expression is a [`Pattern`]: an unordered set of [`Conc`]
//! alternatives. Each conc is an ordered run of [`Mult`]s, and each mult
//! pairs a multiplicand (a [`CharClass`] or a nested pattern) with a
//! [`Multiplier`]. The kinds are mutually recursive but acyclic: terms are
//! immutable values built bottom-up, compared structurally, and hashed
//! consistently with equality.

pub mod charclass;
pub mod conc;
pub mod mult;
pub mod multiplier;
pub mod pattern;
pub mod term;

pub use charclass::CharClass;
pub use conc::Conc;
pub use mult::{Mult, Multiplicand};
pub use multiplier::{Bound, Multiplier};
pub use pattern::Pattern;
pub use term::Term;
