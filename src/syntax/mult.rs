//! Mults: a multiplicand paired with a multiplier.
//!
//! The multiplicand is either a [`CharClass`] or a whole sub-[`Pattern`],
//! so `a`, `b{2}`, `[ef]{2,5}`, `(ghi|jkl)+` and `.*` are all single mults.

use crate::error::{Error, Result};
use crate::syntax::charclass::CharClass;
use crate::syntax::multiplier::{Bound, Multiplier};
use crate::syntax::pattern::Pattern;

/// The thing a multiplier repeats: a character class or a sub-pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Multiplicand {
    /// A character class, e.g. the `a` of `a{2,3}`.
    Class(CharClass),
    /// A parenthesized sub-pattern, e.g. the `(ghi|jkl)` of `(ghi|jkl)+`.
    Pattern(Pattern),
}

impl From<CharClass> for Multiplicand {
    fn from(class: CharClass) -> Self {
        Multiplicand::Class(class)
    }
}

impl From<Pattern> for Multiplicand {
    fn from(pattern: Pattern) -> Self {
        Multiplicand::Pattern(pattern)
    }
}

/// A multiplicand with a repetition count, e.g. `[a-f]{2,5}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mult {
    multiplicand: Multiplicand,
    multiplier: Multiplier,
}

impl Mult {
    /// Pair a multiplicand with a multiplier.
    pub fn new(multiplicand: impl Into<Multiplicand>, multiplier: Multiplier) -> Self {
        Self {
            multiplicand: multiplicand.into(),
            multiplier,
        }
    }

    /// The repeated thing.
    pub fn multiplicand(&self) -> &Multiplicand {
        &self.multiplicand
    }

    /// The repetition count.
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Undo a concatenation of repetitions of the same multiplicand:
    /// `a{4,5} - a{3} = a{1,2}`.
    ///
    /// Fails with [`Error::NoCommonMultiplicand`] when the multiplicands
    /// differ, and with a domain error when the multiplier subtraction is
    /// undefined.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        if self.multiplicand != other.multiplicand {
            return Err(Error::NoCommonMultiplicand);
        }
        Ok(Self {
            multiplicand: self.multiplicand.clone(),
            multiplier: self.multiplier.subtract(&other.multiplier)?,
        })
    }

    /// The largest mult that both operands are a continuation of:
    /// `a{3,4} ⊓ a{2,5} = a{2,3}`.
    ///
    /// Defined only for equal multiplicands; this is the single-mult
    /// operation that pattern factorization leans on, not a language
    /// intersection.
    pub fn common(&self, other: &Self) -> Result<Self> {
        if self.multiplicand != other.multiplicand {
            return Err(Error::NoCommonMultiplicand);
        }
        Ok(Self {
            multiplicand: self.multiplicand.clone(),
            multiplier: self.multiplier.common(&other.multiplier),
        })
    }

    /// Render as regex text.
    ///
    /// For an exact count the shorter of the repeated literal (`aa`) and the
    /// braced form (`a{2}`) wins, ties going to the repeated literal.
    pub fn render(&self) -> Result<String> {
        let unit = match &self.multiplicand {
            Multiplicand::Class(class) => class.render()?,
            Multiplicand::Pattern(pattern) => format!("({})", pattern.render()?),
        };
        let suffix = self.multiplier.render()?;

        if Multiplier::min(&self.multiplier) == Multiplier::max(&self.multiplier) {
            if let Bound::Finite(n) = Multiplier::min(&self.multiplier) {
                if unit.len() * n <= unit.len() + suffix.len() {
                    return Ok(unit.repeat(n));
                }
            }
        }

        Ok(format!("{unit}{suffix}"))
    }
}
