//! Multipliers: `(min, max)` repetition counts over ℕ ∪ {∞}.
//!
//! Most regex atoms carry the implicit multiplier `{1,1}`; the usual
//! suffixes are just names for particular bounds (`?` = `{0,1}`,
//! `*` = `{0,∞}`, `+` = `{1,∞}`).
//!
//! Alongside `(min, max)`, a multiplier has a derived `(mandatory,
//! optional)` view with `mandatory = min` and `optional = max - min`.
//! Subtraction and intersection are defined component-wise on that view,
//! which is what makes factoring a shared mult out of several alternatives
//! a uniform operation. The view uses the conventions `∞ - n = ∞` and
//! `∞ - ∞ = 0`; both are load-bearing below.

use std::fmt;
use std::ops::{Add, Mul};

use crate::error::{Error, Result};

/// A repetition bound: a natural number or infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bound {
    /// An exact finite count.
    Finite(usize),
    /// Unbounded, as in `a*` or `a{2,}`.
    Inf,
}

impl Bound {
    /// Whether this bound is a finite zero.
    pub fn is_zero(self) -> bool {
        self == Bound::Finite(0)
    }
}

impl Add for Bound {
    type Output = Bound;

    fn add(self, rhs: Bound) -> Bound {
        match (self, rhs) {
            (Bound::Finite(a), Bound::Finite(b)) => Bound::Finite(a + b),
            _ => Bound::Inf,
        }
    }
}

impl Mul for Bound {
    type Output = Bound;

    fn mul(self, rhs: Bound) -> Bound {
        match (self, rhs) {
            (Bound::Finite(a), Bound::Finite(b)) => Bound::Finite(a * b),
            _ => Bound::Inf,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(n) => write!(f, "{n}"),
            Bound::Inf => write!(f, "inf"),
        }
    }
}

/// `{0,0}`: matches only by being absent.
pub const ZERO: Multiplier = Multiplier {
    min: Bound::Finite(0),
    max: Bound::Finite(0),
};

/// `?`, i.e. `{0,1}`.
pub const QM: Multiplier = Multiplier {
    min: Bound::Finite(0),
    max: Bound::Finite(1),
};

/// The implicit multiplier `{1,1}`.
pub const ONE: Multiplier = Multiplier {
    min: Bound::Finite(1),
    max: Bound::Finite(1),
};

/// `*`, i.e. `{0,∞}`.
pub const STAR: Multiplier = Multiplier {
    min: Bound::Finite(0),
    max: Bound::Inf,
};

/// `+`, i.e. `{1,∞}`.
pub const PLUS: Multiplier = Multiplier {
    min: Bound::Finite(1),
    max: Bound::Inf,
};

/// `{∞,∞}`. Unprintable, but it has occasional uses as an absorbing value.
pub const INF: Multiplier = Multiplier {
    min: Bound::Inf,
    max: Bound::Inf,
};

/// A repetition count range with `min ≤ max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Multiplier {
    min: Bound,
    max: Bound,
}

impl Multiplier {
    /// Create a multiplier.
    ///
    /// # Panics
    /// Panics if `max < min`; the parser and the arithmetic below only ever
    /// construct ordered bounds, so an unordered pair is a caller bug.
    pub fn new(min: Bound, max: Bound) -> Self {
        assert!(min <= max, "multiplier max {max} is less than min {min}");
        Self { min, max }
    }

    /// Shorthand for a fully finite multiplier like `{2,5}`.
    pub fn finite(min: usize, max: usize) -> Self {
        Self::new(Bound::Finite(min), Bound::Finite(max))
    }

    /// The minimum repetition count.
    pub fn min(&self) -> Bound {
        self.min
    }

    /// The maximum repetition count.
    pub fn max(&self) -> Bound {
        self.max
    }

    /// The number of repetitions that must occur.
    pub fn mandatory(&self) -> Bound {
        self.min
    }

    /// The number of repetitions that may additionally occur:
    /// `max - min`, with `∞ - n = ∞` and `∞ - ∞ = 0`.
    pub fn optional(&self) -> Bound {
        match (self.max, self.min) {
            (Bound::Inf, Bound::Inf) => Bound::Finite(0),
            (Bound::Inf, Bound::Finite(_)) => Bound::Inf,
            (Bound::Finite(max), Bound::Finite(min)) => Bound::Finite(max - min),
            (Bound::Finite(_), Bound::Inf) => unreachable!("multiplier max below min"),
        }
    }

    /// Rebuild `(min, max)` from a `(mandatory, optional)` pair. An infinite
    /// mandatory part forces `{∞,∞}` regardless of the optional part.
    fn from_parts(mandatory: Bound, optional: Bound) -> Self {
        match mandatory {
            Bound::Inf => INF,
            Bound::Finite(_) => Self::new(mandatory, mandatory + optional),
        }
    }

    /// Subtract `other` from `self`, the inverse of `+` where defined.
    ///
    /// Works component-wise on the `(mandatory, optional)` view:
    /// `∞ - ∞ = 0`, `∞ - n = ∞`, and `n - ∞` or a negative residue are
    /// domain errors. E.g. `{4,5} - {3,3} = {1,2}`.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        let mandatory = bound_sub(self.mandatory(), other.mandatory())?;
        let optional = bound_sub(self.optional(), other.optional())?;
        Ok(Self::from_parts(mandatory, optional))
    }

    /// The largest multiplier contained in both operands, component-wise
    /// minimum on the `(mandatory, optional)` view. E.g.
    /// `{3,4} ⊓ {2,5} = {2,3}`.
    pub fn common(&self, other: &Self) -> Self {
        let mandatory = self.mandatory().min(other.mandatory());
        let optional = self.optional().min(other.optional());
        Self::from_parts(mandatory, optional)
    }

    /// Render as a quantifier suffix: empty for `{1,1}`, else `?`, `*`,
    /// `+`, `{n}`, `{n,}` or `{n,m}`.
    ///
    /// A `{0,0}` or `{∞,∞}` multiplier admits no textual form.
    pub fn render(&self) -> Result<String> {
        if self.max.is_zero() {
            return Err(Error::not_renderable("zero multiplier"));
        }
        if self.min == Bound::Inf {
            return Err(Error::not_renderable("infinite minimum multiplier"));
        }
        let text = match *self {
            QM => "?".to_string(),
            ONE => String::new(),
            STAR => "*".to_string(),
            PLUS => "+".to_string(),
            _ => match (self.min, self.max) {
                (Bound::Finite(min), Bound::Inf) => format!("{{{min},}}"),
                (Bound::Finite(min), Bound::Finite(max)) if min == max => format!("{{{min}}}"),
                (Bound::Finite(min), Bound::Finite(max)) => format!("{{{min},{max}}}"),
                (Bound::Inf, _) => unreachable!("checked above"),
            },
        };
        Ok(text)
    }
}

/// Component subtraction on the `(mandatory, optional)` view.
fn bound_sub(lhs: Bound, rhs: Bound) -> Result<Bound> {
    match (lhs, rhs) {
        (Bound::Inf, Bound::Inf) => Ok(Bound::Finite(0)),
        (Bound::Inf, Bound::Finite(_)) => Ok(Bound::Inf),
        (Bound::Finite(_), Bound::Inf) => Err(Error::domain(
            "cannot subtract an unbounded multiplier from a bounded one",
        )),
        (Bound::Finite(a), Bound::Finite(b)) => {
            if a < b {
                Err(Error::domain("multiplier subtraction went negative"))
            } else {
                Ok(Bound::Finite(a - b))
            }
        }
    }
}

impl Mul for Multiplier {
    type Output = Multiplier;

    /// Nested repetition: `(a{2,3}){4,5}` covers `a{8,15}`.
    fn mul(self, rhs: Multiplier) -> Multiplier {
        Multiplier::new(self.min * rhs.min, self.max * rhs.max)
    }
}

impl Add for Multiplier {
    type Output = Multiplier;

    /// Sequenced repetition: `a{1,2}a{3,4}` covers `a{4,6}`.
    fn add(self, rhs: Multiplier) -> Multiplier {
        Multiplier::new(self.min + rhs.min, self.max + rhs.max)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.min, self.max)
    }
}
