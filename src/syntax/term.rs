//! The uniform term type and the operator surface.
//!
//! The four term kinds form a strict hierarchy: a [`CharClass`] can stand
//! where a [`Mult`] is wanted (with multiplier one), a mult where a
//! [`Conc`] is wanted, a conc where a [`Pattern`] is wanted. [`Term`] is
//! the tagged union the combinators and the reducer traffic in, and the
//! `into_*` methods perform that "bulk-up" so every operation sees a
//! consistent shape no matter which kind it was handed.
//!
//! Operators:
//! - `+` concatenates, `|` alternates; both return reduced results.
//! - `&` intersects. Two bare classes intersect directly; any other
//!   combination goes through the finite-automaton construction.
//! - `* multiplier` wraps a term in a repetition (and leaves it alone when
//!   the multiplier is one).

use std::ops::{Add, BitAnd, BitOr, Mul};

use crate::error::Result;
use crate::reduce::Reduce;
use crate::syntax::charclass::CharClass;
use crate::syntax::conc::Conc;
use crate::syntax::mult::{Mult, Multiplicand};
use crate::syntax::multiplier::{Multiplier, ONE};
use crate::syntax::pattern::Pattern;

/// Any of the four term kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// A character class.
    Class(CharClass),
    /// A multiplicand with a repetition count.
    Mult(Mult),
    /// An ordered concatenation.
    Conc(Conc),
    /// An unordered alternation.
    Pattern(Pattern),
}

impl Term {
    /// Bulk this term up to a multiplicand: classes stay classes,
    /// everything else becomes a (possibly one-alternative) pattern.
    pub fn into_multiplicand(self) -> Multiplicand {
        match self {
            Term::Class(class) => Multiplicand::Class(class),
            Term::Mult(mult) => Multiplicand::Pattern(Pattern::new([Conc::new(vec![mult])])),
            Term::Conc(conc) => Multiplicand::Pattern(Pattern::new([conc])),
            Term::Pattern(pattern) => Multiplicand::Pattern(pattern),
        }
    }

    /// Bulk this term up to a mult.
    pub fn into_mult(self) -> Mult {
        match self {
            Term::Mult(mult) => mult,
            other => Mult::new(other.into_multiplicand(), ONE),
        }
    }

    /// Bulk this term up to a conc.
    pub fn into_conc(self) -> Conc {
        match self {
            Term::Class(class) => Conc::new(vec![Mult::new(class, ONE)]),
            Term::Mult(mult) => Conc::new(vec![mult]),
            Term::Conc(conc) => conc,
            Term::Pattern(pattern) => Conc::new(vec![Mult::new(pattern, ONE)]),
        }
    }

    /// Bulk this term up to a pattern.
    pub fn into_pattern(self) -> Pattern {
        match self {
            Term::Conc(conc) => Pattern::new([conc]),
            Term::Pattern(pattern) => pattern,
            other => Pattern::new([other.into_conc()]),
        }
    }

    /// Render this term as regex text.
    pub fn render(&self) -> Result<String> {
        match self {
            Term::Class(class) => class.render(),
            Term::Mult(mult) => mult.render(),
            Term::Conc(conc) => conc.render(),
            Term::Pattern(pattern) => pattern.render(),
        }
    }
}

impl From<CharClass> for Term {
    fn from(class: CharClass) -> Self {
        Term::Class(class)
    }
}

impl From<Mult> for Term {
    fn from(mult: Mult) -> Self {
        Term::Mult(mult)
    }
}

impl From<Conc> for Term {
    fn from(conc: Conc) -> Self {
        Term::Conc(conc)
    }
}

impl From<Pattern> for Term {
    fn from(pattern: Pattern) -> Self {
        Term::Pattern(pattern)
    }
}

impl<R: Into<Term>> Add<R> for Term {
    type Output = Term;

    /// Concatenation. The result is reduced, so `a + a` comes back as
    /// `a{2}` rather than `aa`.
    fn add(self, rhs: R) -> Term {
        let rhs: Term = rhs.into();
        let mut mults = self.into_conc().mults().to_vec();
        mults.extend_from_slice(rhs.into_conc().mults());
        Conc::new(mults).reduce()
    }
}

impl<R: Into<Term>> BitOr<R> for Term {
    type Output = Term;

    /// Alternation. Two bare classes unite directly (`[ab] | [bc]` is
    /// `[abc]`); otherwise the alternative sets merge and the result is
    /// reduced.
    fn bitor(self, rhs: R) -> Term {
        let rhs: Term = rhs.into();
        if let (Term::Class(a), Term::Class(b)) = (&self, &rhs) {
            return Term::Class(a.union(b));
        }
        let mut concs = self.into_pattern().concs().clone();
        concs.extend(rhs.into_pattern().concs().iter().cloned());
        Pattern::new(concs).reduce()
    }
}

impl<R: Into<Term>> BitAnd<R> for Term {
    type Output = Term;

    /// Language intersection. Two bare classes intersect directly; any
    /// other combination builds finite automata over a shared alphabet,
    /// intersects those, and converts back.
    fn bitand(self, rhs: R) -> Term {
        let rhs: Term = rhs.into();
        if let (Term::Class(a), Term::Class(b)) = (&self, &rhs) {
            return Term::Class(a.intersection(b));
        }
        crate::fsm::intersect(&self.into_pattern(), &rhs.into_pattern())
    }
}

impl Mul<Multiplier> for Term {
    type Output = Term;

    /// Repetition. Multiplying by one is the identity; multiplying a mult
    /// multiplies the multipliers, so `a{2,3} * {4,5}` is `a{8,15}`.
    fn mul(self, rhs: Multiplier) -> Term {
        if rhs == ONE {
            return self;
        }
        match self {
            Term::Mult(mult) => Term::Mult(Mult::new(
                mult.multiplicand().clone(),
                mult.multiplier() * rhs,
            )),
            other => Term::Mult(Mult::new(other.into_multiplicand(), rhs)),
        }
    }
}

/// Lift the term operators onto the individual kinds, so expressions like
/// `class_a + class_b` or `pattern | conc` work without manual conversion.
macro_rules! lift_term_ops {
    ($($kind:ty),*) => {
        $(
            impl<R: Into<Term>> Add<R> for $kind {
                type Output = Term;
                fn add(self, rhs: R) -> Term {
                    Term::from(self) + rhs
                }
            }

            impl<R: Into<Term>> BitOr<R> for $kind {
                type Output = Term;
                fn bitor(self, rhs: R) -> Term {
                    Term::from(self) | rhs
                }
            }

            impl<R: Into<Term>> BitAnd<R> for $kind {
                type Output = Term;
                fn bitand(self, rhs: R) -> Term {
                    Term::from(self) & rhs
                }
            }

            impl Mul<Multiplier> for $kind {
                type Output = Term;
                fn mul(self, rhs: Multiplier) -> Term {
                    Term::from(self) * rhs
                }
            }
        )*
    };
}

lift_term_ops!(CharClass, Mult, Conc, Pattern);
