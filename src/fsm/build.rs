//! Term-to-acceptor construction.
//!
//! Every term kind knows how to become an [`Fsm`] over a supplied
//! alphabet: a class becomes a two-state acceptor, a mult repeats its
//! multiplicand's machine, a conc chains machines from the epsilon
//! acceptor, a pattern unions machines from the null acceptor.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::fsm::{Alphabet, Fsm, Symbol};
use crate::reduce::Reduce;
use crate::syntax::charclass::CharClass;
use crate::syntax::conc::Conc;
use crate::syntax::mult::{Mult, Multiplicand};
use crate::syntax::pattern::Pattern;
use crate::syntax::term::Term;

/// The alphabet shared by a group of patterns: every character any of them
/// mentions, plus the [`Symbol::Other`] sentinel standing for everything
/// else. The sentinel is what lets `.` and `[^…]` accept characters the
/// patterns never name.
pub fn shared_alphabet<'a>(patterns: impl IntoIterator<Item = &'a Pattern>) -> Alphabet {
    let mut chars = BTreeSet::new();
    for pattern in patterns {
        chars.extend(pattern.alphabet());
    }
    let mut alphabet: Alphabet = chars.into_iter().map(Symbol::Char).collect();
    alphabet.insert(Symbol::Other);
    alphabet
}

/// Language intersection of two patterns via the product acceptor.
pub(crate) fn intersect(a: &Pattern, b: &Pattern) -> Term {
    let alphabet = shared_alphabet([a, b]);
    debug!(
        "intersecting patterns over an alphabet of {} symbols",
        alphabet.len()
    );
    let product = a.to_fsm(&alphabet).intersection(&b.to_fsm(&alphabet));
    product.to_pattern().reduce()
}

impl CharClass {
    /// A two-state acceptor admitting exactly the one-character strings
    /// this class denotes. The sentinel symbol is admitted only by negated
    /// classes, whose complement it stands inside.
    pub fn to_fsm(&self, alphabet: &Alphabet) -> Fsm {
        let mut row = FxHashMap::default();
        for &symbol in alphabet.iter() {
            let admitted = match symbol {
                Symbol::Char(ch) => self.test(ch),
                Symbol::Other => self.is_negated(),
            };
            if admitted {
                row.insert(symbol, 1);
            }
        }
        Fsm::from_parts(
            alphabet.clone(),
            0,
            BTreeSet::from([1]),
            vec![row, FxHashMap::default()],
        )
    }
}

impl Mult {
    /// The multiplicand's acceptor, repeated per the multiplier.
    pub fn to_fsm(&self, alphabet: &Alphabet) -> Fsm {
        let inner = match self.multiplicand() {
            Multiplicand::Class(class) => class.to_fsm(alphabet),
            Multiplicand::Pattern(pattern) => pattern.to_fsm(alphabet),
        };
        inner.repeat(&self.multiplier())
    }
}

impl Conc {
    /// Chain the children's acceptors, starting from the epsilon acceptor.
    pub fn to_fsm(&self, alphabet: &Alphabet) -> Fsm {
        let mut machine = Fsm::epsilon(alphabet);
        for mult in self.mults() {
            machine = machine.concatenate(&mult.to_fsm(alphabet));
        }
        machine
    }
}

impl Pattern {
    /// Union the alternatives' acceptors, starting from the null acceptor.
    pub fn to_fsm(&self, alphabet: &Alphabet) -> Fsm {
        let mut machine = Fsm::null(alphabet);
        for conc in self.concs() {
            machine = machine.union(&conc.to_fsm(alphabet));
        }
        machine
    }
}

impl Term {
    /// Build an acceptor for any term kind.
    pub fn to_fsm(&self, alphabet: &Alphabet) -> Fsm {
        match self {
            Term::Class(class) => class.to_fsm(alphabet),
            Term::Mult(mult) => mult.to_fsm(alphabet),
            Term::Conc(conc) => conc.to_fsm(alphabet),
            Term::Pattern(pattern) => pattern.to_fsm(alphabet),
        }
    }
}
