//! The rewrite engine: fix-point simplification of terms.
//!
//! Every kind implements [`Reduce`], whose contract is strict: `reduce`
//! returns a term denoting exactly the same language, and the result is
//! either structurally simpler than the input (fewer mults, a shallower
//! tree, a smaller class) or the input itself. Each rule that rewrites
//! finishes by calling `reduce` on what it built, so results are always
//! fully reduced; each rule that merely *might* rewrite checks that
//! something actually changed before recursing. Breaking either half of
//! that discipline turns the fix-point into an infinite loop.
//!
//! There is no canonical form. These rules are best-effort cleanups:
//! `0|[1-9]` becomes `[0-9]`, `([ab])*` becomes `[ab]*`, `a{2}b|a+c`
//! becomes `a(ab|a*c)`, and anything vacuous collapses to the empty class
//! or the empty string.

use tracing::trace;

use crate::syntax::charclass::CharClass;
use crate::syntax::conc::Conc;
use crate::syntax::mult::{Mult, Multiplicand};
use crate::syntax::multiplier::{Bound, Multiplier, ONE, QM, ZERO};
use crate::syntax::pattern::Pattern;
use crate::syntax::term::Term;

use rustc_hash::FxHashMap;

/// Rewrite a term into an equivalent, structurally no-larger term.
pub trait Reduce {
    /// Return an equivalent term, simplified as far as the rules reach.
    fn reduce(&self) -> Term;
}

/// Whether this mult can never match even one repetition: an empty-class
/// multiplicand with at least one mandatory occurrence.
fn is_vacuous(mult: &Mult) -> bool {
    let empty_class = matches!(
        mult.multiplicand(),
        Multiplicand::Class(class) if class.chars().is_empty() && !class.is_negated()
    );
    empty_class && Multiplier::min(&mult.multiplier()) >= Bound::Finite(1)
}

impl Reduce for CharClass {
    /// Classes are leaves; there is nothing to rewrite.
    fn reduce(&self) -> Term {
        Term::Class(self.clone())
    }
}

impl Reduce for Mult {
    fn reduce(&self) -> Term {
        // A multiplicand pattern that contains the empty conc is partly
        // optional; pull the optionality out into our own multiplier.
        // (A|B|)D is (A|B)?D, and (A|B|){2} is (A|B){0,2}.
        if let Multiplicand::Pattern(pattern) = self.multiplicand() {
            if pattern.concs().contains(&Conc::empty()) {
                let rest = Pattern::new(
                    pattern.concs().iter().filter(|c| !c.is_empty()).cloned(),
                );
                return Mult::new(rest, self.multiplier() * QM).reduce();
            }
        }

        // Repeating anything zero times matches nothing at all.
        if self.multiplier() == ZERO {
            return CharClass::empty().reduce();
        }

        // An empty-pattern multiplicand can never match, unless zero
        // occurrences are allowed, in which case only "" survives.
        if let Multiplicand::Pattern(pattern) = self.multiplicand() {
            if pattern.is_nothing() {
                return if Multiplier::min(&self.multiplier()).is_zero() {
                    Conc::empty().reduce()
                } else {
                    CharClass::empty().reduce()
                };
            }
        }

        // No point multiplying in the singular.
        if self.multiplier() == ONE {
            return match self.multiplicand() {
                Multiplicand::Class(class) => class.reduce(),
                Multiplicand::Pattern(pattern) => pattern.reduce(),
            };
        }

        // Reduce the multiplicand itself; rebuild only on change.
        let reduced = match self.multiplicand() {
            Multiplicand::Class(class) => class.reduce().into_multiplicand(),
            Multiplicand::Pattern(pattern) => pattern.reduce().into_multiplicand(),
        };
        if &reduced != self.multiplicand() {
            return Mult::new(reduced, self.multiplier()).reduce();
        }

        // A pattern of exactly one conc of exactly one mult collapses into
        // us: ([ab])* is [ab]*, and (c{1,2}){3,4} is c{3,8}.
        if let Multiplicand::Pattern(pattern) = self.multiplicand() {
            if pattern.concs().len() == 1 {
                if let Some(conc) = pattern.concs().iter().next() {
                    if let [inner] = conc.mults() {
                        return Mult::new(
                            inner.multiplicand().clone(),
                            inner.multiplier() * self.multiplier(),
                        )
                        .reduce();
                    }
                }
            }
        }

        Term::Mult(self.clone())
    }
}

impl Reduce for Conc {
    fn reduce(&self) -> Term {
        // One vacuous mult poisons the whole concatenation.
        if self.mults().iter().any(is_vacuous) {
            return CharClass::empty().reduce();
        }

        // No point concatenating one thing. (Concatenating *nothing* is
        // fine: the empty conc is the empty string.)
        if let [only] = self.mults() {
            return only.reduce();
        }

        // Reduce children, bulking the results back up to mults; rebuild
        // only on change.
        let reduced: Vec<Mult> = self
            .mults()
            .iter()
            .map(|mult| mult.reduce().into_mult())
            .collect();
        if reduced != self.mults() {
            return Conc::new(reduced).reduce();
        }

        // Adjacent mults over the same multiplicand squish together:
        // ab?b?c is ab{0,2}c.
        for i in 1..self.mults().len() {
            if self.mults()[i - 1].multiplicand() == self.mults()[i].multiplicand() {
                let squished = Mult::new(
                    self.mults()[i - 1].multiplicand().clone(),
                    self.mults()[i - 1].multiplier() + self.mults()[i].multiplier(),
                );
                let mut mults = self.mults()[..i - 1].to_vec();
                mults.push(squished);
                mults.extend_from_slice(&self.mults()[i + 1..]);
                return Conc::new(mults).reduce();
            }
        }

        // A singular mult over a one-conc pattern splices in place:
        // a(d(ab|a*c)) is ad(ab|a*c). Not with a bigger multiplier, and
        // not with more than one alternative.
        for (i, mult) in self.mults().iter().enumerate() {
            if mult.multiplier() != ONE {
                continue;
            }
            if let Multiplicand::Pattern(pattern) = mult.multiplicand() {
                if pattern.concs().len() == 1 {
                    if let Some(single) = pattern.concs().iter().next() {
                        let mut mults = self.mults()[..i].to_vec();
                        mults.extend_from_slice(single.mults());
                        mults.extend_from_slice(&self.mults()[i + 1..]);
                        return Conc::new(mults).reduce();
                    }
                }
            }
        }

        Term::Conc(self.clone())
    }
}

impl Reduce for Pattern {
    fn reduce(&self) -> Term {
        // An alternative containing a vacuous mult can never match; drop it.
        for conc in self.concs() {
            if conc.mults().iter().any(is_vacuous) {
                let rest = Pattern::new(
                    self.concs().iter().filter(|c| *c != conc).cloned(),
                );
                return rest.reduce();
            }
        }

        // No point alternating among one possibility.
        if self.concs().len() == 1 {
            if let Some(only) = self.concs().iter().next() {
                return only.reduce();
            }
        }

        // Reduce children, bulking back up to concs; rebuild only on change.
        let reduced: std::collections::BTreeSet<Conc> = self
            .concs()
            .iter()
            .map(|conc| conc.reduce().into_conc())
            .collect();
        if reduced != *self.concs() {
            return Pattern::new(reduced).reduce();
        }

        // Alternatives that are a single mult over a bare class merge when
        // their multipliers agree: 0|[1-9] is [0-9]. Only multipliers
        // admitting at most one repetition qualify: with two or more,
        // a{2}|b{2} would become [ab]{2}, which also matches "ab" and
        // "ba". Only rebuild if some pair actually merged, or this rule
        // would recurse forever.
        let mut merged: FxHashMap<Multiplier, CharClass> = FxHashMap::default();
        let mut rest: Vec<Conc> = Vec::new();
        let mut changed = false;
        for conc in self.concs() {
            let single_class = match conc.mults() {
                [only] if Multiplier::max(&only.multiplier()) <= Bound::Finite(1) => {
                    match only.multiplicand() {
                        Multiplicand::Class(class) => Some((only.multiplier(), class.clone())),
                        Multiplicand::Pattern(_) => None,
                    }
                }
                _ => None,
            };
            match single_class {
                Some((multiplier, class)) => {
                    merged
                        .entry(multiplier)
                        .and_modify(|acc| {
                            *acc = acc.union(&class);
                            changed = true;
                        })
                        .or_insert(class);
                }
                None => rest.push(conc.clone()),
            }
        }
        if changed {
            trace!("merged single-class alternatives across {} multipliers", merged.len());
            rest.extend(
                merged
                    .into_iter()
                    .map(|(multiplier, class)| Conc::new(vec![Mult::new(class, multiplier)])),
            );
            return Pattern::new(rest).reduce();
        }

        // Factor a shared prefix out of all alternatives. This deepens the
        // tree by one level but strictly cuts the total mult count.
        let (prefix, leftovers) = self.conc_prefix();
        if !prefix.is_empty() {
            trace!("factored common prefix out of {} alternatives", self.concs().len());
            let mut mults = prefix.mults().to_vec();
            mults.push(Mult::new(leftovers, ONE));
            return Conc::new(mults).reduce();
        }

        // Same for a shared suffix.
        let (leftovers, suffix) = self.conc_suffix();
        if !suffix.is_empty() {
            trace!("factored common suffix out of {} alternatives", self.concs().len());
            let mut mults = vec![Mult::new(leftovers, ONE)];
            mults.extend_from_slice(suffix.mults());
            return Conc::new(mults).reduce();
        }

        Term::Pattern(self.clone())
    }
}

impl Reduce for Term {
    fn reduce(&self) -> Term {
        match self {
            Term::Class(class) => class.reduce(),
            Term::Mult(mult) => mult.reduce(),
            Term::Conc(conc) => conc.reduce(),
            Term::Pattern(pattern) => pattern.reduce(),
        }
    }
}
