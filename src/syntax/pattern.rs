//! Patterns: unordered alternations of concs.
//!
//! `abc|def(ghi|jkl)` is a pattern of two concs, the second of which ends in
//! a mult whose multiplicand is again a pattern. Because the concs form a
//! set, `a|b` and `b|a` are the same term and hash identically. The empty
//! pattern denotes the empty language and is the only term that does.
//!
//! Patterns also know how to factor a shared prefix or suffix out of their
//! alternatives (`ZA|ZB|ZC` is `Z` followed by `A|B|C`); the reduction rules
//! are built on the two factoring primitives defined here.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::syntax::charclass::CharClass;
use crate::syntax::conc::Conc;
use crate::syntax::mult::{Mult, Multiplicand};
use crate::syntax::multiplier::ZERO;

/// An unordered set of [`Conc`] alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pattern {
    concs: BTreeSet<Conc>,
}

impl Pattern {
    /// A pattern over the given alternatives. Duplicates collapse.
    pub fn new(concs: impl IntoIterator<Item = Conc>) -> Self {
        Self {
            concs: concs.into_iter().collect(),
        }
    }

    /// The empty pattern, denoting the empty language. Note that this is
    /// not the pattern containing only [`Conc::empty`], which denotes
    /// `{""}`.
    pub fn nothing() -> Self {
        Self {
            concs: BTreeSet::new(),
        }
    }

    /// The alternatives, in their stable set order.
    pub fn concs(&self) -> &BTreeSet<Conc> {
        &self.concs
    }

    /// Whether this is the empty language.
    pub fn is_nothing(&self) -> bool {
        self.concs.is_empty()
    }

    /// Every character mentioned anywhere in this term, at any depth.
    ///
    /// Characters a negated class excludes still count: the class `[^ab]`
    /// mentions `a` and `b`, and an acceptor for it needs them (plus a
    /// sentinel for everything else) in its alphabet.
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut chars = BTreeSet::new();
        self.collect_alphabet(&mut chars);
        chars
    }

    fn collect_alphabet(&self, chars: &mut BTreeSet<char>) {
        for conc in &self.concs {
            for mult in conc.mults() {
                match mult.multiplicand() {
                    Multiplicand::Class(class) => chars.extend(class.chars().iter().copied()),
                    Multiplicand::Pattern(pattern) => pattern.collect_alphabet(chars),
                }
            }
        }
    }

    /// Render as regex text: the alternatives sorted and joined with `|`.
    ///
    /// The empty pattern has no textual form.
    pub fn render(&self) -> Result<String> {
        if self.concs.is_empty() {
            return Err(Error::not_renderable("empty pattern"));
        }
        let mut rendered = self
            .concs
            .iter()
            .map(Conc::render)
            .collect::<Result<Vec<_>>>()?;
        rendered.sort();
        Ok(rendered.join("|"))
    }

    // =========================================================================
    // Common-factor extraction
    // =========================================================================

    /// Factor one mult off the front of every alternative.
    ///
    /// `ZA|ZB|ZC` gives `Z` and `A|B|C`. The factored mult is the
    /// [`Mult::common`] intersection of the first mults; each alternative
    /// keeps the subtraction residue, or drops its first mult entirely when
    /// the residue multiplier is zero.
    ///
    /// Returns `None` when any alternative is empty, when the first mults
    /// share no multiplicand, or when the shared multiplier is zero. The
    /// empty pattern has no prefix either.
    pub(crate) fn mult_prefix(&self) -> Option<(Mult, Pattern)> {
        let mut common: Option<Mult> = None;
        for conc in &self.concs {
            let first = conc.mults().first()?;
            let next = match &common {
                None => first.clone(),
                Some(acc) => acc.common(first).ok()?,
            };
            // Shared multiplicand but nothing mandatory or optional in
            // common, e.g. "Z*AB|ZC" seen from the "ZC" side.
            if next.multiplier() == ZERO {
                return None;
            }
            common = Some(next);
        }
        let common = common?;

        let mut leftovers = Vec::with_capacity(self.concs.len());
        for conc in &self.concs {
            let residue = conc.mults()[0].subtract(&common).ok()?;
            if residue.multiplier() == ZERO {
                leftovers.push(Conc::new(conc.mults()[1..].to_vec()));
            } else {
                let mut mults = Vec::with_capacity(conc.mults().len());
                mults.push(residue);
                mults.extend_from_slice(&conc.mults()[1..]);
                leftovers.push(Conc::new(mults));
            }
        }

        Some((common, Pattern::new(leftovers)))
    }

    /// Mirror image of [`Pattern::mult_prefix`]: factor one mult off the
    /// back of every alternative. `AZ|BZ|CZ` gives `A|B|C` and `Z`.
    pub(crate) fn mult_suffix(&self) -> Option<(Pattern, Mult)> {
        let mut common: Option<Mult> = None;
        for conc in &self.concs {
            let last = conc.mults().last()?;
            let next = match &common {
                None => last.clone(),
                Some(acc) => acc.common(last).ok()?,
            };
            if next.multiplier() == ZERO {
                return None;
            }
            common = Some(next);
        }
        let common = common?;

        let mut leftovers = Vec::with_capacity(self.concs.len());
        for conc in &self.concs {
            let split = conc.mults().len() - 1;
            let residue = conc.mults()[split].subtract(&common).ok()?;
            let mut mults = conc.mults()[..split].to_vec();
            if residue.multiplier() != ZERO {
                mults.push(residue);
            }
            leftovers.push(Conc::new(mults));
        }

        Some((Pattern::new(leftovers), common))
    }

    /// The longest conc that prefixes every alternative, possibly empty,
    /// together with what remains once it is cut off.
    ///
    /// `ZA|ZB|ZC` gives `Z` and `A|B|C`; `ZA|ZB|Z` gives `Z` and `A|B|`
    /// (note the surviving empty alternative); `CZ|CZ` gives `CZ` and an
    /// empty-string leftover.
    pub(crate) fn conc_prefix(&self) -> (Conc, Pattern) {
        let mut prefix = Vec::new();
        let mut leftovers = self.clone();
        while let Some((mult, rest)) = leftovers.mult_prefix() {
            prefix.push(mult);
            leftovers = rest;
        }
        (Conc::new(prefix), leftovers)
    }

    /// As [`Pattern::conc_prefix`], for suffixes. The pair is returned in
    /// reading order: leftovers first, shared suffix second.
    pub(crate) fn conc_suffix(&self) -> (Pattern, Conc) {
        let mut suffix = Vec::new();
        let mut leftovers = self.clone();
        while let Some((rest, mult)) = leftovers.mult_suffix() {
            suffix.push(mult);
            leftovers = rest;
        }
        suffix.reverse();
        (leftovers, Conc::new(suffix))
    }
}

impl From<CharClass> for Pattern {
    /// Bulk a lone class up into a one-alternative pattern.
    fn from(class: CharClass) -> Self {
        Pattern::new([Conc::new(vec![Mult::new(
            class,
            crate::syntax::multiplier::ONE,
        )])])
    }
}
