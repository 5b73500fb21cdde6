//! Finite-state acceptors for language-level operations.
//!
//! The term algebra can simplify and combine regexes symbolically, but
//! questions about the *languages* behind them (are these equivalent? what
//! matches both?) go through automata. This module provides the small
//! acceptor the rest of the crate consumes:
//!
//! - construction from terms ([`build`]) and back again ([`Fsm::to_pattern`])
//! - `union`, `intersection`, `concatenate`, `star` and multiplier
//!   repetition, all over acceptors sharing one alphabet
//! - `accepts` and `equivalent` for checking behavior
//!
//! Machines are deterministic and built by a breadth-first crawl over
//! meta-states, so states are always reachable and numbered in discovery
//! order. Transition maps are partial: a missing entry is the implicit
//! dead state, which saves every machine from carrying an explicit
//! oblivion row.
//!
//! Alphabets are sets of [`Symbol`]s rather than raw chars. The extra
//! [`Symbol::Other`] sentinel stands for "any character nobody mentioned",
//! which is what makes negated classes and `.` finitely representable.

pub mod build;
mod convert;

use std::collections::BTreeSet;
use std::hash::Hash;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use crate::syntax::multiplier::{Bound, Multiplier};

pub use build::shared_alphabet;
pub(crate) use build::intersect;

/// Identifier for a single state. States of a machine are `0..len`.
pub type StateId = usize;

/// One symbol of an acceptor alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// An ordinary character.
    Char(char),
    /// Every character the alphabet does not list explicitly.
    Other,
}

/// An acceptor alphabet. Insertion-ordered so that state discovery, and
/// with it state numbering, is deterministic.
pub type Alphabet = IndexSet<Symbol>;

/// A deterministic finite-state acceptor.
#[derive(Debug, Clone)]
pub struct Fsm {
    alphabet: Alphabet,
    initial: StateId,
    finals: BTreeSet<StateId>,
    /// Per-state transition row; a missing symbol leads to the implicit
    /// dead state.
    map: Vec<FxHashMap<Symbol, StateId>>,
}

impl Fsm {
    pub(crate) fn from_parts(
        alphabet: Alphabet,
        initial: StateId,
        finals: BTreeSet<StateId>,
        map: Vec<FxHashMap<Symbol, StateId>>,
    ) -> Self {
        Self {
            alphabet,
            initial,
            finals,
            map,
        }
    }

    /// The acceptor of exactly the empty string.
    pub fn epsilon(alphabet: &Alphabet) -> Self {
        Self {
            alphabet: alphabet.clone(),
            initial: 0,
            finals: BTreeSet::from([0]),
            map: vec![FxHashMap::default()],
        }
    }

    /// The acceptor of the empty language.
    pub fn null(alphabet: &Alphabet) -> Self {
        Self {
            alphabet: alphabet.clone(),
            initial: 0,
            finals: BTreeSet::new(),
            map: vec![FxHashMap::default()],
        }
    }

    /// The alphabet this machine runs over.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of (reachable) states.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether this machine has no states. Never true for machines built
    /// here, but the usual companion of [`Fsm::len`].
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn step(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.map[state].get(&symbol).copied()
    }

    fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// Run the machine over a string. Characters absent from the alphabet
    /// fall back to the [`Symbol::Other`] sentinel; if the alphabet has no
    /// sentinel either, the string is simply not accepted.
    pub fn accepts(&self, input: &str) -> bool {
        let mut state = self.initial;
        for ch in input.chars() {
            let symbol = if self.alphabet.contains(&Symbol::Char(ch)) {
                Symbol::Char(ch)
            } else if self.alphabet.contains(&Symbol::Other) {
                Symbol::Other
            } else {
                return false;
            };
            state = match self.step(state, symbol) {
                Some(next) => next,
                None => return false,
            };
        }
        self.is_final(state)
    }

    /// Accept what either machine accepts.
    pub fn union(&self, other: &Fsm) -> Fsm {
        self.combine(other, |a, b| a || b)
    }

    /// Accept what both machines accept.
    pub fn intersection(&self, other: &Fsm) -> Fsm {
        self.combine(other, |a, b| a && b)
    }

    /// Product construction over live state pairs. `None` on either side is
    /// that machine's dead state; the pair dies only when both sides do.
    fn combine(&self, other: &Fsm, accept: fn(bool, bool) -> bool) -> Fsm {
        assert_eq!(
            self.alphabet, other.alphabet,
            "combined acceptors must share an alphabet"
        );
        type Meta = (Option<StateId>, Option<StateId>);
        let initial: Meta = (Some(self.initial), Some(other.initial));
        crawl(
            &self.alphabet,
            initial,
            |&(a, b)| {
                accept(
                    a.is_some_and(|s| self.is_final(s)),
                    b.is_some_and(|s| other.is_final(s)),
                )
            },
            |&(a, b), symbol| {
                let next = (
                    a.and_then(|s| self.step(s, symbol)),
                    b.and_then(|s| other.step(s, symbol)),
                );
                match next {
                    (None, None) => None,
                    live => Some(live),
                }
            },
        )
    }

    /// Accept a string of this machine followed by a string of `other`.
    ///
    /// The crawl tracks one state of `self` plus every state `other` could
    /// have reached, seeding `other`'s initial state whenever `self` sits
    /// in a final state.
    pub fn concatenate(&self, other: &Fsm) -> Fsm {
        assert_eq!(
            self.alphabet, other.alphabet,
            "concatenated acceptors must share an alphabet"
        );
        type Meta = (Option<StateId>, BTreeSet<StateId>);

        let seed = |first: Option<StateId>, mut rest: BTreeSet<StateId>| -> Meta {
            if first.is_some_and(|s| self.is_final(s)) {
                rest.insert(other.initial);
            }
            (first, rest)
        };

        let initial = seed(Some(self.initial), BTreeSet::new());
        crawl(
            &self.alphabet,
            initial,
            |(_, rest)| rest.iter().any(|&s| other.is_final(s)),
            |(first, rest), symbol| {
                let next_first = first.and_then(|s| self.step(s, symbol));
                let next_rest: BTreeSet<StateId> =
                    rest.iter().filter_map(|&s| other.step(s, symbol)).collect();
                let next = seed(next_first, next_rest);
                if next.0.is_none() && next.1.is_empty() {
                    None
                } else {
                    Some(next)
                }
            },
        )
    }

    /// Kleene closure: zero or more repetitions.
    pub fn star(&self) -> Fsm {
        // Crawl the one-or-more closure, looping back to the initial state
        // every time a repetition completes, then admit the empty string.
        let plus = crawl(
            &self.alphabet,
            BTreeSet::from([self.initial]),
            |set: &BTreeSet<StateId>| set.iter().any(|&s| self.is_final(s)),
            |set, symbol| {
                let mut next: BTreeSet<StateId> =
                    set.iter().filter_map(|&s| self.step(s, symbol)).collect();
                if next.iter().any(|&s| self.is_final(s)) {
                    next.insert(self.initial);
                }
                if next.is_empty() { None } else { Some(next) }
            },
        );
        Fsm::epsilon(&self.alphabet).union(&plus)
    }

    /// Repeat this machine's language according to a multiplier:
    /// `min` mandatory copies, then either optional copies up to `max` or
    /// a full Kleene closure for an unbounded `max`.
    pub fn repeat(&self, multiplier: &Multiplier) -> Fsm {
        let min = match Multiplier::min(multiplier) {
            // Infinitely many mandatory repetitions can never finish.
            Bound::Inf => return Fsm::null(&self.alphabet),
            Bound::Finite(min) => min,
        };

        let mut result = Fsm::epsilon(&self.alphabet);
        for _ in 0..min {
            result = result.concatenate(self);
        }

        match Multiplier::max(multiplier) {
            Bound::Inf => result.concatenate(&self.star()),
            Bound::Finite(max) => {
                let optional = self.union(&Fsm::epsilon(&self.alphabet));
                for _ in 0..max - min {
                    result = result.concatenate(&optional);
                }
                result
            }
        }
    }

    /// Whether two machines accept exactly the same language, by walking
    /// the product of live state pairs and demanding that finality always
    /// agrees.
    pub fn equivalent(&self, other: &Fsm) -> bool {
        assert_eq!(
            self.alphabet, other.alphabet,
            "compared acceptors must share an alphabet"
        );
        type Meta = (Option<StateId>, Option<StateId>);
        let mut seen: BTreeSet<Meta> = BTreeSet::new();
        let mut queue: Vec<Meta> = vec![(Some(self.initial), Some(other.initial))];
        while let Some((a, b)) = queue.pop() {
            if !seen.insert((a, b)) {
                continue;
            }
            let final_a = a.is_some_and(|s| self.is_final(s));
            let final_b = b.is_some_and(|s| other.is_final(s));
            if final_a != final_b {
                return false;
            }
            for &symbol in &self.alphabet {
                let next = (
                    a.and_then(|s| self.step(s, symbol)),
                    b.and_then(|s| other.step(s, symbol)),
                );
                if next != (None, None) {
                    queue.push(next);
                }
            }
        }
        true
    }
}

/// Build a machine by breadth-first discovery over abstract meta-states.
///
/// `follow` returns the meta-state reached on a symbol, or `None` for the
/// dead state. States are numbered in discovery order starting from the
/// initial meta-state, so construction is deterministic given a
/// deterministic alphabet order.
fn crawl<M, F, G>(alphabet: &Alphabet, initial: M, is_final: F, mut follow: G) -> Fsm
where
    M: Clone + Eq + Hash,
    F: Fn(&M) -> bool,
    G: FnMut(&M, Symbol) -> Option<M>,
{
    let mut index: FxHashMap<M, StateId> = FxHashMap::default();
    let mut states: Vec<M> = vec![initial.clone()];
    index.insert(initial, 0);

    let mut finals = BTreeSet::new();
    let mut map: Vec<FxHashMap<Symbol, StateId>> = Vec::new();

    let mut current = 0;
    while current < states.len() {
        let meta = states[current].clone();
        if is_final(&meta) {
            finals.insert(current);
        }

        let mut row = FxHashMap::default();
        for &symbol in alphabet.iter() {
            if let Some(next) = follow(&meta, symbol) {
                let id = match index.get(&next) {
                    Some(&id) => id,
                    None => {
                        let id = states.len();
                        states.push(next.clone());
                        index.insert(next, id);
                        id
                    }
                };
                row.insert(symbol, id);
            }
        }
        map.push(row);
        current += 1;
    }

    Fsm::from_parts(alphabet.clone(), 0, finals, map)
}
