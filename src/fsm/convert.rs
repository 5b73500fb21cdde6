//! Acceptor-to-term conversion by state elimination.
//!
//! The machine is viewed as a generalized automaton whose edges carry
//! whole [`Pattern`]s instead of single symbols. A virtual start node
//! reaches the initial state on the empty string, every final state
//! reaches a virtual accept node on the empty string, and then the real
//! states are ripped out one at a time: removing `rip` replaces every
//! route `p → rip → q` with a direct edge labelled
//! `label(p,rip) · label(rip,rip)* · label(rip,q)`, merged into whatever
//! already connects `p` to `q`. When only the virtual nodes remain, the
//! edge between them is the whole language.
//!
//! Labels are reduced at every merge, which keeps the intermediate terms
//! from snowballing.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::fsm::{Fsm, StateId, Symbol};
use crate::reduce::Reduce;
use crate::syntax::charclass::CharClass;
use crate::syntax::conc::Conc;
use crate::syntax::multiplier::STAR;
use crate::syntax::pattern::Pattern;
use crate::syntax::term::Term;

impl Fsm {
    /// Synthesize a pattern denoting exactly this machine's language.
    ///
    /// Transition groups that include the [`Symbol::Other`] sentinel come
    /// back as negated classes over the rest of the concrete alphabet, so
    /// a machine built from `.` or `[^…]` round-trips into the same kind
    /// of class it came from.
    pub fn to_pattern(&self) -> Pattern {
        let states = self.len();
        let start = states;
        let accept = states + 1;
        debug!("eliminating {} states back into a pattern", states);

        let concrete: BTreeSet<char> = self
            .alphabet()
            .iter()
            .filter_map(|symbol| match symbol {
                Symbol::Char(ch) => Some(*ch),
                Symbol::Other => None,
            })
            .collect();

        // Seed the edge labels: transitions grouped by endpoint pair, each
        // group folded into one character class.
        let mut edges: FxHashMap<(StateId, StateId), Pattern> = FxHashMap::default();
        for from in 0..states {
            let mut groups: FxHashMap<StateId, (BTreeSet<char>, bool)> = FxHashMap::default();
            for (&symbol, &to) in &self.map[from] {
                let group = groups.entry(to).or_default();
                match symbol {
                    Symbol::Char(ch) => {
                        group.0.insert(ch);
                    }
                    Symbol::Other => group.1 = true,
                }
            }
            for (to, (chars, has_other)) in groups {
                let class = if has_other {
                    CharClass::negated(concrete.difference(&chars).copied())
                } else {
                    CharClass::new(chars)
                };
                edges.insert((from, to), Pattern::from(class));
            }
        }

        let empty_string = Pattern::new([Conc::empty()]);
        edges.insert((start, self.initial), empty_string.clone());
        for &state in &self.finals {
            edges.insert((state, accept), empty_string.clone());
        }

        for rip in 0..states {
            let closure = edges
                .remove(&(rip, rip))
                .map(|label| (Term::from(label) * STAR).reduce().into_pattern());

            let incoming: Vec<(StateId, Pattern)> = edges
                .iter()
                .filter(|((_, to), _)| *to == rip)
                .map(|((from, _), label)| (*from, label.clone()))
                .collect();
            let outgoing: Vec<(StateId, Pattern)> = edges
                .iter()
                .filter(|((from, _), _)| *from == rip)
                .map(|((_, to), label)| (*to, label.clone()))
                .collect();
            edges.retain(|(from, to), _| *from != rip && *to != rip);

            for (from, via_in) in &incoming {
                for (to, via_out) in &outgoing {
                    let mut route = Term::from(via_in.clone());
                    if let Some(closure) = &closure {
                        route = route + closure.clone();
                    }
                    let route = (route + via_out.clone()).into_pattern();

                    let label = match edges.remove(&(*from, *to)) {
                        Some(existing) => (Term::from(existing) | route).into_pattern(),
                        None => route,
                    };
                    edges.insert((*from, *to), label);
                }
            }
        }

        edges
            .remove(&(start, accept))
            .unwrap_or_else(Pattern::nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::shared_alphabet;
    use crate::parser::parse;

    fn round_trip(regex: &str) -> (Fsm, Fsm) {
        let pattern = parse(regex).unwrap();
        let alphabet = shared_alphabet([&pattern]);
        let machine = pattern.to_fsm(&alphabet);
        let back = machine.to_pattern().to_fsm(&alphabet);
        (machine, back)
    }

    #[test]
    fn test_round_trip_literal() {
        let (machine, back) = round_trip("abc");
        assert!(machine.equivalent(&back));
    }

    #[test]
    fn test_round_trip_alternation_and_star() {
        let (machine, back) = round_trip("a*b|c");
        assert!(machine.equivalent(&back));
    }

    #[test]
    fn test_round_trip_negated_class() {
        let (machine, back) = round_trip("a[^ab]{1,2}");
        assert!(machine.equivalent(&back));
    }

    #[test]
    fn test_null_machine_becomes_nothing() {
        let alphabet = shared_alphabet(std::iter::empty());
        let machine = Fsm::null(&alphabet);
        assert_eq!(machine.to_pattern(), Pattern::nothing());
    }

    #[test]
    fn test_epsilon_machine_accepts_only_empty() {
        let alphabet = shared_alphabet(std::iter::empty());
        let machine = Fsm::epsilon(&alphabet);
        let back = machine.to_pattern().to_fsm(&alphabet);
        assert!(back.accepts(""));
        assert!(!back.accepts("x"));
    }
}
