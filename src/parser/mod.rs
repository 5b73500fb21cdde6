//! Recursive-descent parser for the regex dialect.
//!
//! The grammar, by term kind:
//!
//! ```text
//! pattern      := conc ('|' conc)*
//! conc         := mult*
//! mult         := multiplicand multiplier?
//! multiplicand := '(' pattern ')' | charclass
//! charclass    := '.' | '\w' | '\W' | '\d' | '\D' | '\s' | '\S'
//!               | '[' '^'? item* ']' | escape | <any non-special char>
//! multiplier   := '?' | '*' | '+' | '{' int '}' | '{' int ',' '}'
//!               | '{' int ',' int '}' | <empty>
//! ```
//!
//! There is no token stream: regex syntax gives the same byte different
//! meanings depending on where it sits (`-` is an operator only inside
//! brackets, `{` only opens a quantifier when a well-formed one follows),
//! so the matchers work directly on a `(&str, byte offset)` cursor.
//!
//! Each matcher returns `Result<(value, next_offset), MatchFail>`.
//! [`MatchFail`] is a zero-sized backtracking signal: alternatives are
//! tried cheaply and often, and a failed attempt leaves no state behind
//! beyond the untouched offset the caller still holds. Only the top-level
//! [`parse`] converts a leftover cursor into a public [`Error`].

use tracing::debug;

use crate::error::{Error, Result};
use crate::syntax::charclass::{
    BRACKET_RANGES, CharClass, INNER_SPECIAL, NAMED_ESCAPES, OUTER_SPECIAL, SHORTHANDS,
};
use crate::syntax::conc::Conc;
use crate::syntax::mult::{Mult, Multiplicand};
use crate::syntax::multiplier::{Bound, Multiplier, ONE, PLUS, QM, STAR};
use crate::syntax::pattern::Pattern;

/// Zero-sized signal that a matcher did not match at the given position.
/// Almost always caught; never surfaced to callers.
struct MatchFail;

/// A successful match carries the parsed value and the offset just past it.
type Matched<T> = std::result::Result<(T, usize), MatchFail>;

/// Parse a complete regular expression.
///
/// The whole input must be consumed; anything left over is reported as a
/// parse error carrying the offset of the first unconsumed byte. Note that
/// the empty string is a valid regex (it matches exactly `""`), as is a
/// trailing `|` (one alternative is the empty string).
pub fn parse(input: &str) -> Result<Pattern> {
    let (pattern, consumed) = match_pattern(input, 0);
    if consumed != input.len() {
        return Err(Error::parse_at(consumed));
    }
    debug!("parsed {} byte regex into {} alternatives", input.len(), pattern.concs().len());
    Ok(pattern)
}

// =============================================================================
// Cursor primitives
// =============================================================================

/// Match an exact literal at `at`.
fn match_literal(input: &str, at: usize, literal: &str) -> std::result::Result<usize, MatchFail> {
    if input[at..].starts_with(literal) {
        Ok(at + literal.len())
    } else {
        Err(MatchFail)
    }
}

/// Consume any single character at `at`.
fn next_char(input: &str, at: usize) -> Matched<char> {
    match input[at..].chars().next() {
        Some(ch) => Ok((ch, at + ch.len_utf8())),
        None => Err(MatchFail),
    }
}

// =============================================================================
// Term matchers
// =============================================================================

fn match_pattern(input: &str, at: usize) -> (Pattern, usize) {
    let mut concs = Vec::new();

    let (first, mut at) = match_conc(input, at);
    concs.push(first);

    while let Ok(next) = match_literal(input, at, "|") {
        let (conc, next) = match_conc(input, next);
        concs.push(conc);
        at = next;
    }

    (Pattern::new(concs), at)
}

fn match_conc(input: &str, at: usize) -> (Conc, usize) {
    let mut mults = Vec::new();
    let mut at = at;
    while let Ok((mult, next)) = match_mult(input, at) {
        mults.push(mult);
        at = next;
    }
    (Conc::new(mults), at)
}

fn match_mult(input: &str, at: usize) -> Matched<Mult> {
    let (multiplicand, at) = match match_group(input, at) {
        Ok((pattern, next)) => (Multiplicand::Pattern(pattern), next),
        Err(MatchFail) => {
            let (class, next) = match_charclass(input, at)?;
            (Multiplicand::Class(class), next)
        }
    };
    let (multiplier, at) = match_multiplier(input, at);
    Ok((Mult::new(multiplicand, multiplier), at))
}

/// A parenthesized sub-pattern. Failure backtracks to the opening paren.
fn match_group(input: &str, at: usize) -> Matched<Pattern> {
    let at = match_literal(input, at, "(")?;
    let (pattern, at) = match_pattern(input, at);
    let at = match_literal(input, at, ")")?;
    Ok((pattern, at))
}

// =============================================================================
// Character classes
// =============================================================================

fn match_charclass(input: &str, at: usize) -> Matched<CharClass> {
    // Shorthands first: ".", "\w", "\d", "\s" and their negations.
    for (class, text) in SHORTHANDS.iter() {
        if let Ok(next) = match_literal(input, at, text) {
            return Ok((class.clone(), next));
        }
    }

    if let Ok(matched) = match_negated_bracket(input, at) {
        return Ok(matched);
    }
    if let Ok(matched) = match_bracket(input, at) {
        return Ok(matched);
    }

    // Named escapes, e.g. "\t" for a literal tab.
    for (ch, text) in NAMED_ESCAPES {
        if let Ok(next) = match_literal(input, at, text) {
            return Ok((CharClass::new([ch]), next));
        }
    }

    // Backslash-escaped metacharacters, e.g. "\{" for a literal brace.
    if let Ok(after) = match_literal(input, at, "\\") {
        if let Ok((ch, next)) = next_char(input, after) {
            if OUTER_SPECIAL.contains(ch) {
                return Ok((CharClass::new([ch]), next));
            }
        }
    }

    // Any single non-special character.
    let (ch, next) = next_char(input, at)?;
    if OUTER_SPECIAL.contains(ch) {
        return Err(MatchFail);
    }
    Ok((CharClass::new([ch]), next))
}

fn match_negated_bracket(input: &str, at: usize) -> Matched<CharClass> {
    let at = match_literal(input, at, "[^")?;
    let (chars, at) = match_bracket_interior(input, at);
    let at = match_literal(input, at, "]")?;
    Ok((CharClass::negated(chars), at))
}

fn match_bracket(input: &str, at: usize) -> Matched<CharClass> {
    let at = match_literal(input, at, "[")?;
    let (chars, at) = match_bracket_interior(input, at);
    let at = match_literal(input, at, "]")?;
    Ok((CharClass::new(chars), at))
}

/// Zero or more bracket items; an empty interior is allowed.
fn match_bracket_interior(input: &str, at: usize) -> (Vec<char>, usize) {
    let mut chars = Vec::new();
    let mut at = at;
    while let Ok((mut item, next)) = match_bracket_item(input, at) {
        chars.append(&mut item);
        at = next;
    }
    (chars, at)
}

/// One bracket item: either a span like `a-f`, or a single character.
///
/// A span is only a span when both endpoints sit in the same allowable
/// range (`A-Z`, `a-z`, `0-9`) in strictly ascending order. Otherwise the
/// item falls back to the first character alone, and the dash is consumed
/// later as a literal.
fn match_bracket_item(input: &str, at: usize) -> Matched<Vec<char>> {
    let (first, after_first) = match_bracket_char(input, at)?;

    if let Ok(after_dash) = match_literal(input, after_first, "-") {
        if let Ok((last, after_last)) = match_bracket_char(input, after_dash) {
            for span in BRACKET_RANGES {
                if let (Some(i), Some(j)) = (span.find(first), span.find(last)) {
                    if i < j {
                        return Ok((span[i..=j].chars().collect(), after_last));
                    }
                }
            }
        }
    }

    Ok((vec![first], after_first))
}

/// One character inside brackets, where the special set is `\ [ ] ^ -`.
fn match_bracket_char(input: &str, at: usize) -> Matched<char> {
    for (ch, text) in NAMED_ESCAPES {
        if let Ok(next) = match_literal(input, at, text) {
            return Ok((ch, next));
        }
    }

    if let Ok(after) = match_literal(input, at, "\\") {
        if let Ok((ch, next)) = next_char(input, after) {
            if INNER_SPECIAL.contains(ch) {
                return Ok((ch, next));
            }
        }
    }

    let (ch, next) = next_char(input, at)?;
    if INNER_SPECIAL.contains(ch) {
        return Err(MatchFail);
    }
    Ok((ch, next))
}

// =============================================================================
// Multipliers
// =============================================================================

/// A multiplier suffix. Always succeeds: no suffix means multiplier one.
fn match_multiplier(input: &str, at: usize) -> (Multiplier, usize) {
    if let Ok(matched) = match_braced_multiplier(input, at) {
        return matched;
    }
    for (multiplier, text) in [(QM, "?"), (STAR, "*"), (PLUS, "+")] {
        if let Ok(next) = match_literal(input, at, text) {
            return (multiplier, next);
        }
    }
    (ONE, at)
}

fn match_braced_multiplier(input: &str, at: usize) -> Matched<Multiplier> {
    let after_brace = match_literal(input, at, "{")?;
    let (min, after_min) = match_integer(input, after_brace)?;

    if let Ok(after_comma) = match_literal(input, after_min, ",") {
        // {2,3}
        if let Ok((max, after_max)) = match_integer(input, after_comma) {
            if let Ok(next) = match_literal(input, after_max, "}") {
                if min > max {
                    // {5,3} quantifies nothing; refuse the whole suffix so
                    // the error lands on the brace.
                    return Err(MatchFail);
                }
                return Ok((Multiplier::finite(min, max), next));
            }
        }
        // {2,}
        if let Ok(next) = match_literal(input, after_comma, "}") {
            return Ok((Multiplier::new(Bound::Finite(min), Bound::Inf), next));
        }
        return Err(MatchFail);
    }

    // {2}
    let next = match_literal(input, after_min, "}")?;
    Ok((Multiplier::finite(min, min), next))
}

/// A decimal integer: `0`, or a nonzero digit followed by digits. Leading
/// zeroes are rejected, matching what the printer emits.
fn match_integer(input: &str, at: usize) -> Matched<usize> {
    if let Ok(next) = match_literal(input, at, "0") {
        return Ok((0, next));
    }

    let (first, mut at) = next_char(input, at)?;
    if !('1'..='9').contains(&first) {
        return Err(MatchFail);
    }
    let mut value = first as usize - '0' as usize;

    while let Ok((digit, next)) = next_char(input, at) {
        if !digit.is_ascii_digit() {
            break;
        }
        value = value * 10 + (digit as usize - '0' as usize);
        at = next;
    }

    Ok((value, at))
}
