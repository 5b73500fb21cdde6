//! Character classes: possibly-negated finite sets of characters.
//!
//! A [`CharClass`] is a set of chars plus a `negated` flag, covering `a`,
//! `[a-z]`, `\d`, `.`, `[^a]` and friends. A negated class stands for every
//! character of the ambient alphabet *not* listed in the set; the complement
//! is never materialized, which keeps `.` and `\D` cheap no matter how large
//! the alphabet eventually turns out to be. Because both polarities must
//! combine cleanly, the set operations below are written case-by-case over
//! the four polarity combinations.

use std::collections::BTreeSet;
use std::ops::Sub;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Characters that must be escaped outside square brackets.
pub(crate) const OUTER_SPECIAL: &str = "\\[]|().?*+{}";

/// Characters that must be escaped inside square brackets. Note how much
/// smaller this set is, and that `-` appears only here.
pub(crate) const INNER_SPECIAL: &str = "\\[]^-";

/// Control characters with a named escape, in render order.
pub(crate) const NAMED_ESCAPES: [(char, &str); 5] = [
    ('\t', "\\t"),
    ('\n', "\\n"),
    ('\u{B}', "\\v"),
    ('\u{C}', "\\f"),
    ('\r', "\\r"),
];

/// The spans usable in bracket ranges like `[a-z]`. Endpoints of a parsed or
/// rendered range must sit inside a single one of these, in ascending order.
pub(crate) const BRACKET_RANGES: [&str; 3] = [
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
];

const WORD_CHARS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
const DIGIT_CHARS: &str = "0123456789";
const SPACE_CHARS: &str = "\t\n\u{B}\u{C}\r ";

/// `\w`: ASCII word characters.
pub static WORD: LazyLock<CharClass> = LazyLock::new(|| CharClass::new(WORD_CHARS.chars()));

/// `\d`: ASCII digits.
pub static DIGIT: LazyLock<CharClass> = LazyLock::new(|| CharClass::new(DIGIT_CHARS.chars()));

/// `\s`: ASCII whitespace.
pub static SPACE: LazyLock<CharClass> = LazyLock::new(|| CharClass::new(SPACE_CHARS.chars()));

/// `\W`: anything but a word character.
pub static NON_WORD: LazyLock<CharClass> =
    LazyLock::new(|| CharClass::negated(WORD_CHARS.chars()));

/// `\D`: anything but a digit.
pub static NON_DIGIT: LazyLock<CharClass> =
    LazyLock::new(|| CharClass::negated(DIGIT_CHARS.chars()));

/// `\S`: anything but whitespace.
pub static NON_SPACE: LazyLock<CharClass> =
    LazyLock::new(|| CharClass::negated(SPACE_CHARS.chars()));

/// `.`: any character at all (the negation of the empty set).
pub static DOT: LazyLock<CharClass> = LazyLock::new(|| CharClass::negated([]));

/// Shorthand classes paired with their textual forms, in match order.
pub(crate) static SHORTHANDS: LazyLock<[(CharClass, &'static str); 7]> = LazyLock::new(|| {
    [
        (WORD.clone(), "\\w"),
        (DIGIT.clone(), "\\d"),
        (SPACE.clone(), "\\s"),
        (NON_WORD.clone(), "\\W"),
        (NON_DIGIT.clone(), "\\D"),
        (NON_SPACE.clone(), "\\S"),
        (DOT.clone(), "."),
    ]
});

/// A possibly-negated finite set of characters.
///
/// Equality and ordering are structural: `[ab]` equals `[ba]`, and `[^a]`
/// never equals `[a]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharClass {
    chars: BTreeSet<char>,
    negated: bool,
}

impl CharClass {
    /// A positive class over the given characters. Duplicates collapse.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
            negated: false,
        }
    }

    /// A negated class over the given characters, e.g. `[^ab]`.
    pub fn negated(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
            negated: true,
        }
    }

    /// The empty positive class, denoting the empty language over symbols.
    pub fn empty() -> Self {
        Self::new([])
    }

    /// The underlying character set (without interpreting negation).
    pub fn chars(&self) -> &BTreeSet<char> {
        &self.chars
    }

    /// Whether this class is negated.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether this class denotes `ch`.
    pub fn test(&self, ch: char) -> bool {
        self.chars.contains(&ch) != self.negated
    }

    /// Swap polarity: `[ab]` becomes `[^ab]` and vice versa.
    pub fn complement(&self) -> Self {
        Self {
            chars: self.chars.clone(),
            negated: !self.negated,
        }
    }

    /// Set union of the denoted languages.
    ///
    /// ```text
    /// ¬A ∪ ¬B = ¬(A ∩ B)      ¬A ∪ B = ¬(A ∖ B)
    /// A ∪ ¬B = ¬(B ∖ A)        A ∪ B
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        match (self.negated, other.negated) {
            (true, true) => Self::negated(self.chars.intersection(&other.chars).copied()),
            (true, false) => Self::negated(self.chars.difference(&other.chars).copied()),
            (false, true) => Self::negated(other.chars.difference(&self.chars).copied()),
            (false, false) => Self::new(self.chars.union(&other.chars).copied()),
        }
    }

    /// Set intersection of the denoted languages, the De Morgan dual of
    /// [`CharClass::union`].
    pub fn intersection(&self, other: &Self) -> Self {
        match (self.negated, other.negated) {
            (true, true) => Self::negated(self.chars.union(&other.chars).copied()),
            (true, false) => Self::new(other.chars.difference(&self.chars).copied()),
            (false, true) => Self::new(self.chars.difference(&other.chars).copied()),
            (false, false) => Self::new(self.chars.intersection(&other.chars).copied()),
        }
    }

    /// Set difference of the denoted languages, `A ∖ B`.
    pub fn difference(&self, other: &Self) -> Self {
        match (self.negated, other.negated) {
            (true, true) => Self::new(other.chars.difference(&self.chars).copied()),
            (true, false) => Self::negated(self.chars.union(&other.chars).copied()),
            (false, true) => Self::new(self.chars.intersection(&other.chars).copied()),
            (false, false) => Self::new(self.chars.difference(&other.chars).copied()),
        }
    }

    /// Whether every character denoted by `self` is denoted by `other`.
    ///
    /// `¬A ⊆ ¬B` iff `B ⊆ A`; a negated class is never contained in a
    /// positive one (the former is infinite); `A ⊆ ¬B` iff `A` and `B` are
    /// disjoint.
    pub fn issubset(&self, other: &Self) -> bool {
        match (self.negated, other.negated) {
            (true, true) => other.chars.is_subset(&self.chars),
            (true, false) => false,
            (false, true) => self.chars.is_disjoint(&other.chars),
            (false, false) => self.chars.is_subset(&other.chars),
        }
    }

    /// The textual form of a shorthand class, if this is one.
    pub(crate) fn shorthand(&self) -> Option<&'static str> {
        SHORTHANDS
            .iter()
            .find(|(class, _)| class == self)
            .map(|(_, text)| *text)
    }

    /// Render this class as regex text.
    ///
    /// Fails for the empty positive class, which denotes a language no
    /// regex fragment can express.
    pub fn render(&self) -> Result<String> {
        if let Some(text) = self.shorthand() {
            return Ok(text.to_string());
        }

        if self.chars.is_empty() {
            return Err(Error::not_renderable("empty character class"));
        }

        if self.negated {
            return Ok(format!("[^{}]", self.bracket_interior()));
        }

        // A lone character needs no brackets, only escaping.
        if self.chars.len() == 1 {
            if let Some(&ch) = self.chars.iter().next() {
                return Ok(escape_outer(ch));
            }
        }

        Ok(format!("[{}]", self.bracket_interior()))
    }

    /// Render the interior of a bracket expression, collapsing runs of four
    /// or more consecutive characters within one allowable range into `X-Y`
    /// form. Shorter runs are cheaper to print literally.
    fn bracket_interior(&self) -> String {
        fn flush(run: &mut Vec<char>, out: &mut String) {
            if run.len() <= 3 {
                for &ch in run.iter() {
                    out.push_str(&escape_inner(ch));
                }
            } else {
                out.push_str(&escape_inner(run[0]));
                out.push('-');
                out.push_str(&escape_inner(run[run.len() - 1]));
            }
            run.clear();
        }

        let mut out = String::new();
        let mut run: Vec<char> = Vec::new();

        // BTreeSet iteration is already sorted, so a run only ever has to
        // check whether the next character directly follows the last one
        // within the same allowable span.
        for &ch in &self.chars {
            if let Some(&last) = run.last() {
                let span_position = BRACKET_RANGES
                    .iter()
                    .find_map(|span| span.find(ch).map(|i| (span, i)));
                match span_position {
                    None => flush(&mut run, &mut out),
                    Some((span, i)) => {
                        if i == 0 || span.as_bytes()[i - 1] as char != last {
                            flush(&mut run, &mut out);
                        }
                    }
                }
            }
            run.push(ch);
        }
        flush(&mut run, &mut out);

        out
    }
}

impl Sub for CharClass {
    type Output = CharClass;

    /// Operator form of [`CharClass::difference`].
    fn sub(self, rhs: CharClass) -> CharClass {
        self.difference(&rhs)
    }
}

/// Escape a character for use outside brackets.
pub(crate) fn escape_outer(ch: char) -> String {
    if let Some((_, text)) = NAMED_ESCAPES.iter().find(|(c, _)| *c == ch) {
        return (*text).to_string();
    }
    if OUTER_SPECIAL.contains(ch) {
        return format!("\\{ch}");
    }
    ch.to_string()
}

/// Escape a character for use inside brackets.
pub(crate) fn escape_inner(ch: char) -> String {
    if INNER_SPECIAL.contains(ch) {
        return format!("\\{ch}");
    }
    if let Some((_, text)) = NAMED_ESCAPES.iter().find(|(c, _)| *c == ch) {
        return (*text).to_string();
    }
    ch.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(chars: &str) -> CharClass {
        CharClass::new(chars.chars())
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(class("ab"), class("ba"));
        assert_eq!(class("a"), class("a"));
        assert_ne!(class("a").complement(), class("a"));
    }

    #[test]
    fn test_double_complement() {
        assert_eq!(class("a").complement().complement(), class("a"));
    }

    #[test]
    fn test_test_respects_negation() {
        assert!(class("ab").test('a'));
        assert!(!class("ab").test('c'));
        assert!(!class("ab").complement().test('a'));
        assert!(class("ab").complement().test('c'));
        assert!(DOT.test('x'));
        assert!(!CharClass::empty().test('x'));
    }

    #[test]
    fn test_render_single_chars() {
        assert_eq!(class("a").render().unwrap(), "a");
        assert_eq!(class("{").render().unwrap(), "\\{");
        assert_eq!(class("\t").render().unwrap(), "\\t");
        assert_eq!(class("^").render().unwrap(), "^");
    }

    #[test]
    fn test_render_brackets() {
        assert_eq!(class("ab").render().unwrap(), "[ab]");
        assert_eq!(class("a{").render().unwrap(), "[a{]");
        assert_eq!(class("a\t").render().unwrap(), "[\\ta]");
        assert_eq!(class("a-").render().unwrap(), "[\\-a]");
        assert_eq!(class("a[").render().unwrap(), "[\\[a]");
        assert_eq!(class("a]").render().unwrap(), "[\\]a]");
        assert_eq!(class("a^").render().unwrap(), "[\\^a]");
    }

    #[test]
    fn test_render_collapses_long_runs_only() {
        assert_eq!(class("abc").render().unwrap(), "[abc]");
        assert_eq!(class("abcd").render().unwrap(), "[a-d]");
        assert_eq!(class("abcdfghi").render().unwrap(), "[a-df-i]");
        assert_eq!(class("0123456789a").render().unwrap(), "[0-9a]");
    }

    #[test]
    fn test_render_shorthands() {
        assert_eq!(WORD.render().unwrap(), "\\w");
        assert_eq!(DIGIT.render().unwrap(), "\\d");
        assert_eq!(SPACE.render().unwrap(), "\\s");
        assert_eq!(NON_WORD.render().unwrap(), "\\W");
        assert_eq!(NON_DIGIT.render().unwrap(), "\\D");
        assert_eq!(NON_SPACE.render().unwrap(), "\\S");
        assert_eq!(DOT.render().unwrap(), ".");
    }

    #[test]
    fn test_render_negated() {
        assert_eq!(class("a").complement().render().unwrap(), "[^a]");
        assert_eq!(class("{").complement().render().unwrap(), "[^{]");
        assert_eq!(class("\t").complement().render().unwrap(), "[^\\t]");
        assert_eq!(class("^").complement().render().unwrap(), "[^\\^]");
    }

    #[test]
    fn test_render_empty_class_fails() {
        assert!(matches!(
            CharClass::empty().render(),
            Err(Error::NotRenderable { .. })
        ));
    }
}
