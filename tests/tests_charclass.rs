//! Character class algebra
//!
//! Truth tables for union, intersection, difference and subset over every
//! polarity combination, the algebraic laws connecting them, and the
//! rendering table for shorthands, escapes and ranges.

use regalg::{CharClass, Term, DIGIT, DOT, NON_DIGIT, NON_SPACE, NON_WORD, SPACE, WORD};
use rstest::rstest;

fn pos(chars: &str) -> CharClass {
    CharClass::new(chars.chars())
}

fn neg(chars: &str) -> CharClass {
    CharClass::negated(chars.chars())
}

// ============================================================================
// Truth tables (all four polarity combinations)
// ============================================================================

#[rstest]
// [ab] ∪ [bc] = [abc]
#[case(pos("ab"), pos("bc"), pos("abc"))]
// [ab] ∪ [^bc] = [^c]
#[case(pos("ab"), neg("bc"), neg("c"))]
// [^ab] ∪ [bc] = [^a]
#[case(neg("ab"), pos("bc"), neg("a"))]
// [^ab] ∪ [^bc] = [^b]
#[case(neg("ab"), neg("bc"), neg("b"))]
fn test_union(#[case] a: CharClass, #[case] b: CharClass, #[case] expected: CharClass) {
    assert_eq!(a.union(&b), expected);
    // Union is commutative in every polarity combination.
    assert_eq!(b.union(&a), expected);
}

#[rstest]
// [ab] ∩ [bc] = [b]
#[case(pos("ab"), pos("bc"), pos("b"))]
// [ab] ∩ [^bc] = [a]
#[case(pos("ab"), neg("bc"), pos("a"))]
// [^ab] ∩ [bc] = [c]
#[case(neg("ab"), pos("bc"), pos("c"))]
// [^ab] ∩ [^bc] = [^abc]
#[case(neg("ab"), neg("bc"), neg("abc"))]
fn test_intersection(#[case] a: CharClass, #[case] b: CharClass, #[case] expected: CharClass) {
    assert_eq!(a.intersection(&b), expected);
    assert_eq!(b.intersection(&a), expected);
}

#[rstest]
// [ab] ∖ [bc] = [a]
#[case(pos("ab"), pos("bc"), pos("a"))]
// [ab] ∖ [^bc] = [b]
#[case(pos("ab"), neg("bc"), pos("b"))]
// [^ab] ∖ [bc] = [^abc]
#[case(neg("ab"), pos("bc"), neg("abc"))]
// [^ab] ∖ [^bc] = [c]
#[case(neg("ab"), neg("bc"), pos("c"))]
fn test_difference(#[case] a: CharClass, #[case] b: CharClass, #[case] expected: CharClass) {
    assert_eq!(a.difference(&b), expected);
}

#[rstest]
#[case(pos("a"), pos("ab"), true)]
#[case(pos("c"), neg("ab"), true)]
#[case(neg("c"), pos("ab"), false)]
#[case(neg("ab"), neg("a"), true)]
#[case(pos("ab"), pos("a"), false)]
#[case(pos("a"), neg("ab"), false)]
fn test_issubset(#[case] a: CharClass, #[case] b: CharClass, #[case] expected: bool) {
    assert_eq!(a.issubset(&b), expected);
}

// ============================================================================
// Algebraic laws
// ============================================================================

fn operand_pairs() -> Vec<(CharClass, CharClass)> {
    let classes = [pos(""), pos("a"), pos("ab"), pos("bc"), neg(""), neg("a"), neg("bc")];
    let mut pairs = Vec::new();
    for a in &classes {
        for b in &classes {
            pairs.push((a.clone(), b.clone()));
        }
    }
    pairs
}

#[test]
fn test_double_complement_is_identity() {
    for (a, _) in operand_pairs() {
        assert_eq!(a.complement().complement(), a);
    }
}

#[test]
fn test_de_morgan() {
    for (a, b) in operand_pairs() {
        assert_eq!(
            a.union(&b).complement(),
            a.complement().intersection(&b.complement())
        );
        assert_eq!(
            a.intersection(&b).complement(),
            a.complement().union(&b.complement())
        );
    }
}

#[test]
fn test_difference_is_intersection_with_complement() {
    for (a, b) in operand_pairs() {
        assert_eq!(a.difference(&b), a.intersection(&b.complement()));
    }
}

#[test]
fn test_associativity() {
    let classes = [pos("ab"), neg("bc"), pos("cd")];
    let [a, b, c] = &classes;
    assert_eq!(a.union(b).union(c), a.union(&b.union(c)));
    assert_eq!(
        a.intersection(b).intersection(c),
        a.intersection(&b.intersection(c))
    );
}

// ============================================================================
// Operator forms
// ============================================================================

#[test]
fn test_class_operators_stay_class_level() {
    assert_eq!(pos("ab") | pos("bc"), Term::Class(pos("abc")));
    assert_eq!(neg("ab") | pos("bc"), Term::Class(neg("a")));
    assert_eq!(pos("ab") & pos("bc"), Term::Class(pos("b")));
    assert_eq!(pos("ab") - pos("bc"), pos("a"));
    assert_eq!(neg("ab") - neg("bc"), pos("c"));
}

// ============================================================================
// Rendering
// ============================================================================

#[rstest]
#[case(pos("a"), "a")]
#[case(pos("{"), "\\{")]
#[case(pos("\t"), "\\t")]
#[case(pos("ab"), "[ab]")]
#[case(pos("a{"), "[a{]")]
#[case(pos("a\t"), "[\\ta]")]
#[case(pos("a-"), "[\\-a]")]
#[case(pos("a["), "[\\[a]")]
#[case(pos("a]"), "[\\]a]")]
#[case(pos("abc"), "[abc]")]
#[case(pos("abcd"), "[a-d]")]
#[case(pos("abcdfghi"), "[a-df-i]")]
#[case(pos("^"), "^")]
#[case(pos("a^"), "[\\^a]")]
#[case(pos("0123456789a"), "[0-9a]")]
// Runs shorter than four never collapse, even several in a row.
#[case(pos("\t\n\u{B}\u{C}\r A"), "[\\t\\n\\v\\f\\r A]")]
#[case(
    pos("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz|"),
    "[0-9A-Z_a-z|]"
)]
#[case(neg(""), ".")]
#[case(neg("a"), "[^a]")]
#[case(neg("\t"), "[^\\t]")]
fn test_render(#[case] class: CharClass, #[case] expected: &str) {
    assert_eq!(class.render().unwrap(), expected);
}

#[test]
fn test_render_shorthand_classes() {
    assert_eq!(
        CharClass::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz".chars())
            .render()
            .unwrap(),
        "\\w"
    );
    assert_eq!(WORD.render().unwrap(), "\\w");
    assert_eq!(DIGIT.render().unwrap(), "\\d");
    assert_eq!(SPACE.render().unwrap(), "\\s");
    assert_eq!(NON_WORD.render().unwrap(), "\\W");
    assert_eq!(NON_DIGIT.render().unwrap(), "\\D");
    assert_eq!(NON_SPACE.render().unwrap(), "\\S");
    assert_eq!(DOT.render().unwrap(), ".");
}

#[test]
fn test_render_empty_class_has_no_form() {
    assert!(CharClass::empty().render().is_err());
}
