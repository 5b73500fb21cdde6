//! Parser behavior
//!
//! Acceptance and rejection corpora, the exact structures built for
//! representative inputs, error offsets, and the parse/render round-trip
//! up to reduction.

use regalg::{
    parse, CharClass, Conc, Error, Mult, Multiplier, Pattern, Reduce, DOT, ONE, PLUS, STAR,
};
use rstest::rstest;

fn class(chars: &str) -> CharClass {
    CharClass::new(chars.chars())
}

fn m(chars: &str, multiplier: Multiplier) -> Mult {
    Mult::new(class(chars), multiplier)
}

// ============================================================================
// Acceptance / rejection corpora
// ============================================================================

#[rstest]
#[case("abcd")]
#[case("a|b|c|d")]
#[case("(ab)|(cd)*")]
#[case("(a|b+c?|d)")]
#[case("(abc)(abc)(abc)|(abc)(abc)")]
#[case("a|b+(c?|d)")]
#[case(r"(\w)")]
#[case(r"\\")]
#[case("[1-9]")]
#[case(r"\d{4}-\d{2}-\d{2}")]
#[case("abcde[^fg]*h{5}[a-z]+")]
// One alternative may be the empty string.
#[case("a|")]
#[case("")]
#[case("()")]
#[case("[]")]
#[case("a{0}")]
fn test_valid_regexes(#[case] input: &str) {
    assert!(parse(input).is_ok(), "{input:?} should parse");
}

#[rstest]
#[case("(abcd")]
#[case(")aaab(")]
#[case("a)")]
#[case("(abcd)(")]
#[case(r"(\a)")]
#[case(r"\")]
#[case(r"\\\")]
#[case("a{5,3}")]
#[case("a{01}")]
#[case("[a-]")]
#[case("[z-a]")]
#[case("a**")]
fn test_invalid_regexes(#[case] input: &str) {
    assert!(parse(input).is_err(), "{input:?} should not parse");
}

#[test]
fn test_error_carries_the_stuck_offset() {
    match parse("abc)def") {
        Err(Error::Parse { offset }) => assert_eq!(u32::from(offset), 3),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

// ============================================================================
// Built structures
// ============================================================================

#[test]
fn test_parse_empty_string_is_the_empty_conc() {
    assert_eq!(parse("").unwrap(), Pattern::new([Conc::empty()]));
}

#[test]
fn test_parse_trailing_pipe_keeps_the_empty_alternative() {
    assert_eq!(
        parse("a|").unwrap(),
        Pattern::new([Conc::new(vec![m("a", ONE)]), Conc::empty()])
    );
}

#[test]
fn test_parse_conc_structure() {
    assert_eq!(
        parse("abcde[^fg]*h{5}[a-z]+").unwrap(),
        Pattern::new([Conc::new(vec![
            m("a", ONE),
            m("b", ONE),
            m("c", ONE),
            m("d", ONE),
            m("e", ONE),
            Mult::new(CharClass::negated("fg".chars()), STAR),
            m("h", Multiplier::finite(5, 5)),
            m("abcdefghijklmnopqrstuvwxyz", PLUS),
        ])])
    );
}

#[test]
fn test_parse_dots_are_the_dot_class() {
    assert_eq!(
        parse("abc...").unwrap(),
        Pattern::new([Conc::new(vec![
            m("a", ONE),
            m("b", ONE),
            m("c", ONE),
            Mult::new(DOT.clone(), ONE),
            Mult::new(DOT.clone(), ONE),
            Mult::new(DOT.clone(), ONE),
        ])])
    );
}

#[test]
fn test_parse_date_shape() {
    assert_eq!(
        parse(r"\d{4}-\d{2}-\d{2}").unwrap(),
        Pattern::new([Conc::new(vec![
            m("0123456789", Multiplier::finite(4, 4)),
            m("-", ONE),
            m("0123456789", Multiplier::finite(2, 2)),
            m("-", ONE),
            m("0123456789", Multiplier::finite(2, 2)),
        ])])
    );
}

#[test]
fn test_parse_nested_alternation() {
    let inner = Pattern::new([
        Conc::new(vec![m("g", ONE), m("h", ONE), m("i", ONE)]),
        Conc::new(vec![m("j", ONE), m("k", ONE), m("l", ONE)]),
    ]);
    assert_eq!(
        parse("abc|def(ghi|jkl)").unwrap(),
        Pattern::new([
            Conc::new(vec![m("a", ONE), m("b", ONE), m("c", ONE)]),
            Conc::new(vec![
                m("d", ONE),
                m("e", ONE),
                m("f", ONE),
                Mult::new(inner, ONE),
            ]),
        ])
    );
}

#[test]
fn test_parse_bracket_expansion() {
    assert_eq!(
        parse("[a-g0-8$%]+").unwrap(),
        Pattern::new([Conc::new(vec![m("abcdefg012345678$%", PLUS)])])
    );
}

// ============================================================================
// Round-trip: render(P) parses back to the same reduced term
// ============================================================================

#[rstest]
#[case("abc|def(ghi|jkl)")]
#[case("a{2}b|a+c")]
#[case("0|[1-9]")]
#[case("([ab])*")]
#[case(r"\d{4}-\d{2}-\d{2}")]
#[case("abcde[^fg]*h{5}[a-z]+")]
#[case(r"\w*\s\W?")]
#[case("(aa|bb)+c{2,}")]
#[case("x(y|z){3,7}x?")]
fn test_parse_render_round_trip(#[case] input: &str) {
    let reduced = parse(input).unwrap().reduce();
    let rendered = reduced.render().unwrap();
    assert_eq!(
        parse(&rendered).unwrap().reduce(),
        reduced,
        "{input:?} rendered as {rendered:?} which no longer reduces to the same term"
    );
}
