//! Multiplier arithmetic
//!
//! The full 36-case intersection table over the named multipliers, plus
//! the addition/subtraction inverse law and the multiplication used by
//! nested repetition.

use regalg::{Bound, Multiplier, INF, ONE, PLUS, QM, STAR, ZERO};
use rstest::rstest;

fn from(min: usize) -> Multiplier {
    Multiplier::new(Bound::Finite(min), Bound::Inf)
}

// ============================================================================
// Intersection ("common multiplicity") truth table
// ============================================================================

#[rstest]
#[case(ZERO, ZERO, ZERO)]
#[case(ZERO, QM, ZERO)]
#[case(ZERO, ONE, ZERO)]
#[case(ZERO, STAR, ZERO)]
#[case(ZERO, PLUS, ZERO)]
#[case(ZERO, INF, ZERO)]
#[case(QM, QM, QM)]
#[case(QM, ONE, ZERO)]
#[case(QM, STAR, QM)]
#[case(QM, PLUS, QM)]
#[case(QM, INF, QM)]
#[case(ONE, ONE, ONE)]
#[case(ONE, STAR, ZERO)]
#[case(ONE, PLUS, ONE)]
#[case(ONE, INF, ONE)]
#[case(STAR, STAR, STAR)]
#[case(STAR, PLUS, STAR)]
#[case(STAR, INF, STAR)]
#[case(PLUS, PLUS, PLUS)]
#[case(PLUS, INF, PLUS)]
#[case(INF, INF, INF)]
fn test_common_table(#[case] a: Multiplier, #[case] b: Multiplier, #[case] expected: Multiplier) {
    assert_eq!(a.common(&b), expected);
    // The table is symmetric; checking both orders covers all 36 cells.
    assert_eq!(b.common(&a), expected);
}

#[rstest]
// a{3,4} ⊓ a{2,5} leaves a{2,3} in common
#[case(Multiplier::finite(3, 4), Multiplier::finite(2, 5), Multiplier::finite(2, 3))]
// a{2,} ⊓ a{1,5} leaves a{1,5}
#[case(from(2), Multiplier::finite(1, 5), Multiplier::finite(1, 5))]
// a{3,} ⊓ a{2,} leaves a{2,}
#[case(from(3), from(2), from(2))]
#[case(from(3), from(3), from(3))]
fn test_common_mixed_bounds(
    #[case] a: Multiplier,
    #[case] b: Multiplier,
    #[case] expected: Multiplier,
) {
    assert_eq!(a.common(&b), expected);
    assert_eq!(b.common(&a), expected);
}

// ============================================================================
// Addition, subtraction, multiplication
// ============================================================================

#[test]
fn test_subtraction_inverts_addition() {
    // The inverse law needs a finite subtrahend on the optional side;
    // removing an unbounded amount collapses it to zero instead.
    let cases = [
        (Multiplier::finite(2, 3), Multiplier::finite(1, 1)),
        (Multiplier::finite(0, 4), Multiplier::finite(2, 2)),
        (STAR, ONE),
        (PLUS, Multiplier::finite(1, 2)),
        (from(3), Multiplier::finite(1, 1)),
    ];
    for (a, b) in cases {
        assert_eq!((a + b).subtract(&b).unwrap(), a);
    }
}

#[test]
fn test_subtraction_domain_errors() {
    // A bounded multiplier cannot lose an unbounded amount.
    assert!(ONE.subtract(&STAR).is_err());
    assert!(Multiplier::finite(2, 3).subtract(&from(1)).is_err());
    // Nor can it go negative.
    assert!(ONE.subtract(&Multiplier::finite(2, 2)).is_err());
}

#[test]
fn test_subtracting_all_of_an_unbounded_multiplier() {
    // Both components infinite minus infinite collapse to zero.
    assert_eq!(INF.subtract(&INF).unwrap(), ZERO);
    assert_eq!(STAR.subtract(&STAR).unwrap(), ZERO);
    // The mandatory part stays infinite when only finitely much is removed.
    assert_eq!(INF.subtract(&ONE).unwrap(), INF);
}

#[rstest]
#[case(Multiplier::finite(2, 3), Multiplier::finite(4, 5), Multiplier::finite(8, 15))]
#[case(from(2), from(2), from(4))]
#[case(ONE, STAR, STAR)]
#[case(QM, QM, QM)]
fn test_multiplication(
    #[case] a: Multiplier,
    #[case] b: Multiplier,
    #[case] expected: Multiplier,
) {
    assert_eq!(a * b, expected);
}

#[test]
fn test_zero_times_unbounded_is_unbounded() {
    assert_eq!(ZERO * INF, INF);
    assert_eq!(INF * ZERO, INF);
}
