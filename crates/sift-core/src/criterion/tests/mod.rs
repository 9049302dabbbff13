
use crate::{
    criterion::{Bound, Combinator, Criterion, Range, Reduction},
    error::CriterionError,
    value::{Number, Scalar, Value},
};
use sift_primitives::{ValueKind, ValueKinds};

fn between(from: i32, to: i32) -> Criterion {
    Criterion::between(from, to).unwrap()
}

fn named(fields: Vec<(&str, Criterion)>) -> Criterion {
    Criterion::named(fields).unwrap()
}

fn or(items: Vec<Criterion>) -> Criterion {
    Criterion::or(items).unwrap()
}

fn and(items: Vec<Criterion>) -> Criterion {
    Criterion::and(items).unwrap()
}

fn remainder_text(reduction: &Reduction) -> String {
    reduction
        .remainder()
        .map(ToString::to_string)
        .unwrap_or_else(|| panic!("expected a remainder, got {reduction:?}"))
}

fn number(value: f64) -> Value {
    Value::Number(Number::new(value).unwrap())
}

//
// Construction
//

#[test]
fn empty_composites_are_rejected() {
    assert_eq!(
        Criterion::and(Vec::new()),
        Err(CriterionError::EmptyComposite {
            combinator: Combinator::And
        })
    );
    assert_eq!(
        Criterion::or(Vec::new()),
        Err(CriterionError::EmptyComposite {
            combinator: Combinator::Or
        })
    );
    assert_eq!(
        Criterion::named(Vec::<(String, Criterion)>::new()),
        Err(CriterionError::EmptyNamed)
    );
    assert_eq!(Range::new(None, None), Err(CriterionError::UnboundedRange));
}

#[test]
fn single_item_composites_collapse() {
    assert_eq!(Criterion::and([Criterion::is(1)]), Ok(Criterion::is(1)));
    assert_eq!(Criterion::or([Criterion::even()]), Ok(Criterion::even()));
}

#[test]
fn duplicate_fields_are_rejected() {
    let err = Criterion::named([("a", Criterion::is(1)), ("a", Criterion::is(2))]).unwrap_err();

    assert_eq!(
        err,
        CriterionError::DuplicateField {
            field: "a".to_string()
        }
    );
}

#[test]
fn empty_sets_canonicalize() {
    assert_eq!(Criterion::in_set(Vec::<i32>::new()), Criterion::Never);
    assert_eq!(Criterion::not_in_set(Vec::<i32>::new()), Criterion::Any);
}

#[test]
fn ranges_validate_their_bounds() {
    assert!(matches!(
        Range::between(5, 1),
        Err(CriterionError::EmptyRange { .. })
    ));
    assert!(matches!(
        Range::new(Some(Bound::exclusive(1)), Some(Bound::inclusive(1))),
        Err(CriterionError::EmptyRange { .. })
    ));
    assert_eq!(
        Range::new(Some(Bound::inclusive(1)), Some(Bound::inclusive("a"))),
        Err(CriterionError::MixedBoundKinds {
            from: ValueKind::Number,
            to: ValueKind::Text,
        })
    );
    assert_eq!(
        Range::new(Some(Bound::inclusive(true)), None),
        Err(CriterionError::UnorderedBound {
            kind: ValueKind::Bool
        })
    );
    assert!(Range::between(1, 1).is_ok());
}

#[test]
fn named_bags_ignore_build_order() {
    let forward = named(vec![("a", Criterion::is(1)), ("b", Criterion::is(2))]);
    let backward = named(vec![("b", Criterion::is(2)), ("a", Criterion::is(1))]);

    assert_eq!(forward, backward);
    assert_eq!(forward.to_string(), backward.to_string());

    let other = named(vec![("a", Criterion::in_set([1, 3]))]);
    assert_eq!(forward.reduce(&other), backward.reduce(&other));
    assert_eq!(forward.merge(&other), backward.merge(&other));
}

//
// Evaluation
//

#[test]
fn scalar_leaves_match_by_kind() {
    assert!(Criterion::is(1).matches(&Value::from(1)));
    assert!(!Criterion::is(1).matches(&Value::from("1")));
    assert!(Criterion::not(1).matches(&Value::from("x")));
    assert!(Criterion::not_in_set([1]).matches(&Value::list([1])));
    assert!(!Criterion::in_set([1]).matches(&Value::list([1])));

    assert!(Criterion::even().matches(&Value::from(4)));
    assert!(!Criterion::even().matches(&number(4.5)));
    assert!(!Criterion::even().matches(&Value::from("4")));
    assert!(Criterion::odd().matches(&Value::from(-3)));

    assert!(between(1, 5).matches(&number(2.5)));
    assert!(!between(1, 5).matches(&Value::from("3")));
}

#[test]
fn missing_fields_read_as_null() {
    let empty = Value::record(Vec::<(String, Value)>::new());

    assert!(named(vec![("a", Criterion::is(Scalar::Null))]).matches(&empty));
    assert!(!named(vec![("a", Criterion::not(Scalar::Null))]).matches(&empty));
    assert!(!named(vec![("a", Criterion::Any)]).matches(&Value::from(1)));
}

#[test]
fn some_matches_any_element() {
    let criterion = Criterion::some(between(1, 3));

    assert!(criterion.matches(&Value::list([5, 2])));
    assert!(!criterion.matches(&Value::list([5, 7])));
    assert!(!criterion.matches(&Value::from(2)));
}

#[test]
fn value_kinds_follow_composition() {
    assert_eq!(
        and(vec![between(1, 5), Criterion::is("a")]).value_kinds(),
        ValueKinds::EMPTY
    );
    assert_eq!(
        or(vec![between(1, 5), Criterion::is("a")]).value_kinds(),
        ValueKinds::ORDERED
    );
    assert_eq!(Criterion::not(1).value_kinds(), ValueKinds::ALL);
    assert_eq!(
        Criterion::some(Criterion::Any).value_kinds(),
        ValueKinds::only(ValueKind::List)
    );
}

//
// Reduction
//

#[test]
fn subtracting_a_criterion_from_itself_removes_it() {
    let criterion = named(vec![("a", between(1, 5)), ("b", Criterion::is("x"))]);

    assert_eq!(criterion.subtract_from(&criterion), Reduction::Removed);
}

#[test]
fn covered_range_is_removed() {
    assert_eq!(between(1, 7).subtract_from(&between(0, 8)), Reduction::Removed);
}

#[test]
fn disjoint_sets_are_untouched() {
    assert_eq!(
        Criterion::in_set([1, 2, 3]).subtract_from(&Criterion::in_set([4, 5, 6])),
        Reduction::Untouched
    );
}

#[test]
fn inner_range_splits_outer_range() {
    let reduction = between(1, 7).subtract_from(&between(3, 4));

    assert_eq!(remainder_text(&reduction), "[1, 3) | (4, 7]");
}

#[test]
fn discrete_pairs_follow_set_arithmetic() {
    let cases = [
        (Criterion::is(1), Criterion::in_set([1, 2]), "{2}"),
        (Criterion::in_set([1, 2]), Criterion::not(3), "!{1, 2, 3}"),
        (Criterion::not_in_set([1]), Criterion::in_set([1, 2]), "{1}"),
        (Criterion::not(1), Criterion::not(2), "1"),
    ];

    for (subtrahend, minuend, expected) in cases {
        assert_eq!(
            remainder_text(&subtrahend.reduce(&minuend)),
            expected,
            "{minuend} \\ {subtrahend}"
        );
    }

    assert_eq!(
        remainder_text(&Criterion::in_set([1, 2]).reduce(&Criterion::not(1))),
        "!{1, 2}"
    );
    assert_eq!(
        Criterion::is(1).reduce(&Criterion::not_in_set([1, 2])),
        Reduction::Untouched
    );
    assert_eq!(
        Criterion::not(1).reduce(&Criterion::not(1)),
        Reduction::Removed
    );
}

#[test]
fn points_split_ranges() {
    let reduction = Criterion::in_set([3, 10]).reduce(&between(1, 5));
    assert_eq!(remainder_text(&reduction), "[1, 3) | (3, 5]");

    let reduction = Criterion::not_in_set([3, 10]).reduce(&between(1, 5));
    assert_eq!(remainder_text(&reduction), "{3}");
}

#[test]
fn points_carve_parity() {
    let reduction = Criterion::in_set([2, 3]).reduce(&Criterion::even());

    assert_eq!(remainder_text(&reduction), "even & !{2}");
    assert_eq!(
        Criterion::in_set([3, 5]).reduce(&Criterion::even()),
        Reduction::Untouched
    );
}

#[test]
fn reducing_any_uses_the_complement() {
    assert_eq!(
        Criterion::is(1).reduce(&Criterion::Any),
        Reduction::Remainder(Criterion::not(1))
    );
    assert_eq!(between(1, 2).reduce(&Criterion::Any), Reduction::Untouched);
    assert_eq!(Criterion::Any.reduce(&between(1, 2)), Reduction::Removed);
    assert_eq!(Criterion::Never.reduce(&between(1, 2)), Reduction::Untouched);
}

#[test]
fn disjunctive_minuend_reduces_per_branch() {
    let minuend = or(vec![between(1, 7), Criterion::is("x")]);
    let reduction = between(3, 4).reduce(&minuend);

    assert_eq!(remainder_text(&reduction), r#"[1, 3) | (4, 7] | "x""#);
}

#[test]
fn disjunctive_subtrahend_applies_each_branch() {
    let subtrahend = or(vec![between(1, 3), between(5, 7)]);
    let reduction = subtrahend.reduce(&between(0, 10));

    assert_eq!(remainder_text(&reduction), "[0, 1) | (3, 5) | (7, 10]");
}

#[test]
fn conjunctive_subtrahend_unions_the_pieces() {
    let subtrahend = and(vec![between(0, 5), between(3, 10)]);
    let reduction = subtrahend.reduce(&between(1, 8));

    assert_eq!(remainder_text(&reduction), "(5, 8] | [1, 3)");
}

#[test]
fn conjunctive_minuend_is_removed_by_a_covered_child() {
    let minuend = and(vec![between(2, 3), Criterion::even()]);

    assert_eq!(between(0, 5).reduce(&minuend), Reduction::Removed);
}

#[test]
fn some_reduces_only_when_covered() {
    assert_eq!(
        Criterion::some(between(1, 10)).reduce(&Criterion::some(between(2, 3))),
        Reduction::Removed
    );
    assert_eq!(
        Criterion::some(Criterion::is(1)).reduce(&Criterion::some(Criterion::in_set([1, 2]))),
        Reduction::Untouched
    );
}

#[test]
fn named_end_to_end_subtraction() {
    let served = named(vec![("foo", Criterion::in_set([1, 2, 3]))]);
    let wanted = named(vec![("foo", Criterion::in_set([1, 2, 4]))]);

    assert_eq!(
        served.subtract_from(&wanted),
        Reduction::Remainder(named(vec![("foo", Criterion::in_set([3]))]))
    );
}

#[test]
fn named_reduction_constrains_missing_fields() {
    let reduction = named(vec![("a", Criterion::is(1))]).reduce(&named(vec![("b", Criterion::is(2))]));

    assert_eq!(remainder_text(&reduction), "{a: !1, b: 2}");
}

#[test]
fn named_reduction_emits_disjoint_candidates() {
    let subtrahend = named(vec![("a", between(0, 5)), ("b", between(0, 5))]);
    let minuend = named(vec![("a", between(1, 10)), ("b", between(1, 10))]);

    assert_eq!(
        remainder_text(&subtrahend.reduce(&minuend)),
        "{a: (5, 10], b: [1, 10]} | {a: [1, 5], b: (5, 10]}"
    );
}

#[test]
fn named_reduction_with_a_disjoint_field_is_untouched() {
    let subtrahend = named(vec![("a", Criterion::is(1)), ("b", Criterion::is(2))]);
    let minuend = named(vec![("a", Criterion::in_set([1, 5])), ("b", Criterion::is(3))]);

    assert_eq!(subtrahend.reduce(&minuend), Reduction::Untouched);
}

//
// Merge
//

#[test]
fn overlapping_ranges_merge() {
    assert_eq!(between(1, 7).merge(&between(6, 13)), Some(between(1, 13)));
}

#[test]
fn touching_ranges_merge_only_across_opposite_bounds() {
    let half_open = Criterion::in_range(
        Range::new(Some(Bound::inclusive(1)), Some(Bound::exclusive(5))).unwrap(),
    );
    let closed = between(5, 9);
    assert_eq!(half_open.merge(&closed), Some(between(1, 9)));

    let left: Criterion = "(1, 5)".parse().unwrap();
    let right: Criterion = "(5, 9)".parse().unwrap();
    assert_eq!(left.merge(&right), None);
}

#[test]
fn discrete_merges() {
    assert_eq!(
        Criterion::is(1).merge(&Criterion::is(2)),
        Some(Criterion::in_set([1, 2]))
    );
    assert_eq!(
        Criterion::in_set([1]).merge(&Criterion::not_in_set([1, 2])),
        Some(Criterion::not_in_set([2]))
    );
    assert_eq!(
        Criterion::not(1).merge(&Criterion::is(1)),
        Some(Criterion::Any)
    );
}

#[test]
fn points_on_excluded_bounds_close_them() {
    let half_open = Criterion::in_range(
        Range::new(Some(Bound::inclusive(1)), Some(Bound::exclusive(5))).unwrap(),
    );

    assert_eq!(Criterion::in_set([5]).merge(&half_open), Some(between(1, 5)));
    assert_eq!(Criterion::in_set([7]).merge(&half_open), None);
}

#[test]
fn exclusions_absorb_leaves() {
    assert_eq!(
        Criterion::not_in_set([3, 10]).merge(&between(1, 5)),
        Some(Criterion::not_in_set([10]))
    );
}

#[test]
fn subsumed_side_disappears() {
    assert_eq!(between(1, 10).merge(&Criterion::is(4)), Some(between(1, 10)));
    assert_eq!(Criterion::Never.merge(&Criterion::is(4)), Some(Criterion::is(4)));
}

#[test]
fn disjunction_absorbs_a_mergeable_side() {
    let disjunction = or(vec![between(1, 3), Criterion::is("x")]);

    assert_eq!(
        disjunction.merge(&between(2, 6)),
        Some(or(vec![between(1, 6), Criterion::is("x")]))
    );
    assert_eq!(disjunction.merge(&between(8, 9)), None);
}

#[test]
fn named_bags_merge_one_differing_field() {
    let left = named(vec![("a", Criterion::is(1)), ("b", Criterion::is(2))]);
    let right = named(vec![("a", Criterion::is(1)), ("b", Criterion::is(3))]);

    assert_eq!(
        left.merge(&right).map(|merged| merged.to_string()),
        Some("{a: 1, b: {2, 3}}".to_string())
    );

    let far = named(vec![("a", Criterion::is(4)), ("b", Criterion::is(3))]);
    assert_eq!(left.merge(&far), None);
}

//
// Intersection
//

#[test]
fn range_intersections() {
    assert_eq!(between(1, 7).intersect(&between(5, 10)), Some(between(5, 7)));
    assert_eq!(between(1, 2).intersect(&between(3, 4)), None);
    assert!(between(1, 2).is_disjoint(&between(3, 4)));
    assert!(between(1, 5).is_disjoint(&Criterion::between("a", "z").unwrap()));
}

#[test]
fn discrete_intersections() {
    assert_eq!(
        Criterion::in_set([1, 2, 3]).intersect(&Criterion::not(2)),
        Some(Criterion::in_set([1, 3]))
    );
    assert_eq!(
        Criterion::in_set([1, 2]).intersect(&between(2, 5)),
        Some(Criterion::in_set([2]))
    );
    assert_eq!(
        Criterion::is(2).intersect(&between(2, 5)),
        Some(Criterion::is(2))
    );
}

#[test]
fn parity_intersections() {
    assert_eq!(Criterion::even().intersect(&between(1, 5)), None);
    assert!(!Criterion::even().is_disjoint(&between(1, 5)));
    assert!(Criterion::even().is_disjoint(&Criterion::odd()));
}

#[test]
fn disjunction_distributes_over_intersection() {
    let disjunction = or(vec![between(1, 3), between(5, 7)]);

    assert_eq!(
        disjunction.intersect(&between(2, 6)).map(|both| both.to_string()),
        Some("[2, 3] | [5, 6]".to_string())
    );
}

#[test]
fn disjunction_intersections_ignore_operand_order() {
    let left = or(vec![Criterion::in_set([1, 2]), between(5, 9)]);
    let right = or(vec![between(0, 6), Criterion::in_set([1, 3])]);

    let forward = left.intersect(&right);
    let backward = right.intersect(&left);

    assert_eq!(forward, backward);
    assert_eq!(
        forward.map(|both| both.to_string()),
        Some("{1, 2} | [5, 6]".to_string())
    );
}

#[test]
fn conjunction_intersections_ignore_operand_order() {
    let left = and(vec![Criterion::not(3), between(1, 10)]);
    let right = and(vec![Criterion::even(), between(4, 20)]);

    assert_eq!(left.intersect(&right), right.intersect(&left));
    assert!(left.intersect(&right).is_some());
}

#[test]
fn conjunction_folds_into_the_first_meeting_child() {
    let conjunction = and(vec![Criterion::even(), between(1, 10)]);

    assert_eq!(
        conjunction.intersect(&between(5, 20)).map(|both| both.to_string()),
        Some("even & [5, 10]".to_string())
    );
    assert!(conjunction.is_disjoint(&between(20, 30)));
}

#[test]
fn named_intersection_unions_fields() {
    let left = named(vec![("a", between(1, 5))]);
    let right = named(vec![("a", between(3, 9)), ("b", Criterion::is(1))]);

    assert_eq!(
        left.intersect(&right),
        Some(named(vec![("a", between(3, 5)), ("b", Criterion::is(1))]))
    );
    assert!(left.is_disjoint(&named(vec![("a", between(7, 9))])));
}

//
// Inversion
//

#[test]
fn leaves_invert() {
    assert_eq!(Criterion::Any.invert(), Ok(Criterion::Never));
    assert_eq!(Criterion::is(1).invert(), Ok(Criterion::not(1)));
    assert_eq!(
        Criterion::in_set([1, 2]).invert(),
        Ok(Criterion::not_in_set([1, 2]))
    );
    assert_eq!(Criterion::even().invert(), Ok(Criterion::odd()));
    assert_eq!(
        between(1, 5).invert().map(|inverse| inverse.to_string()),
        Ok("(..., 1) | (5, ...)".to_string())
    );
}

#[test]
fn composites_invert_by_de_morgan() {
    let criterion = and(vec![Criterion::is(1), Criterion::not_in_set([2, 3])]);

    assert_eq!(
        criterion.invert(),
        Ok(or(vec![Criterion::not(1), Criterion::in_set([2, 3])]))
    );
    assert_eq!(
        named(vec![("a", Criterion::is(1)), ("b", Criterion::is(2))])
            .invert()
            .map(|inverse| inverse.to_string()),
        Ok("{a: !1} | {b: !2}".to_string())
    );
}

#[test]
fn some_is_not_invertible() {
    let err = Criterion::some(Criterion::is(1)).invert().unwrap_err();
    assert!(err.is_not_invertible());

    let nested = and(vec![Criterion::is(1), Criterion::some(Criterion::is(2))]);
    assert!(nested.invert().unwrap_err().is_not_invertible());
}

#[test]
fn equivalence_ignores_value_form() {
    assert!(Criterion::is(1).equivalent(&Criterion::in_set([1])));
    assert!(!Criterion::is(1).equivalent(&Criterion::in_set([1, 2])));
}

#[test]
fn reduction_display() {
    assert_eq!(Reduction::Removed.to_string(), "removed");
    assert_eq!(Reduction::Untouched.to_string(), "untouched");
    assert_eq!(Reduction::Remainder(Criterion::is(1)).to_string(), "1");
    assert_eq!(
        Reduction::Removed.into_criterion(&Criterion::is(1)),
        Criterion::Never
    );
}
