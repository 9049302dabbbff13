use crate::{
    config::ReshapeLimits,
    criterion::Criterion,
    shape::{NamedShape, Reshaped, Shape},
    value::Scalar,
};
use sift_primitives::{ValueKind, ValueKinds};

fn between(from: i32, to: i32) -> Criterion {
    Criterion::between(from, to).unwrap()
}

fn named(fields: Vec<(&str, Criterion)>) -> Criterion {
    Criterion::named(fields).unwrap()
}

fn texts(criteria: &[Criterion]) -> Vec<String> {
    criteria.iter().map(ToString::to_string).collect()
}

fn reshaped(shape: &Shape, criterion: &Criterion) -> Reshaped {
    shape
        .reshape(criterion)
        .unwrap_or_else(|| panic!("{criterion} should reshape"))
}

#[test]
fn any_shape_takes_everything() {
    let criterion = Criterion::or([between(1, 5), Criterion::is("x")]).unwrap();
    let result = reshaped(&Shape::Any, &criterion);

    assert_eq!(result.matched(), [criterion]);
    assert!(result.is_complete());
}

#[test]
fn never_matches_nothing() {
    assert_eq!(Shape::Any.reshape(&Criterion::Never), None);
}

#[test]
fn value_shape_splits_sets_into_equalities() {
    let shape = Shape::value(ValueKind::Number);
    let result = reshaped(&shape, &Criterion::in_set([1, 2]));

    assert_eq!(result.matched(), [Criterion::is(1), Criterion::is(2)]);
    assert!(result.is_complete());
}

#[test]
fn value_shape_leaves_other_kinds_open() {
    let shape = Shape::value(ValueKind::Number);
    let criterion = Criterion::in_set([Scalar::from(1), Scalar::from("a")]);
    let result = reshaped(&shape, &criterion);

    assert_eq!(result.matched(), [Criterion::is(1)]);
    assert_eq!(result.open(), [Criterion::in_set(["a"])]);
    assert_eq!(shape.reshape(&Criterion::is("a")), None);
}

#[test]
fn set_shape_keeps_membership() {
    let shape = Shape::set(ValueKind::Number);

    assert_eq!(
        reshaped(&shape, &Criterion::is(1)).matched(),
        [Criterion::in_set([1])]
    );
    assert_eq!(shape.reshape(&between(1, 5)), None);
}

#[test]
fn range_shape_checks_the_bound_kind() {
    let numbers = Shape::range(ValueKind::Number);
    let text = Shape::range(ValueKind::Text);

    assert!(reshaped(&numbers, &between(1, 5)).is_complete());
    assert_eq!(text.reshape(&between(1, 5)), None);
    assert_eq!(numbers.reshape(&Criterion::is(3)), None);
}

#[test]
fn disjunctive_criteria_split_per_branch() {
    let shape = Shape::range(ValueKinds::ORDERED);
    let criterion = Criterion::or([between(1, 5), Criterion::even()]).unwrap();
    let result = reshaped(&shape, &criterion);

    assert_eq!(result.matched(), [between(1, 5)]);
    assert_eq!(result.open(), [Criterion::even()]);
}

#[test]
fn shape_alternatives_take_turns() {
    let shape = Shape::or(vec![
        Shape::value(ValueKind::Text),
        Shape::range(ValueKind::Number),
    ]);
    let criterion = Criterion::or([Criterion::is("a"), between(1, 5), Criterion::even()]).unwrap();
    let result = reshaped(&shape, &criterion);

    assert_eq!(result.matched(), [Criterion::is("a"), between(1, 5)]);
    assert_eq!(result.open(), [Criterion::even()]);
}

#[test]
fn some_shape_wraps_both_sides() {
    let shape = Shape::some(Shape::range(ValueKind::Number));
    let criterion = Criterion::some(Criterion::or([between(1, 5), Criterion::even()]).unwrap());
    let result = reshaped(&shape, &criterion);

    assert_eq!(result.matched(), [Criterion::some(between(1, 5))]);
    assert_eq!(result.open(), [Criterion::some(Criterion::even())]);
    assert_eq!(shape.reshape(&between(1, 5)), None);
}

fn bag_shape() -> Shape {
    NamedShape::new()
        .required("a", Shape::value(ValueKind::Number))
        .optional("b", Shape::range(ValueKind::Number))
        .into()
}

#[test]
fn bags_expand_into_the_cartesian_product() {
    let criterion = named(vec![
        ("a", Criterion::in_set([1, 2])),
        ("b", between(1, 5)),
    ]);
    let result = reshaped(&bag_shape(), &criterion);

    assert_eq!(
        texts(result.matched()),
        ["{a: 1, b: [1, 5]}", "{a: 2, b: [1, 5]}"]
    );
    assert!(result.is_complete());
}

#[test]
fn optional_fields_may_be_absent() {
    let result = reshaped(&bag_shape(), &named(vec![("a", Criterion::is(1))]));

    assert_eq!(texts(result.matched()), ["{a: 1}"]);
}

#[test]
fn bag_leftovers_do_not_overlap() {
    let criterion = named(vec![
        (
            "a",
            Criterion::in_set([Scalar::from(1), Scalar::from("x")]),
        ),
        ("b", Criterion::or([between(1, 5), Criterion::even()]).unwrap()),
    ]);
    let result = reshaped(&bag_shape(), &criterion);

    assert_eq!(texts(result.matched()), ["{a: 1, b: [1, 5]}"]);
    assert_eq!(
        texts(result.open()),
        [r#"{a: {"x"}, b: [1, 5] | even}"#, "{a: 1, b: even}"]
    );
}

#[test]
fn unusable_bags_stay_whole() {
    let shape = bag_shape();

    // required field missing
    assert_eq!(shape.reshape(&named(vec![("b", between(1, 5))])), None);
    // undeclared field
    assert_eq!(
        shape.reshape(&named(vec![("a", Criterion::is(1)), ("c", Criterion::is(1))])),
        None
    );
    // field the shape cannot serve at all
    assert_eq!(shape.reshape(&named(vec![("a", Criterion::even())])), None);
    // optional fields are no exception
    assert_eq!(
        shape.reshape(&named(vec![("a", Criterion::is(1)), ("b", Criterion::is("x"))])),
        None
    );
}

#[test]
fn bags_above_the_permutation_cap_stay_open() {
    let shape = bag_shape();
    let criterion = named(vec![("a", Criterion::in_set([1, 2, 3]))]);

    assert_eq!(shape.reshape_with(&criterion, &ReshapeLimits::new(2)), None);

    let result = shape
        .reshape_with(&criterion, &ReshapeLimits::new(3))
        .unwrap();
    assert_eq!(result.matched().len(), 3);
}

#[test]
fn bag_shape_mixed_with_disjunction() {
    let criterion = Criterion::or([
        named(vec![("a", Criterion::is(1))]),
        named(vec![("z", Criterion::is(1))]),
    ])
    .unwrap();
    let result = reshaped(&bag_shape(), &criterion);

    assert_eq!(texts(result.matched()), ["{a: 1}"]);
    assert_eq!(texts(result.open()), ["{z: 1}"]);
}

#[test]
#[should_panic(expected = "at least one matched criterion")]
fn reshaped_requires_a_match() {
    let _ = Reshaped::new(Vec::new(), vec![Criterion::Any]);
}

#[test]
fn shapes_deserialize_from_json() {
    let json = r#"{
        "shape": "named",
        "fields": {
            "a": { "shape": { "shape": "value", "kinds": ["number"] }, "required": true },
            "b": { "shape": { "shape": "range", "kinds": ["number"] } }
        }
    }"#;

    let shape: Shape = serde_json::from_str(json).unwrap();
    assert_eq!(shape, bag_shape());

    let back: Shape = serde_json::from_str(&serde_json::to_string(&shape).unwrap()).unwrap();
    assert_eq!(back, shape);
}

#[test]
fn unknown_shape_fields_are_rejected() {
    let json = r#"{ "shape": "named", "fields": {}, "extra": 1 }"#;

    assert!(serde_json::from_str::<Shape>(json).is_err());
}
