//! Descriptor assembly: failures mirror the input's structure.

use pretty_assertions::assert_eq;

use keyshape_core::chain::{array_of, number, object_of, shape, string};
use keyshape_core::{Descriptor, Schema, Value};
use keyshape_validator::validation;

fn fixture_schema() -> Schema {
    Schema::new()
        .field("arrayOfNumbers", array_of(number()))
        .field(
            "arrayOfShapes",
            array_of(shape(Schema::new().field("a", number()))),
        )
        .field(
            "shape",
            shape(Schema::new().field(
                "nestedShape",
                shape(
                    Schema::new()
                        .field("key1", string())
                        .field("key2", number()),
                ),
            )),
        )
        .field(
            "objectOfShapes",
            object_of(shape(Schema::new().field("a", number()))),
        )
}

fn fixture_input() -> Value {
    Value::object([
        (
            "arrayOfNumbers",
            Value::array([
                Value::from(1),
                Value::from(2),
                Value::from(3),
                Value::from(4),
                Value::from(5),
                Value::from(false),
            ]),
        ),
        (
            "arrayOfShapes",
            Value::array([
                Value::object([("a", Value::from(2))]),
                Value::object([("a", Value::from(false))]),
                Value::object([("a", Value::from("malformatted"))]),
            ]),
        ),
        (
            "shape",
            Value::object([(
                "nestedShape",
                Value::object([
                    ("key1", Value::from("some string")),
                    ("key2", Value::from("number malformatted")),
                ]),
            )]),
        ),
        (
            "objectOfShapes",
            Value::object([
                ("a", Value::object([("a", Value::from(1))])),
                ("b", Value::object([("a", Value::from(2))])),
                ("c", Value::object([("a", Value::from(false))])),
            ]),
        ),
    ])
}

#[test]
fn descriptor_contains_exactly_the_failing_branches() {
    let expected = Descriptor::fields([
        (
            "arrayOfNumbers",
            Descriptor::Items(vec![
                None,
                None,
                None,
                None,
                None,
                Some(Descriptor::Message(
                    "Value at key path 'arrayOfNumbers.5' should be 'number'.".into(),
                )),
            ]),
        ),
        (
            "arrayOfShapes",
            Descriptor::Items(vec![
                None,
                Some(Descriptor::fields([(
                    "a",
                    Descriptor::Message(
                        "Value at key path 'arrayOfShapes.1.a' should be 'number'.".into(),
                    ),
                )])),
                Some(Descriptor::fields([(
                    "a",
                    Descriptor::Message(
                        "Value at key path 'arrayOfShapes.2.a' should be 'number'.".into(),
                    ),
                )])),
            ]),
        ),
        (
            "shape",
            Descriptor::fields([(
                "nestedShape",
                Descriptor::fields([(
                    "key2",
                    Descriptor::Message(
                        "Value at key path 'shape.nestedShape.key2' should be 'number'.".into(),
                    ),
                )]),
            )]),
        ),
        (
            "objectOfShapes",
            Descriptor::fields([(
                "c",
                Descriptor::fields([(
                    "a",
                    Descriptor::Message(
                        "Value at key path 'objectOfShapes.c.a' should be 'number'.".into(),
                    ),
                )]),
            )]),
        ),
    ]);

    let result = validation(&fixture_input(), &fixture_schema()).unwrap();
    assert_eq!(result, Some(expected));
}

#[test]
fn descriptor_serializes_to_json_mirroring_the_input() {
    let descriptor = validation(&fixture_input(), &fixture_schema())
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(
        json["arrayOfNumbers"][5],
        serde_json::json!("Value at key path 'arrayOfNumbers.5' should be 'number'.")
    );
    assert!(json["arrayOfNumbers"][0].is_null());
    assert!(json["shape"]["nestedShape"]["key2"].is_string());
    assert!(json.get("objectOfShapes").is_some());
}

#[test]
fn validation_returns_none_on_success() {
    let schema = Schema::new().field("n", number());
    let input = Value::object([("n", Value::from(1))]);
    assert_eq!(validation(&input, &schema), Ok(None));
}
