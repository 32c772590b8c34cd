//! Boolean conformance checks and their idempotence.

use pretty_assertions::assert_eq;

use keyshape_core::chain::one_of;
use keyshape_core::{Schema, Value};
use keyshape_validator::valid;

fn sex_schema() -> Schema {
    Schema::new().field("sex", one_of(vec!["male".into(), "female".into()]))
}

#[test]
fn returns_true_when_valid() {
    let input = Value::object([("sex", "female")]);
    assert_eq!(valid(&input, &sex_schema()), Ok(true));
}

#[test]
fn returns_false_when_invalid() {
    let input = Value::object([("sex", "malformatted")]);
    assert_eq!(valid(&input, &sex_schema()), Ok(false));
}

#[test]
fn is_idempotent_and_mutates_nothing() {
    let schema = sex_schema();
    let input = Value::object([("sex", "female")]);
    let before = input.clone();

    for _ in 0..3 {
        assert_eq!(valid(&input, &schema), Ok(true));
    }
    assert_eq!(input, before);

    let bad = Value::object([("sex", "other")]);
    for _ in 0..3 {
        assert_eq!(valid(&bad, &schema), Ok(false));
    }
}
