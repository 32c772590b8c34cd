//! Membership checks against a list of allowed values.

use pretty_assertions::assert_eq;

use keyshape_core::chain::one_of;
use keyshape_core::{Descriptor, Error, Schema, Value};
use keyshape_validator::validate;

fn sex_schema() -> Schema {
    Schema::new().field("sex", one_of(vec!["male".into(), "female".into()]))
}

#[test]
fn passes_when_value_is_included() {
    let input = Value::object([("sex", "female")]);
    assert_eq!(validate(&input, &sex_schema()), Ok(()));
}

#[test]
fn fails_naming_every_allowed_value_and_the_offender() {
    let input = Value::object([("sex", "malformatted")]);
    let err = validate(&input, &sex_schema()).unwrap_err();
    assert_eq!(
        err,
        Error::Validation(Descriptor::fields([(
            "sex",
            Descriptor::Message(
                "Value at key path 'sex' should be one of [male,female], but it is 'malformatted'."
                    .into(),
            ),
        )]))
    );
}

#[test]
fn passes_on_absent_values() {
    let input = Value::object(Vec::<(String, Value)>::new());
    assert_eq!(validate(&input, &sex_schema()), Ok(()));
}

#[test]
fn mixed_value_lists_render_like_their_values() {
    let schema = Schema::new().field("pick", one_of(vec![Value::from(1), Value::from("two")]));
    let input = Value::object([("pick", Value::from(3))]);
    let err = validate(&input, &schema).unwrap_err();
    assert_eq!(
        err,
        Error::Validation(Descriptor::fields([(
            "pick",
            Descriptor::Message(
                "Value at key path 'pick' should be one of [1,two], but it is '3'.".into(),
            ),
        )]))
    );
}
