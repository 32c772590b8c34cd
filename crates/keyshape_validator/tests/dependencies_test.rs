//! Construction-time dependency checking for registered validators.

use pretty_assertions::assert_eq;

use regex::Regex;

use keyshape_core::chain::{number, string};
use keyshape_core::{Error, Params, Schema, Value};
use keyshape_validator::{validator_fn, ChainExt, Environment};

/// Registers a `match` validator that requires a preceding `string` step
/// and checks the value against a regular expression parameter.
fn register_match(env: &mut Environment) {
    env.add_validator(
        "match",
        validator_fn(|ctx| {
            let Some(value) = ctx.value else { return Ok(()) };
            let Some(Params::Value(Value::Regexp(re))) = ctx.params else {
                return Err(Error::config("match expects a regular expression."));
            };
            match value {
                Value::String(s) if re.is_match(s) => Ok(()),
                Value::String(s) => Err(Error::failure(format!(
                    "String value at key path '{}' does not match /{}/, it is '{}'.",
                    ctx.path,
                    re.as_str(),
                    s
                ))),
                // Kind mismatch is the preceding string step's report.
                _ => Ok(()),
            }
        }),
        true,
        vec!["string".to_string()],
    )
    .unwrap();
}

fn pattern(source: &str) -> Params {
    Params::Value(Value::Regexp(Regex::new(source).unwrap()))
}

#[test]
fn unfulfilled_dependency_fails_at_chain_construction() {
    let mut env = Environment::new();
    register_match(&mut env);

    let err = env.append(&number(), "match", Some(pattern("a"))).unwrap_err();
    assert_eq!(
        err,
        Error::config("Unfulfilled validator dependencies string for validator match.")
    );
}

#[test]
fn fulfilled_dependency_builds_and_validates() {
    let mut env = Environment::new();
    register_match(&mut env);

    let chain = env.append(&string(), "match", Some(pattern("^a+$"))).unwrap();
    let schema = Schema::new().field("a", chain);

    let ok = Value::object([("a", "aaa")]);
    assert_eq!(env.validate(&ok, &schema), Ok(()));

    let bad = Value::object([("a", "bbb")]);
    let err = env.validate(&bad, &schema).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(
        err.to_string(),
        r#"{"a":"String value at key path 'a' does not match /^a+$/, it is 'bbb'."}"#
    );
}

#[test]
fn registrations_in_one_environment_do_not_leak_into_another() {
    let mut env = Environment::new();
    register_match(&mut env);
    assert!(env.has_validator("match"));

    let isolated = Environment::new();
    assert!(!isolated.has_validator("match"));
    let err = isolated.append(&string(), "match", Some(pattern("a"))).unwrap_err();
    assert_eq!(err, Error::config("Unknown validator 'match'."));
}

#[test]
fn fluent_step_uses_the_default_environment() {
    // Registered in the process-wide default environment; the name is
    // unique to this test to avoid clashing with parallel tests.
    keyshape_validator::add_validator(
        "gteDefault",
        validator_fn(|ctx| {
            let Some(value) = ctx.value else { return Ok(()) };
            let Some(Params::Value(Value::Number(min))) = ctx.params else {
                return Err(Error::config("gteDefault expects a number."));
            };
            match value.as_number() {
                Some(n) if n >= *min => Ok(()),
                Some(n) => Err(Error::failure(format!(
                    "Value ({n}) at key path '{}' should be greater or equal {min}.",
                    ctx.path
                ))),
                None => Ok(()),
            }
        }),
        true,
        vec!["number".to_string()],
    )
    .unwrap();
    assert!(keyshape_validator::has_validator("gteDefault"));

    // Wrong predecessor fails at construction time.
    let err = string()
        .step("gteDefault", Some(Params::Value(Value::from(100))))
        .unwrap_err();
    assert_eq!(
        err,
        Error::config("Unfulfilled validator dependencies number for validator gteDefault.")
    );

    // The right predecessor builds and validates.
    let chain = number()
        .step("gteDefault", Some(Params::Value(Value::from(100))))
        .unwrap();
    let schema = Schema::new().field("a", chain);
    assert_eq!(
        keyshape_validator::validate(&Value::object([("a", Value::from(200))]), &schema),
        Ok(())
    );
}
