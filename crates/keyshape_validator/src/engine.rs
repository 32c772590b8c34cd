//! Recursive chain execution and the public validate/valid/validation API.
//!
//! The engine runs one chain against one value. Recursion into nested
//! shapes and collections is driven entirely by the container validators
//! calling back into [`run_chain`] with an extended key path; there is no
//! separate traversal mechanism.

use tracing::trace;

use keyshape_core::chain;
use keyshape_core::{Chain, Descriptor, Error, KeyPath, Result, Schema, Value};

use crate::environment::{with_default_env, Ctx, Environment};

/// Executes every step of a chain against a value.
///
/// Only validation failures are aggregated: each failing step contributes
/// its descriptor, and any other error aborts the whole call immediately.
/// Zero failures pass; a single failure is rethrown unchanged; several
/// failures are carried as an ordered list.
pub fn run_chain(
    env: &Environment,
    value: Option<&Value>,
    chain: &Chain,
    path: &KeyPath,
    root: &Value,
) -> Result<()> {
    if chain.is_empty() {
        return Err(Error::config("Cannot validate with an empty chain."));
    }
    let mut failures: Vec<Descriptor> = Vec::new();
    for step in chain.steps() {
        let def = env
            .validator(step.name())
            .ok_or_else(|| Error::config(format!("Unknown validator '{}'.", step.name())))?;
        trace!(validator = step.name(), path = %path, "running chain step");
        let ctx = Ctx {
            value,
            path,
            root,
            params: step.params(),
            env,
        };
        match (def.run())(ctx) {
            Ok(()) => {}
            Err(Error::Validation(descriptor)) => failures.push(descriptor),
            Err(other) => return Err(other),
        }
    }
    match failures.len() {
        0 => Ok(()),
        1 => Err(Error::Validation(failures.remove(0))),
        _ => Err(Error::Validation(Descriptor::List(failures))),
    }
}

impl Environment {
    /// Validates a value against a field schema.
    ///
    /// The schema is wrapped by the `shape` validator and run at the root
    /// key path. Returns `Ok` on success; `Error::Validation` carries the
    /// structured descriptor on violation; configuration errors propagate.
    pub fn validate(&self, value: &Value, schema: &Schema) -> Result<()> {
        let wrapped = chain::shape(schema.clone());
        run_chain(self, Some(value), &wrapped, &KeyPath::root(), value)
    }

    /// Validates a standalone value against a chain. The value itself acts
    /// as the root for key-path reporting.
    pub fn validate_chain(&self, value: Option<&Value>, chain: &Chain) -> Result<()> {
        let null = Value::Null;
        let root = value.unwrap_or(&null);
        run_chain(self, value, chain, &KeyPath::root(), root)
    }

    /// Returns `Ok(true)` if the value conforms to the schema, `Ok(false)`
    /// on a validation failure; any other error is passed through.
    pub fn valid(&self, value: &Value, schema: &Schema) -> Result<bool> {
        match self.validate(value, schema) {
            Ok(()) => Ok(true),
            Err(Error::Validation(_)) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// Returns the failure descriptor for a value, or `None` if it
    /// conforms; any non-validation error is passed through.
    pub fn validation(&self, value: &Value, schema: &Schema) -> Result<Option<Descriptor>> {
        match self.validate(value, schema) {
            Ok(()) => Ok(None),
            Err(Error::Validation(descriptor)) => Ok(Some(descriptor)),
            Err(other) => Err(other),
        }
    }
}

/// Validates a value against a schema in the default environment.
pub fn validate(value: &Value, schema: &Schema) -> Result<()> {
    with_default_env(|env| env.validate(value, schema))
}

/// Validates a standalone value against a chain in the default environment.
pub fn validate_chain(value: Option<&Value>, chain: &Chain) -> Result<()> {
    with_default_env(|env| env.validate_chain(value, chain))
}

/// Returns whether a value conforms to a schema, using the default
/// environment.
pub fn valid(value: &Value, schema: &Schema) -> Result<bool> {
    with_default_env(|env| env.valid(value, schema))
}

/// Returns the failure descriptor for a value against a schema, using the
/// default environment.
pub fn validation(value: &Value, schema: &Schema) -> Result<Option<Descriptor>> {
    with_default_env(|env| env.validation(value, schema))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::validator_fn;
    use keyshape_core::chain::{number, string, Chain};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_chain_is_a_configuration_error() {
        let env = Environment::new();
        let err = env
            .validate_chain(Some(&Value::from(1)), &Chain::new())
            .unwrap_err();
        assert_eq!(err, Error::config("Cannot validate with an empty chain."));
    }

    #[test]
    fn single_failure_is_rethrown_unchanged() {
        let env = Environment::new();
        let err = env
            .validate_chain(Some(&Value::from(1)), &string())
            .unwrap_err();
        assert_eq!(
            err,
            Error::failure("Value at key path '' should be 'string'.")
        );
    }

    #[test]
    fn several_failures_collect_in_order() {
        let mut env = Environment::new();
        env.add_validator(
            "alwaysA",
            validator_fn(|ctx| Err(Error::failure(format!("A at '{}'.", ctx.path)))),
            false,
            Vec::new(),
        )
        .unwrap();
        env.add_validator(
            "alwaysB",
            validator_fn(|ctx| Err(Error::failure(format!("B at '{}'.", ctx.path)))),
            false,
            Vec::new(),
        )
        .unwrap();
        let chain = env
            .append(&env.append(&Chain::new(), "alwaysA", None).unwrap(), "alwaysB", None)
            .unwrap();
        let err = env.validate_chain(Some(&Value::Null), &chain).unwrap_err();
        assert_eq!(
            err,
            Error::Validation(Descriptor::List(vec![
                Descriptor::Message("A at ''.".into()),
                Descriptor::Message("B at ''.".into()),
            ]))
        );
    }

    #[test]
    fn configuration_errors_abort_immediately() {
        let mut env = Environment::new();
        env.add_validator(
            "explodes",
            validator_fn(|_ctx| Err(Error::config("broken validator"))),
            false,
            Vec::new(),
        )
        .unwrap();
        let chain = env.append(&Chain::new(), "explodes", None).unwrap();
        let err = env.validate_chain(Some(&Value::Null), &chain).unwrap_err();
        assert_eq!(err, Error::config("broken validator"));
    }

    #[test]
    fn all_steps_run_even_after_a_failure() {
        let env = Environment::new();
        // number fails, required passes on a present value; the single
        // collected failure surfaces as a leaf.
        let err = env
            .validate_chain(Some(&Value::from("text")), &number().required())
            .unwrap_err();
        assert_eq!(
            err,
            Error::failure("Value at key path '' should be 'number'.")
        );
    }
}
