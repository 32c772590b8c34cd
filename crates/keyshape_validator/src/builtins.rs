//! The built-in validator set.
//!
//! These definitions fix the engine's contract: kind checks, presence,
//! exact-keyed shapes, homogeneous collections, membership and alternative
//! checks, custom predicates and message-overriding rules. Every validator
//! except `required` passes silently on an absent value; `required` is the
//! single place where absence itself is the failure.

use std::collections::BTreeMap;

use keyshape_core::{Descriptor, Error, Kind, Params, Result, Value};

use crate::engine::run_chain;
use crate::environment::{validator_fn, Ctx, Environment};

const KINDS: &[Kind] = &[
    Kind::String,
    Kind::Number,
    Kind::Boolean,
    Kind::Array,
    Kind::Object,
    Kind::Function,
    Kind::Symbol,
    Kind::Date,
    Kind::Regexp,
    Kind::Null,
];

fn kind_failure(ctx: &Ctx<'_>, kind: Kind) -> Error {
    Error::failure(format!(
        "Value at key path '{}' should be '{}'.",
        ctx.path, kind
    ))
}

pub(crate) fn register(env: &mut Environment) {
    for &kind in KINDS {
        env.define(
            kind.name(),
            validator_fn(move |ctx| {
                let Some(value) = ctx.value else { return Ok(()) };
                if value.kind() != kind {
                    return Err(kind_failure(&ctx, kind));
                }
                Ok(())
            }),
            false,
            Vec::new(),
        );
    }

    env.define(
        "required",
        validator_fn(|ctx| {
            if ctx.value.is_none() {
                return Err(Error::failure(format!(
                    "Required value at key path '{}'.",
                    ctx.path
                )));
            }
            Ok(())
        }),
        false,
        Vec::new(),
    );

    env.define("any", validator_fn(|_ctx| Ok(())), false, Vec::new());

    env.define(
        "shape",
        validator_fn(|ctx| {
            let Some(value) = ctx.value else { return Ok(()) };
            let Some(Params::Schema(schema)) = ctx.params else {
                return Err(Error::config("shape expects a field schema."));
            };
            let Value::Object(map) = value else {
                return Err(kind_failure(&ctx, Kind::Object));
            };

            let mut fields: BTreeMap<String, Descriptor> = BTreeMap::new();

            let unallowed: Vec<&str> = map
                .keys()
                .filter(|k| !schema.contains(k))
                .map(String::as_str)
                .collect();
            if !unallowed.is_empty() {
                fields.insert(
                    "unallowedKeys".to_string(),
                    Descriptor::Message(format!(
                        "Keys [{}] at key path '{}' are not allowed.",
                        unallowed.join(","),
                        ctx.path
                    )),
                );
            }

            for (name, chain) in schema.iter() {
                let child = ctx.path.join_key(name.clone());
                match run_chain(ctx.env, map.get(name), chain, &child, ctx.root) {
                    Ok(()) => {}
                    Err(Error::Validation(descriptor)) => {
                        fields.insert(name.clone(), descriptor);
                    }
                    Err(other) => return Err(other),
                }
            }

            if fields.is_empty() {
                Ok(())
            } else {
                Err(Error::Validation(Descriptor::Fields(fields)))
            }
        }),
        true,
        Vec::new(),
    );

    env.define(
        "arrayOf",
        validator_fn(|ctx| {
            let Some(value) = ctx.value else { return Ok(()) };
            let Some(Params::Chain(element)) = ctx.params else {
                return Err(Error::config("arrayOf expects an element chain."));
            };
            let Value::Array(items) = value else {
                return Err(kind_failure(&ctx, Kind::Array));
            };

            let mut entries: Vec<Option<Descriptor>> = Vec::with_capacity(items.len());
            let mut failed = false;
            for (index, item) in items.iter().enumerate() {
                let child = ctx.path.join_index(index);
                match run_chain(ctx.env, Some(item), element, &child, ctx.root) {
                    Ok(()) => entries.push(None),
                    Err(Error::Validation(descriptor)) => {
                        entries.push(Some(descriptor));
                        failed = true;
                    }
                    Err(other) => return Err(other),
                }
            }

            if failed {
                Err(Error::Validation(Descriptor::Items(entries)))
            } else {
                Ok(())
            }
        }),
        true,
        Vec::new(),
    );

    env.define(
        "objectOf",
        validator_fn(|ctx| {
            let Some(value) = ctx.value else { return Ok(()) };
            let Some(Params::Chain(entry)) = ctx.params else {
                return Err(Error::config("objectOf expects an entry chain."));
            };
            let Value::Object(map) = value else {
                return Err(kind_failure(&ctx, Kind::Object));
            };

            let mut fields: BTreeMap<String, Descriptor> = BTreeMap::new();
            for (key, item) in map {
                let child = ctx.path.join_key(key.clone());
                match run_chain(ctx.env, Some(item), entry, &child, ctx.root) {
                    Ok(()) => {}
                    Err(Error::Validation(descriptor)) => {
                        fields.insert(key.clone(), descriptor);
                    }
                    Err(other) => return Err(other),
                }
            }

            if fields.is_empty() {
                Ok(())
            } else {
                Err(Error::Validation(Descriptor::Fields(fields)))
            }
        }),
        true,
        Vec::new(),
    );

    env.define(
        "instanceOf",
        validator_fn(|ctx| {
            let Some(value) = ctx.value else { return Ok(()) };
            let Some(Params::TypeTest(test)) = ctx.params else {
                return Err(Error::config("instanceOf expects a type test."));
            };
            if test.matches(value) {
                Ok(())
            } else {
                Err(Error::failure(format!(
                    "Value at key path '{}' should be instance of '{}'.",
                    ctx.path,
                    test.name()
                )))
            }
        }),
        true,
        Vec::new(),
    );

    env.define(
        "oneOf",
        validator_fn(|ctx| {
            let Some(value) = ctx.value else { return Ok(()) };
            let Some(Params::Values(allowed)) = ctx.params else {
                return Err(Error::config("oneOf expects a list of allowed values."));
            };
            if allowed.contains(value) {
                return Ok(());
            }
            let joined: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
            Err(Error::failure(format!(
                "Value at key path '{}' should be one of [{}], but it is '{}'.",
                ctx.path,
                joined.join(","),
                value
            )))
        }),
        true,
        Vec::new(),
    );

    env.define(
        "oneOfType",
        validator_fn(|ctx| {
            let Some(value) = ctx.value else { return Ok(()) };
            let Some(Params::Chains(alternatives)) = ctx.params else {
                return Err(Error::config("oneOfType expects a list of chains."));
            };
            for alternative in alternatives {
                match run_chain(ctx.env, Some(value), alternative, ctx.path, ctx.root) {
                    Ok(()) => return Ok(()),
                    Err(Error::Validation(_)) => {}
                    Err(other) => return Err(other),
                }
            }
            let names: Vec<&str> = alternatives
                .iter()
                .filter_map(|c| c.steps().first())
                .map(|s| s.name())
                .collect();
            Err(Error::failure(format!(
                "Value at key path '{}' should be one of type [{}].",
                ctx.path,
                names.join(",")
            )))
        }),
        true,
        Vec::new(),
    );

    env.define(
        "validateWith",
        validator_fn(|ctx| {
            let Some(Params::Predicate(predicate)) = ctx.params else {
                return Err(Error::config("validateWith expects a predicate."));
            };
            if predicate.check(ctx.value, ctx.path, ctx.root) {
                Ok(())
            } else {
                Err(Error::failure(format!(
                    "Value at key path '{}' failed custom validation.",
                    ctx.path
                )))
            }
        }),
        true,
        Vec::new(),
    );

    env.define(
        "rule",
        validator_fn(|ctx| {
            let Some(Params::Rule(rule)) = ctx.params else {
                return Err(Error::config("rule expects a checker chain and a message."));
            };
            match run_chain(ctx.env, ctx.value, rule.chain(), ctx.path, ctx.root) {
                Ok(()) => Ok(()),
                // The underlying message is deliberately discarded.
                Err(Error::Validation(_)) => Err(Error::failure(rule.message())),
                Err(other) => Err(other),
            }
        }),
        true,
        Vec::new(),
    );

    env.define(
        "rules",
        validator_fn(|ctx| {
            let Some(Params::Rules(list)) = ctx.params else {
                return Err(Error::config("rules expects a list of rules."));
            };
            let mut messages: Vec<Descriptor> = Vec::new();
            for rule in list {
                match run_chain(ctx.env, ctx.value, rule.chain(), ctx.path, ctx.root) {
                    Ok(()) => {}
                    Err(Error::Validation(_)) => {
                        messages.push(Descriptor::Message(rule.message().to_string()));
                    }
                    Err(other) => return Err(other),
                }
            }
            if messages.is_empty() {
                Ok(())
            } else {
                Err(Error::Validation(Descriptor::List(messages)))
            }
        }),
        true,
        Vec::new(),
    );
}
