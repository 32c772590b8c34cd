//! Validator chains and their fluent builder surface.
//!
//! A chain is an ordered, immutable sequence of named validation steps.
//! Every builder method appends to a *copy* of the underlying step list, so
//! a previously returned chain is never observably mutated and may safely
//! serve as a shared prefix for several variants:
//!
//! ```rust
//! use keyshape_core::chain::string;
//!
//! let base = string();
//! let required = base.required();
//! assert_eq!(base.len(), 1);
//! assert_eq!(required.len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::keypath::KeyPath;
use crate::schema::Schema;
use crate::value::Value;

/// A named type test, the counterpart of an instance-of check against a
/// constructor.
#[derive(Clone)]
pub struct TypeTest {
    name: String,
    test: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl TypeTest {
    /// Creates a type test with a display name.
    pub fn new(name: impl Into<String>, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// The display name used in failure messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the test to a value.
    pub fn matches(&self, value: &Value) -> bool {
        (self.test)(value)
    }
}

impl fmt::Debug for TypeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTest").field("name", &self.name).finish()
    }
}

/// A custom validation predicate over `(value, key path, root)`.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(Option<&Value>, &KeyPath, &Value) -> bool + Send + Sync>);

impl Predicate {
    /// Wraps a predicate function.
    pub fn new(
        f: impl Fn(Option<&Value>, &KeyPath, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluates the predicate.
    pub fn check(&self, value: Option<&Value>, path: &KeyPath, root: &Value) -> bool {
        (self.0)(value, path, root)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(<fn>)")
    }
}

/// A checker chain paired with the fixed message that replaces whatever the
/// chain itself would report.
#[derive(Debug, Clone)]
pub struct Rule {
    chain: Chain,
    message: String,
}

impl Rule {
    /// Pairs a checker chain with its override message.
    pub fn new(chain: Chain, message: impl Into<String>) -> Self {
        Self {
            chain,
            message: message.into(),
        }
    }

    /// The checker chain.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// The fixed message reported when the chain fails.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Parameters attached to one chain step.
#[derive(Debug, Clone)]
pub enum Params {
    /// Field schema, for `shape`.
    Schema(Schema),
    /// Element chain, for `arrayOf`/`objectOf`.
    Chain(Chain),
    /// Alternative chains, for `oneOfType`.
    Chains(Vec<Chain>),
    /// Allowed values, for `oneOf`.
    Values(Vec<Value>),
    /// Named type test, for `instanceOf`.
    TypeTest(TypeTest),
    /// Custom predicate, for `validateWith`.
    Predicate(Predicate),
    /// Checker chain plus override message, for `rule`.
    Rule(Box<Rule>),
    /// Rule list, for `rules`.
    Rules(Vec<Rule>),
    /// Arbitrary value parameter for runtime-registered validators.
    Value(Value),
}

/// One link in a chain: a validator name plus optional parameters.
#[derive(Debug, Clone)]
pub struct Step {
    name: String,
    params: Option<Params>,
}

impl Step {
    /// The registered validator name this step invokes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameters attached to this step, if any.
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }
}

/// An ordered, immutable sequence of validation steps.
///
/// A chain with zero steps is a legal composition target but invalid as a
/// terminal value; the engine rejects it.
#[derive(Debug, Clone, Default)]
pub struct Chain {
    steps: Vec<Step>,
}

impl Chain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The steps of this chain, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if this chain has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Appends a raw step, returning a new chain sharing this one's prefix.
    ///
    /// This performs no registry lookup and no dependency checking; it is
    /// the primitive the typed builder methods are written in terms of.
    /// Registered validators with declared dependencies should be appended
    /// through the environment so the dependency check runs.
    pub fn with(&self, name: impl Into<String>, params: Option<Params>) -> Chain {
        let mut steps = self.steps.clone();
        steps.push(Step {
            name: name.into(),
            params,
        });
        Chain { steps }
    }

    /// Appends the `string` kind check.
    pub fn string(&self) -> Chain {
        self.with("string", None)
    }

    /// Appends the `number` kind check.
    pub fn number(&self) -> Chain {
        self.with("number", None)
    }

    /// Appends the `boolean` kind check.
    pub fn boolean(&self) -> Chain {
        self.with("boolean", None)
    }

    /// Appends the `array` kind check.
    pub fn array(&self) -> Chain {
        self.with("array", None)
    }

    /// Appends the `object` kind check.
    pub fn object(&self) -> Chain {
        self.with("object", None)
    }

    /// Appends the `function` kind check.
    pub fn function(&self) -> Chain {
        self.with("function", None)
    }

    /// Appends the `symbol` kind check.
    pub fn symbol(&self) -> Chain {
        self.with("symbol", None)
    }

    /// Appends the `date` kind check.
    pub fn date(&self) -> Chain {
        self.with("date", None)
    }

    /// Appends the `regexp` kind check.
    pub fn regexp(&self) -> Chain {
        self.with("regexp", None)
    }

    /// Appends the `null` kind check.
    pub fn null(&self) -> Chain {
        self.with("null", None)
    }

    /// Appends the presence requirement; the only step that fails on an
    /// absent value.
    pub fn required(&self) -> Chain {
        self.with("required", None)
    }

    /// Appends the always-passing step.
    pub fn any(&self) -> Chain {
        self.with("any", None)
    }

    /// Appends an exact-keyed object check with per-field chains.
    pub fn shape(&self, schema: Schema) -> Chain {
        self.with("shape", Some(Params::Schema(schema)))
    }

    /// Appends a homogeneous-array check validating every element.
    pub fn array_of(&self, element: Chain) -> Chain {
        self.with("arrayOf", Some(Params::Chain(element)))
    }

    /// Appends a homogeneous-object check validating every entry.
    pub fn object_of(&self, entry: Chain) -> Chain {
        self.with("objectOf", Some(Params::Chain(entry)))
    }

    /// Appends a named type-test check.
    pub fn instance_of(&self, test: TypeTest) -> Chain {
        self.with("instanceOf", Some(Params::TypeTest(test)))
    }

    /// Appends a membership check against a list of allowed values.
    pub fn one_of(&self, values: Vec<Value>) -> Chain {
        self.with("oneOf", Some(Params::Values(values)))
    }

    /// Appends an alternatives check; the first succeeding chain wins.
    pub fn one_of_type(&self, alternatives: Vec<Chain>) -> Chain {
        self.with("oneOfType", Some(Params::Chains(alternatives)))
    }

    /// Appends a custom predicate check.
    pub fn validate_with(&self, predicate: Predicate) -> Chain {
        self.with("validateWith", Some(Params::Predicate(predicate)))
    }

    /// Appends a checker chain whose failures are replaced by a fixed
    /// message.
    pub fn rule(&self, checker: Chain, message: impl Into<String>) -> Chain {
        self.with("rule", Some(Params::Rule(Box::new(Rule::new(checker, message)))))
    }

    /// Appends a non-short-circuiting list of rules; every failing rule's
    /// message is reported.
    pub fn rules(&self, rules: Vec<Rule>) -> Chain {
        self.with("rules", Some(Params::Rules(rules)))
    }
}

/// Starts a chain with the `string` kind check.
pub fn string() -> Chain {
    Chain::new().string()
}

/// Starts a chain with the `number` kind check.
pub fn number() -> Chain {
    Chain::new().number()
}

/// Starts a chain with the `boolean` kind check.
pub fn boolean() -> Chain {
    Chain::new().boolean()
}

/// Starts a chain with the `array` kind check.
pub fn array() -> Chain {
    Chain::new().array()
}

/// Starts a chain with the `object` kind check.
pub fn object() -> Chain {
    Chain::new().object()
}

/// Starts a chain with the `function` kind check.
pub fn function() -> Chain {
    Chain::new().function()
}

/// Starts a chain with the `symbol` kind check.
pub fn symbol() -> Chain {
    Chain::new().symbol()
}

/// Starts a chain with the `date` kind check.
pub fn date() -> Chain {
    Chain::new().date()
}

/// Starts a chain with the `regexp` kind check.
pub fn regexp() -> Chain {
    Chain::new().regexp()
}

/// Starts a chain with the `null` kind check.
pub fn null() -> Chain {
    Chain::new().null()
}

/// Starts a chain with the presence requirement.
pub fn required() -> Chain {
    Chain::new().required()
}

/// Starts a chain with the always-passing step.
pub fn any() -> Chain {
    Chain::new().any()
}

/// Starts a chain with an exact-keyed object check.
pub fn shape(schema: Schema) -> Chain {
    Chain::new().shape(schema)
}

/// Starts a chain with a homogeneous-array check.
pub fn array_of(element: Chain) -> Chain {
    Chain::new().array_of(element)
}

/// Starts a chain with a homogeneous-object check.
pub fn object_of(entry: Chain) -> Chain {
    Chain::new().object_of(entry)
}

/// Starts a chain with a named type-test check.
pub fn instance_of(test: TypeTest) -> Chain {
    Chain::new().instance_of(test)
}

/// Starts a chain with a membership check.
pub fn one_of(values: Vec<Value>) -> Chain {
    Chain::new().one_of(values)
}

/// Starts a chain with an alternatives check.
pub fn one_of_type(alternatives: Vec<Chain>) -> Chain {
    Chain::new().one_of_type(alternatives)
}

/// Starts a chain with a custom predicate check.
pub fn validate_with(predicate: Predicate) -> Chain {
    Chain::new().validate_with(predicate)
}

/// Starts a chain with a message-overriding rule.
pub fn rule(checker: Chain, message: impl Into<String>) -> Chain {
    Chain::new().rule(checker, message)
}

/// Starts a chain with a non-short-circuiting rule list.
pub fn rules(rules: Vec<Rule>) -> Chain {
    Chain::new().rules(rules)
}
