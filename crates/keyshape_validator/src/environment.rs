//! Validator environment: registry, dependency table and configuration.
//!
//! An [`Environment`] owns the table of named validator implementations and
//! the configuration governing chain construction. One process-wide default
//! instance backs the free-function API; isolated instances can be created
//! for tests or embedding so registrations never leak between contexts.
//! Registration is setup-phase, single-writer work; validation only reads.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock, RwLock};

use tracing::debug;

use keyshape_core::{Chain, Error, KeyPath, Params, Result, Value};

/// Execution context handed to a validator implementation.
pub struct Ctx<'a> {
    /// The value under validation; `None` when the key is absent from its
    /// parent.
    pub value: Option<&'a Value>,
    /// Location of the value within the root input.
    pub path: &'a KeyPath,
    /// The root input the top-level call started from.
    pub root: &'a Value,
    /// Parameters attached to this chain step, if any.
    pub params: Option<&'a Params>,
    /// The environment the chain is running in; container validators use it
    /// to recurse.
    pub env: &'a Environment,
}

/// A validator implementation: returns `Ok` on pass, `Error::Validation` on
/// failure, any other error to abort the whole validate call.
pub type ValidatorFn = Arc<dyn Fn(Ctx<'_>) -> Result<()> + Send + Sync>;

/// Wraps a closure as a [`ValidatorFn`].
pub fn validator_fn(
    f: impl for<'a> Fn(Ctx<'a>) -> Result<()> + Send + Sync + 'static,
) -> ValidatorFn {
    Arc::new(f)
}

/// A registered validator: implementation plus registration metadata.
#[derive(Clone)]
pub struct ValidatorDef {
    name: String,
    run: ValidatorFn,
    accepts_params: bool,
    dependencies: Vec<String>,
}

impl ValidatorDef {
    /// The registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The implementation.
    pub fn run(&self) -> &ValidatorFn {
        &self.run
    }

    /// Whether chain steps for this validator carry parameters.
    pub fn accepts_params(&self) -> bool {
        self.accepts_params
    }

    /// Names of validators that must precede this one within a chain.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}

/// Environment configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Whether chain construction checks declared step dependencies.
    pub check_deps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { check_deps: true }
    }
}

/// A shallow-merge patch for [`Config`]; `None` fields keep their current
/// value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigPatch {
    /// New value for `check_deps`, if set.
    pub check_deps: Option<bool>,
}

/// Names used by the API surface itself; a validator may not claim one.
const RESERVED: &[&str] = &[
    "step",
    "add_validator",
    "has_validator",
    "config",
    "validate",
    "valid",
    "validation",
];

/// Registry of validator implementations plus configuration.
pub struct Environment {
    validators: HashMap<String, ValidatorDef>,
    config: Config,
}

impl Environment {
    /// Creates an environment with the built-in validator set registered.
    pub fn new() -> Self {
        let mut env = Self {
            validators: HashMap::new(),
            config: Config::default(),
        };
        crate::builtins::register(&mut env);
        env
    }

    /// Inserts a definition without collision checks. Built-ins register
    /// through this path; user code goes through [`add_validator`].
    ///
    /// [`add_validator`]: Environment::add_validator
    pub(crate) fn define(
        &mut self,
        name: &str,
        run: ValidatorFn,
        accepts_params: bool,
        dependencies: Vec<String>,
    ) {
        self.validators.insert(
            name.to_string(),
            ValidatorDef {
                name: name.to_string(),
                run,
                accepts_params,
                dependencies,
            },
        );
    }

    /// Registers a validator under a globally unique name.
    ///
    /// Fails with a configuration error if the name collides with a
    /// reserved API name or redefines an existing validator.
    pub fn add_validator(
        &mut self,
        name: &str,
        run: ValidatorFn,
        accepts_params: bool,
        dependencies: Vec<String>,
    ) -> Result<()> {
        if RESERVED.contains(&name) && !self.has_validator(name) {
            return Err(Error::config(format!("Invalid validator name '{name}'.")));
        }
        if self.has_validator(name) {
            return Err(Error::config(format!("Validator '{name}' redefined.")));
        }
        debug!(validator = name, accepts_params = accepts_params, "registering validator");
        self.define(name, run, accepts_params, dependencies);
        Ok(())
    }

    /// Returns true if a validator is registered under `name`.
    pub fn has_validator(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Looks up a registered validator.
    pub fn validator(&self, name: &str) -> Option<&ValidatorDef> {
        self.validators.get(name)
    }

    /// Shallow-merges a patch into the configuration.
    pub fn config(&mut self, patch: ConfigPatch) {
        debug!(?patch, "merging config patch");
        if let Some(check_deps) = patch.check_deps {
            self.config.check_deps = check_deps;
        }
    }

    /// The current configuration.
    pub fn settings(&self) -> Config {
        self.config
    }

    /// Appends a registered validator to a chain, returning a new chain.
    ///
    /// This is the generic escape hatch for runtime-registered validators.
    /// When `check_deps` is enabled the appended validator's declared
    /// dependencies must all appear among the names of the prior steps of
    /// `base`; an unmet dependency fails here, at construction time,
    /// independent of any value being validated.
    pub fn append(&self, base: &Chain, name: &str, params: Option<Params>) -> Result<Chain> {
        let def = self
            .validator(name)
            .ok_or_else(|| Error::config(format!("Unknown validator '{name}'.")))?;
        if params.is_some() && !def.accepts_params {
            return Err(Error::config(format!(
                "Validator '{name}' does not accept parameters."
            )));
        }
        if self.config.check_deps && !def.dependencies.is_empty() {
            let prior: HashSet<&str> = base.steps().iter().map(|s| s.name()).collect();
            let missing: Vec<&str> = def
                .dependencies
                .iter()
                .map(String::as_str)
                .filter(|dep| !prior.contains(dep))
                .collect();
            if !missing.is_empty() {
                return Err(Error::config(format!(
                    "Unfulfilled validator dependencies {} for validator {}.",
                    missing.join(", "),
                    name
                )));
            }
        }
        Ok(base.with(name, params))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_ENV: LazyLock<RwLock<Environment>> =
    LazyLock::new(|| RwLock::new(Environment::new()));

/// Runs a closure with read access to the process-wide default environment.
pub(crate) fn with_default_env<T>(f: impl FnOnce(&Environment) -> T) -> T {
    let guard = DEFAULT_ENV
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&guard)
}

/// Runs a closure with write access to the process-wide default environment.
pub(crate) fn with_default_env_mut<T>(f: impl FnOnce(&mut Environment) -> T) -> T {
    let mut guard = DEFAULT_ENV
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard)
}

/// Registers a validator in the default environment.
pub fn add_validator(
    name: &str,
    run: ValidatorFn,
    accepts_params: bool,
    dependencies: Vec<String>,
) -> Result<()> {
    with_default_env_mut(|env| env.add_validator(name, run, accepts_params, dependencies))
}

/// Returns true if the default environment has a validator named `name`.
pub fn has_validator(name: &str) -> bool {
    with_default_env(|env| env.has_validator(name))
}

/// Shallow-merges a patch into the default environment's configuration.
pub fn config(patch: ConfigPatch) {
    with_default_env_mut(|env| env.config(patch));
}

/// Fluent access to runtime-registered validators against the default
/// environment.
pub trait ChainExt {
    /// Appends a registered validator by name, with the same construction-
    /// time dependency checking as [`Environment::append`].
    fn step(&self, name: &str, params: Option<Params>) -> Result<Chain>;
}

impl ChainExt for Chain {
    fn step(&self, name: &str, params: Option<Params>) -> Result<Chain> {
        with_default_env(|env| env.append(self, name, params))
    }
}
