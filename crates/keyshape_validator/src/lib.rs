//! # Keyshape Validator
//!
//! Runtime schema-validation engine for loosely-typed data. Schemas are
//! declarative mappings from field names to composable validator chains;
//! validation walks the input recursively and reports every violation in a
//! descriptor that mirrors the input's structure, localized by key path.
//!
//! ## Example
//!
//! ```rust
//! use keyshape_core::chain::{array_of, number, one_of, string};
//! use keyshape_core::schema::Schema;
//! use keyshape_core::value::Value;
//! use keyshape_validator::{valid, validation};
//!
//! let schema = Schema::new()
//!     .field("title", string().required())
//!     .field("sex", one_of(vec!["male".into(), "female".into()]))
//!     .field("scores", array_of(number()));
//!
//! let input = Value::object([
//!     ("title", Value::from("profile")),
//!     ("sex", Value::from("female")),
//!     ("scores", Value::array([1, 2, 3])),
//! ]);
//!
//! assert_eq!(valid(&input, &schema), Ok(true));
//! assert_eq!(validation(&input, &schema), Ok(None));
//! ```
//!
//! The free functions operate on one process-wide default environment;
//! [`Environment`] instances provide isolated registries for tests and
//! embedding.

mod builtins;
mod engine;
mod environment;

pub use engine::{run_chain, valid, validate, validate_chain, validation};
pub use environment::{
    add_validator, config, has_validator, validator_fn, ChainExt, Config, ConfigPatch, Ctx,
    Environment, ValidatorDef, ValidatorFn,
};
