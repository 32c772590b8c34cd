//! # Keyshape Core
//!
//! Core data structures for the Keyshape runtime schema-validation engine.
//!
//! This crate provides the building blocks the validation engine operates
//! on: the loosely-typed [`Value`] model, [`KeyPath`]s locating values
//! within a root input, immutable validator [`Chain`]s with a fluent
//! builder surface, field [`Schema`]s, and the [`Error`]/[`Descriptor`]
//! taxonomy that reports violations while mirroring the input's structure.
//!
//! ## Example
//!
//! ```rust
//! use keyshape_core::chain::{number, string};
//! use keyshape_core::schema::Schema;
//! use keyshape_core::value::Value;
//!
//! let schema = Schema::new()
//!     .field("title", string().required())
//!     .field("year", number());
//!
//! let input = Value::object([
//!     ("title", Value::from("dune")),
//!     ("year", Value::from(1965)),
//! ]);
//!
//! assert!(schema.contains("title"));
//! assert_eq!(input.kind().name(), "object");
//! ```

pub mod chain;
pub mod error;
pub mod keypath;
pub mod schema;
pub mod value;

pub use chain::{Chain, Params, Predicate, Rule, Step, TypeTest};
pub use error::{Descriptor, Error, Result};
pub use keypath::{KeyPath, Segment};
pub use schema::Schema;
pub use value::{FuncRef, Kind, Value};
