//! Error types and structured failure descriptors.
//!
//! Validation failures and registry misuse are deliberately kept in one
//! tagged enum: the engine aggregates only [`Error::Validation`], while
//! [`Error::Configuration`] always propagates unchanged through every layer.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structured description of every violation found beneath one value.
///
/// A descriptor mirrors the shape of the validated input: an omitted key or
/// index means that branch passed, presence always means a failure somewhere
/// beneath it. Serialization is untagged, so a descriptor renders as the
/// same JSON shape as the input it describes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Descriptor {
    /// A single failed constraint at one key path.
    Message(String),
    /// Ordered list of failures, produced by non-short-circuiting
    /// multi-rule validators and by chains collecting several step failures.
    List(Vec<Descriptor>),
    /// Failures of an object-shaped value, keyed by field name.
    Fields(BTreeMap<String, Descriptor>),
    /// Failures of an array-shaped value, aligned by index; passing
    /// positions hold `None`.
    Items(Vec<Option<Descriptor>>),
}

impl Descriptor {
    /// Returns the message of a leaf descriptor.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Descriptor::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Returns true if this is a compound (non-leaf) descriptor.
    pub fn is_compound(&self) -> bool {
        !matches!(self, Descriptor::Message(_))
    }

    /// Builds a `Fields` descriptor from key/descriptor pairs.
    pub fn fields<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Descriptor)>,
    {
        Descriptor::Fields(entries.into_iter().map(|(k, d)| (k.into(), d)).collect())
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Message(m) => f.write_str(m),
            // Compound descriptors read best as their JSON rendering.
            other => match serde_json::to_string(other) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl From<String> for Descriptor {
    fn from(message: String) -> Self {
        Descriptor::Message(message)
    }
}

impl From<&str> for Descriptor {
    fn from(message: &str) -> Self {
        Descriptor::Message(message.to_string())
    }
}

/// Error type for schema validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value violated its schema; carries the structured descriptor.
    #[error("{0}")]
    Validation(Descriptor),

    /// Registry or chain misuse by the schema author. Never aggregated by
    /// the engine; surfaces immediately.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Creates a leaf validation failure from a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Error::Validation(Descriptor::Message(message.into()))
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Returns true if this is a validation failure (leaf or compound).
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Consumes the error, returning its descriptor if it is a validation
    /// failure.
    pub fn into_descriptor(self) -> Option<Descriptor> {
        match self {
            Error::Validation(d) => Some(d),
            Error::Configuration(_) => None,
        }
    }
}
