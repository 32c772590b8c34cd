//! Field schemas: named mappings from field name to validator chain.

use std::collections::BTreeMap;

use crate::chain::Chain;

/// A mapping from field name to the chain validating that field.
///
/// Built fluently in the same style as the chain builder:
///
/// ```rust
/// use keyshape_core::chain::{number, string};
/// use keyshape_core::schema::Schema;
///
/// let schema = Schema::new()
///     .field("name", string().required())
///     .field("age", number());
/// assert_eq!(schema.len(), 2);
/// ```
///
/// Keys are unique; a repeated `field` call replaces the earlier chain.
/// Iteration order is the sorted key order, which keeps error enumeration
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, Chain>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field with its validator chain.
    pub fn field(mut self, name: impl Into<String>, chain: Chain) -> Self {
        self.fields.insert(name.into(), chain);
        self
    }

    /// Looks up the chain for a field.
    pub fn get(&self, name: &str) -> Option<&Chain> {
        self.fields.get(name)
    }

    /// Returns true if the schema declares a field.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Chain)> {
        self.fields.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Chain)> for Schema {
    fn from_iter<T: IntoIterator<Item = (K, Chain)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{number, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn field_replaces_on_duplicate_key() {
        let schema = Schema::new()
            .field("a", string())
            .field("a", number());
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("a").unwrap().steps()[0].name(), "number");
    }

    #[test]
    fn iteration_is_key_sorted() {
        let schema = Schema::new()
            .field("b", number())
            .field("a", string());
        let keys: Vec<&String> = schema.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
