//! Schema oracle: the authoritative set of preference keys and their types.

use crate::error::{CodecError, CodecResult};
use crate::prefs::ClientPreferences;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The declared type of a preference key, selecting its coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// Boolean flag.
    Bool,
    /// Numeric value.
    Number,
    /// Ordered sequence of literals.
    Sequence,
    /// Always null.
    Null,
    /// Always undefined.
    Undefined,
    /// Opaque object.
    Object,
}

impl TypeTag {
    /// Returns the canonical lowercase name of the tag.
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Bool => "boolean",
            TypeTag::Number => "number",
            TypeTag::Sequence => "array",
            TypeTag::Null => "null",
            TypeTag::Undefined => "undefined",
            TypeTag::Object => "object",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = CodecError;

    fn from_str(s: &str) -> CodecResult<Self> {
        match s {
            "boolean" | "bool" => Ok(TypeTag::Bool),
            "number" => Ok(TypeTag::Number),
            "array" | "sequence" => Ok(TypeTag::Sequence),
            "null" => Ok(TypeTag::Null),
            "undefined" => Ok(TypeTag::Undefined),
            "object" => Ok(TypeTag::Object),
            other => Err(CodecError::unknown_type_tag(other)),
        }
    }
}

/// Supplies the recognized preference keys and the type of each.
///
/// Implementations must be consistent: a key is recognized exactly when
/// [`type_of`](SchemaOracle::type_of) returns `Some`.
pub trait SchemaOracle {
    /// Returns the declared type of `key`, or `None` if the key is unknown.
    fn type_of(&self, key: &str) -> Option<TypeTag>;

    /// Returns true if `key` is part of the schema.
    fn contains(&self, key: &str) -> bool {
        self.type_of(key).is_some()
    }
}

/// A statically declared schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSchema {
    keys: BTreeMap<String, TypeTag>,
}

impl StaticSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key with its declared type.
    pub fn with_key(mut self, key: impl Into<String>, tag: TypeTag) -> Self {
        self.keys.insert(key.into(), tag);
        self
    }

    /// Declares or redeclares a key.
    pub fn insert(&mut self, key: impl Into<String>, tag: TypeTag) {
        self.keys.insert(key.into(), tag);
    }

    /// Builds a schema from a set of default settings, taking each key's
    /// type from its default value.
    pub fn from_defaults(defaults: &ClientPreferences) -> Self {
        let keys = defaults
            .iter()
            .map(|(key, value)| (key.to_string(), value.type_tag()))
            .collect();
        Self { keys }
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the schema declares no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterates over the declared keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Iterates over `(key, tag)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeTag)> {
        self.keys.iter().map(|(k, t)| (k.as_str(), *t))
    }
}

impl SchemaOracle for StaticSchema {
    fn type_of(&self, key: &str) -> Option<TypeTag> {
        self.keys.get(key).copied()
    }
}

impl<S: SchemaOracle + ?Sized> SchemaOracle for &S {
    fn type_of(&self, key: &str) -> Option<TypeTag> {
        (**self).type_of(key)
    }
}

impl<S: SchemaOracle + ?Sized> SchemaOracle for std::sync::Arc<S> {
    fn type_of(&self, key: &str) -> Option<TypeTag> {
        (**self).type_of(key)
    }
}

impl<K: Into<String>> FromIterator<(K, TypeTag)> for StaticSchema {
    fn from_iter<I: IntoIterator<Item = (K, TypeTag)>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PrefValue;

    #[test]
    fn static_schema_lookup() {
        let schema = StaticSchema::new()
            .with_key("darkMode", TypeTag::Bool)
            .with_key("volume", TypeTag::Number);

        assert_eq!(schema.type_of("darkMode"), Some(TypeTag::Bool));
        assert_eq!(schema.type_of("volume"), Some(TypeTag::Number));
        assert_eq!(schema.type_of("missing"), None);
        assert!(schema.contains("volume"));
        assert!(!schema.contains("missing"));
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn schema_from_defaults() {
        let mut defaults = ClientPreferences::new();
        defaults.insert("darkMode", PrefValue::Bool(true));
        defaults.insert("tags", PrefValue::Sequence(vec![]));
        defaults.insert("locale", PrefValue::Undefined);

        let schema = StaticSchema::from_defaults(&defaults);
        assert_eq!(schema.type_of("darkMode"), Some(TypeTag::Bool));
        assert_eq!(schema.type_of("tags"), Some(TypeTag::Sequence));
        assert_eq!(schema.type_of("locale"), Some(TypeTag::Undefined));
        assert_eq!(schema.keys().collect::<Vec<_>>(), ["darkMode", "locale", "tags"]);
    }

    #[test]
    fn type_tag_names_roundtrip() {
        for tag in [
            TypeTag::Bool,
            TypeTag::Number,
            TypeTag::Sequence,
            TypeTag::Null,
            TypeTag::Undefined,
            TypeTag::Object,
        ] {
            assert_eq!(tag.name().parse::<TypeTag>().unwrap(), tag);
        }
        assert!(matches!(
            "string".parse::<TypeTag>(),
            Err(CodecError::UnknownTypeTag { .. })
        ));
    }
}
