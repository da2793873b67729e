//! Error types for the codec crate.

use crate::schema::TypeTag;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while coercing preference values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A remote string could not be coerced to the type the schema expects.
    ///
    /// Only produced when strict coercion is enabled.
    #[error("cannot coerce {value:?} for key {key:?} to {expected}")]
    Coercion {
        /// Preference key.
        key: String,
        /// Raw remote value.
        value: String,
        /// Type the schema declares for the key.
        expected: TypeTag,
    },

    /// A type tag name was not recognized.
    #[error("unknown type tag: {name}")]
    UnknownTypeTag {
        /// The unrecognized name.
        name: String,
    },
}

impl CodecError {
    /// Create a coercion error.
    pub fn coercion(key: impl Into<String>, value: impl Into<String>, expected: TypeTag) -> Self {
        Self::Coercion {
            key: key.into(),
            value: value.into(),
            expected,
        }
    }

    /// Create an unknown type tag error.
    pub fn unknown_type_tag(name: impl Into<String>) -> Self {
        Self::UnknownTypeTag { name: name.into() }
    }
}
