//! Typed preference values.

use crate::schema::TypeTag;
use std::fmt;

/// A dynamically typed element of a sequence preference.
pub type Literal = serde_json::Value;

/// The typed value of a single client preference.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value. May be `NaN` after lenient decoding.
    Number(f64),
    /// Ordered sequence of dynamically typed literals.
    Sequence(Vec<Literal>),
    /// Explicit null.
    Null,
    /// Explicitly absent value.
    Undefined,
    /// Opaque object value.
    ///
    /// Remote strings for object-typed keys are boxed as-is; no structured
    /// parsing is attempted.
    Object(String),
}

impl PrefValue {
    /// Returns the type tag matching this value's variant.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            PrefValue::Bool(_) => TypeTag::Bool,
            PrefValue::Number(_) => TypeTag::Number,
            PrefValue::Sequence(_) => TypeTag::Sequence,
            PrefValue::Null => TypeTag::Null,
            PrefValue::Undefined => TypeTag::Undefined,
            PrefValue::Object(_) => TypeTag::Object,
        }
    }

    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PrefValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the elements if this is a `Sequence`.
    pub fn as_sequence(&self) -> Option<&[Literal]> {
        match self {
            PrefValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns true for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, PrefValue::Null | PrefValue::Undefined)
    }
}

/// Generic string conversion. Sequences render their elements joined by
/// commas without brackets; the bracketed wire form is produced by
/// [`encode_value`](crate::encode_value).
impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Bool(b) => write!(f, "{b}"),
            PrefValue::Number(n) => f.write_str(&format_number(*n)),
            PrefValue::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(&literal_to_string(item))?;
                }
                Ok(())
            }
            PrefValue::Null => f.write_str("null"),
            PrefValue::Undefined => f.write_str("undefined"),
            PrefValue::Object(raw) => f.write_str(raw),
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<f64> for PrefValue {
    fn from(value: f64) -> Self {
        PrefValue::Number(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Number(value as f64)
    }
}

impl From<Vec<Literal>> for PrefValue {
    fn from(value: Vec<Literal>) -> Self {
        PrefValue::Sequence(value)
    }
}

/// Renders a number the way the wire format expects.
///
/// Integral values have no fractional part, `-0` renders as `0`, and
/// non-finite values render as `NaN`, `Infinity` or `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Element string conversion: strings are emitted raw, everything else as
/// its JSON text.
pub(crate) fn literal_to_string(literal: &Literal) -> String {
    match literal {
        Literal::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parses a sequence element, falling back to the raw string.
pub(crate) fn parse_literal(raw: &str) -> Literal {
    serde_json::from_str(raw).unwrap_or_else(|_| Literal::String(raw.to_string()))
}
