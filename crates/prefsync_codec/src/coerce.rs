//! The coercion engine: remote strings to typed values and back.

use crate::error::{CodecError, CodecResult};
use crate::prefs::{ClientPreferences, RemotePreferences};
use crate::schema::{SchemaOracle, TypeTag};
use crate::value::{parse_literal, Literal, PrefValue};

/// Options controlling how strictly remote strings are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoercionOptions {
    /// Fail with [`CodecError::Coercion`] instead of producing `NaN` when a
    /// number-typed key holds a non-numeric string.
    pub strict_numbers: bool,
}

impl CoercionOptions {
    /// Lenient coercion: never fails.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Strict coercion: unparseable numbers are errors.
    pub fn strict() -> Self {
        Self {
            strict_numbers: true,
        }
    }
}

/// Decodes remote strings into typed values using the schema's type for
/// each key.
///
/// Keys the schema does not know decode to [`PrefValue::Undefined`]; run the
/// result through [`filter`](crate::filter) to drop them.
pub fn decode<S: SchemaOracle + ?Sized>(remote: &RemotePreferences, schema: &S) -> ClientPreferences {
    remote
        .iter()
        .map(|(key, raw)| (key, coerce(raw, schema.type_of(key))))
        .collect()
}

/// Like [`decode`], but honors `options`.
pub fn decode_with<S: SchemaOracle + ?Sized>(
    remote: &RemotePreferences,
    schema: &S,
    options: CoercionOptions,
) -> CodecResult<ClientPreferences> {
    let mut decoded = ClientPreferences::new();
    for (key, raw) in remote.iter() {
        let tag = schema.type_of(key);
        if options.strict_numbers && tag == Some(TypeTag::Number) && parse_number(raw).is_none() {
            return Err(CodecError::coercion(key, raw, TypeTag::Number));
        }
        decoded.insert(key, coerce(raw, tag));
    }
    Ok(decoded)
}

/// Encodes typed values into their remote string form.
pub fn encode(client: &ClientPreferences) -> RemotePreferences {
    client
        .iter()
        .map(|(key, value)| (key, encode_value(value)))
        .collect()
}

/// Encodes a single value. Sequences are wrapped in brackets.
pub fn encode_value(value: &PrefValue) -> String {
    match value {
        PrefValue::Sequence(_) => format!("[{value}]"),
        other => other.to_string(),
    }
}

fn coerce(raw: &str, tag: Option<TypeTag>) -> PrefValue {
    match tag {
        // Only the exact literal is true; "false", "" and "1" are all false.
        Some(TypeTag::Bool) => PrefValue::Bool(raw == "true"),
        Some(TypeTag::Number) => PrefValue::Number(parse_number(raw).unwrap_or(f64::NAN)),
        Some(TypeTag::Sequence) => PrefValue::Sequence(parse_sequence(raw)),
        Some(TypeTag::Null) => PrefValue::Null,
        Some(TypeTag::Undefined) | None => PrefValue::Undefined,
        Some(TypeTag::Object) => PrefValue::Object(raw.to_string()),
    }
}

/// Loose numeric parse.
///
/// Whitespace is trimmed and an empty string is zero. Accepts decimal and
/// exponent notation, `Infinity` with an optional sign, and `0x`/`0o`/`0b`
/// integer prefixes. Returns `None` for anything else.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return None;
            }
            // Folded as a float so literals wider than 64 bits stay finite.
            let value = digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
            return Some(value);
        }
    }

    // Rust's float parser also accepts "inf" and "nan"; those are not numbers here.
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return None;
    }

    s.parse::<f64>().ok()
}

fn parse_sequence(raw: &str) -> Vec<Literal> {
    let body = raw
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(raw);

    if body.is_empty() {
        return Vec::new();
    }

    body.split(',').map(parse_literal).collect()
}
