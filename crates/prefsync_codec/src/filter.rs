//! Key filter: keeps decoded preferences within the schema's key set.

use crate::prefs::ClientPreferences;
use crate::schema::SchemaOracle;

/// Removes every key the schema does not recognize.
///
/// The returned key set is always a subset of the schema's key set.
pub fn filter<S: SchemaOracle + ?Sized>(decoded: ClientPreferences, schema: &S) -> ClientPreferences {
    partition_unknown(decoded, schema).0
}

/// Splits `decoded` into the recognized preferences and the names of the
/// keys that were dropped.
pub fn partition_unknown<S: SchemaOracle + ?Sized>(
    decoded: ClientPreferences,
    schema: &S,
) -> (ClientPreferences, Vec<String>) {
    let mut kept = ClientPreferences::new();
    let mut dropped = Vec::new();

    for (key, value) in decoded {
        if schema.contains(&key) {
            kept.insert(key, value);
        } else {
            dropped.push(key);
        }
    }

    (kept, dropped)
}
