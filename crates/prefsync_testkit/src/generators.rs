//! Property-based test generators using proptest.
//!
//! Values produced here survive an encode/decode cycle unchanged, so they
//! can drive round-trip properties directly.

use prefsync_codec::{ClientPreferences, Literal, PrefValue};
use proptest::prelude::*;

/// Strategy for preference keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-zA-Z0-9]{0,15}").expect("Invalid regex")
}

/// Strategy for sequence elements whose string form parses back to the
/// same literal: integers, booleans and bare words that are not JSON.
pub fn literal_strategy() -> impl Strategy<Value = Literal> {
    prop_oneof![
        any::<i64>().prop_map(Literal::from),
        any::<bool>().prop_map(Literal::Bool),
        prop::string::string_regex("[a-z][a-z0-9_]{0,11}")
            .expect("Invalid regex")
            .prop_filter("bare word must not be a JSON literal", |s| {
                !matches!(s.as_str(), "true" | "false" | "null")
            })
            .prop_map(Literal::String),
    ]
}

/// Strategy for finite numbers.
pub fn number_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i32>().prop_map(f64::from),
        prop::num::f64::NORMAL,
        Just(0.0),
    ]
}

/// Strategy for a single round-trippable value of any tag.
pub fn pref_value_strategy() -> impl Strategy<Value = PrefValue> {
    prop_oneof![
        any::<bool>().prop_map(PrefValue::Bool),
        number_strategy().prop_map(PrefValue::Number),
        prop::collection::vec(literal_strategy(), 0..6).prop_map(PrefValue::Sequence),
        Just(PrefValue::Null),
        Just(PrefValue::Undefined),
        any::<String>().prop_map(PrefValue::Object),
    ]
}

/// Strategy for values restricted to booleans, numbers and sequences.
pub fn scalar_value_strategy() -> impl Strategy<Value = PrefValue> {
    prop_oneof![
        any::<bool>().prop_map(PrefValue::Bool),
        number_strategy().prop_map(PrefValue::Number),
        prop::collection::vec(literal_strategy(), 0..6).prop_map(PrefValue::Sequence),
    ]
}

/// Strategy for whole preference sets.
pub fn client_preferences_strategy() -> impl Strategy<Value = ClientPreferences> {
    prop::collection::btree_map(key_strategy(), pref_value_strategy(), 0..12)
        .prop_map(|map| map.into_iter().collect())
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a quick configuration for fast tests.
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest's config.
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
