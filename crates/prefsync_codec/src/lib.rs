//! # Prefsync Codec
//!
//! Type coercion between the server's flat, string-valued preference blob and
//! the strongly typed settings a client works with.
//!
//! This crate provides:
//! - `PrefValue`, the typed value of a single client setting
//! - `ClientPreferences` / `RemotePreferences` maps
//! - `SchemaOracle`, the authoritative set of keys and their `TypeTag`
//! - `decode` / `encode` coercion in both directions
//! - `filter`, which purges keys the schema no longer knows
//!
//! ## Coercion Rules
//!
//! | Tag        | Decode (string → typed)                         | Encode (typed → string) |
//! |------------|--------------------------------------------------|-------------------------|
//! | `Bool`     | exactly `"true"` is `true`, anything else false | `true` / `false`        |
//! | `Number`   | loose numeric parse, `NaN` on failure            | shortest decimal        |
//! | `Sequence` | strip `[..]`, split on `,`, JSON literal or raw  | `[a,b,c]`               |
//! | `Null`     | always `null`                                    | `null`                  |
//! | `Undefined`| always `undefined`                               | `undefined`             |
//! | `Object`   | raw string, boxed                                | raw string              |
//!
//! ## Usage
//!
//! ```
//! use prefsync_codec::{decode, encode, filter, RemotePreferences, StaticSchema, TypeTag};
//!
//! let schema = StaticSchema::new()
//!     .with_key("darkMode", TypeTag::Bool)
//!     .with_key("volume", TypeTag::Number);
//!
//! let mut remote = RemotePreferences::new();
//! remote.insert("darkMode", "false");
//! remote.insert("volume", "80");
//! remote.insert("legacyFeature", "1");
//!
//! let client = filter(decode(&remote, &schema), &schema);
//! assert_eq!(client.len(), 2);
//! assert_eq!(encode(&client).get("volume"), Some("80"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod coerce;
mod error;
mod filter;
mod prefs;
mod schema;
mod value;

pub use coerce::{decode, decode_with, encode, encode_value, parse_number, CoercionOptions};
pub use error::{CodecError, CodecResult};
pub use filter::{filter, partition_unknown};
pub use prefs::{ClientPreferences, RemotePreferences};
pub use schema::{SchemaOracle, StaticSchema, TypeTag};
pub use value::{format_number, Literal, PrefValue};
