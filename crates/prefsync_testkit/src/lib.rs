//! # Prefsync Testkit
//!
//! Test utilities for prefsync.
//!
//! This crate provides:
//! - Fixtures: a representative schema, server documents and a fully wired
//!   in-memory `PreferencesSync`
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prefsync_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn pull_applies_server_values() {
//!     let sync = TestSync::with_server_prefs(&[("subtitleSize", "24")]);
//!     sync.pull().await;
//!     assert_eq!(sync.store.get("subtitleSize"), Some(PrefValue::Number(24.0)));
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use prefsync_codec::{ClientPreferences, PrefValue, RemotePreferences, TypeTag};
}

pub use fixtures::*;
pub use generators::*;
