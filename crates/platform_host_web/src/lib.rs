//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! The desktop shell only needs durable key/value preferences, which the browser provides through
//! `window.localStorage`. On non-`wasm32` targets the adapter is inert so the runtime and its tests
//! build natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod storage;

pub use adapters::prefs_store;
pub use storage::local_prefs::WebPrefsStore;
