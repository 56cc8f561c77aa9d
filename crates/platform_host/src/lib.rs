//! Typed host-domain contracts shared by the desktop runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services used by the desktop shell: the
//! key/value preference store that backs persisted desktop state and the clock helpers used to
//! synthesize runtime identifiers. Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod time;

pub use storage::prefs::{MemoryPrefsStore, PrefsStore, PrefsStoreFuture};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
