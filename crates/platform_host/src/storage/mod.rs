//! Storage contracts for persisted shell state.

pub mod prefs;
