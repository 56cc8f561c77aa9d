//! Desktop runtime persistence over the host [`PrefsStore`] contract.
//!
//! Two keys are owned here: the icon layout envelope and the first-run welcome flag. Loads are
//! tolerant: a missing, malformed, or unreadable blob yields the empty default and a warning, so a
//! broken store degrades persistence without degrading the desktop.

use std::collections::BTreeMap;

use desktop_app_contract::ApplicationId;
use platform_host::PrefsStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::IconPosition;

/// Preference key holding the icon layout envelope.
pub const ICON_LAYOUT_KEY: &str = "desktop-icon-storage";
/// Preference key set once the welcome window has been shown.
pub const WELCOME_SHOWN_KEY: &str = "dfs-readme-opened";
pub const ICON_LAYOUT_SCHEMA_VERSION: u32 = 1;

const WELCOME_SHOWN_VALUE: &str = "1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("preference store failed: {0}")]
    Store(String),
    #[error("serialize failed: {0}")]
    Serialize(String),
    #[error("deserialize failed: {0}")]
    Deserialize(String),
    #[error("unsupported icon layout schema version {0}")]
    UnsupportedSchema(u32),
}

/// Versioned icon layout envelope as written to the preference store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconLayoutSnapshot {
    pub schema_version: u32,
    pub positions: BTreeMap<ApplicationId, IconPosition>,
}

impl IconLayoutSnapshot {
    pub fn new(positions: BTreeMap<ApplicationId, IconPosition>) -> Self {
        Self {
            schema_version: ICON_LAYOUT_SCHEMA_VERSION,
            positions,
        }
    }
}

// Pre-envelope layout blob: `{"state":{"positions":{..}},"version":0}` with possibly fractional
// coordinates.
#[derive(Debug, Deserialize)]
struct LegacyIconLayout {
    state: LegacyIconLayoutState,
}

#[derive(Debug, Deserialize)]
struct LegacyIconLayoutState {
    #[serde(default)]
    positions: BTreeMap<String, LegacyPoint>,
}

#[derive(Debug, Deserialize)]
struct LegacyPoint {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredIconLayout {
    Current(IconLayoutSnapshot),
    Legacy(LegacyIconLayout),
}

fn migrate_legacy_layout(legacy: LegacyIconLayout) -> BTreeMap<ApplicationId, IconPosition> {
    legacy
        .state
        .positions
        .into_iter()
        .filter_map(|(raw_id, point)| {
            let app_id = ApplicationId::new(raw_id).ok()?;
            if !point.x.is_finite() || !point.y.is_finite() {
                return None;
            }
            Some((
                app_id,
                IconPosition {
                    x: point.x.round() as i32,
                    y: point.y.round() as i32,
                },
            ))
        })
        .collect()
}

/// Parses a stored icon layout blob, accepting the current envelope and the legacy format.
pub fn decode_icon_layout(
    raw: &str,
) -> Result<BTreeMap<ApplicationId, IconPosition>, PersistenceError> {
    let stored = serde_json::from_str::<StoredIconLayout>(raw)
        .map_err(|e| PersistenceError::Deserialize(e.to_string()))?;
    match stored {
        StoredIconLayout::Current(snapshot) => {
            if snapshot.schema_version > ICON_LAYOUT_SCHEMA_VERSION {
                return Err(PersistenceError::UnsupportedSchema(snapshot.schema_version));
            }
            Ok(snapshot.positions)
        }
        StoredIconLayout::Legacy(legacy) => Ok(migrate_legacy_layout(legacy)),
    }
}

/// Loads the stored icon layout. `Ok(None)` means nothing was ever stored.
///
/// # Errors
///
/// Returns an error when the store fails or the blob cannot be decoded.
pub async fn load_icon_layout<S: PrefsStore + ?Sized>(
    store: &S,
) -> Result<Option<BTreeMap<ApplicationId, IconPosition>>, PersistenceError> {
    let raw = store
        .load_pref(ICON_LAYOUT_KEY)
        .await
        .map_err(PersistenceError::Store)?;
    raw.as_deref().map(decode_icon_layout).transpose()
}

/// Loads icon positions for boot hydration, falling back to an empty map on any failure.
pub async fn load_icon_positions<S: PrefsStore + ?Sized>(
    store: &S,
) -> BTreeMap<ApplicationId, IconPosition> {
    match load_icon_layout(store).await {
        Ok(positions) => positions.unwrap_or_default(),
        Err(err) => {
            leptos::logging::warn!("icon layout load failed, using defaults: {err}");
            BTreeMap::new()
        }
    }
}

/// Writes the full icon position map as a versioned envelope.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn persist_icon_positions<S: PrefsStore + ?Sized>(
    store: &S,
    positions: &BTreeMap<ApplicationId, IconPosition>,
) -> Result<(), PersistenceError> {
    let snapshot = IconLayoutSnapshot::new(positions.clone());
    let raw =
        serde_json::to_string(&snapshot).map_err(|e| PersistenceError::Serialize(e.to_string()))?;
    store
        .save_pref(ICON_LAYOUT_KEY, &raw)
        .await
        .map_err(PersistenceError::Store)
}

/// Returns whether the welcome window was already shown in an earlier session.
///
/// Any stored value other than `false`/`0` counts as shown.
///
/// # Errors
///
/// Returns an error when the store read fails.
pub async fn load_welcome_shown<S: PrefsStore + ?Sized>(
    store: &S,
) -> Result<bool, PersistenceError> {
    let raw = store
        .load_pref(WELCOME_SHOWN_KEY)
        .await
        .map_err(PersistenceError::Store)?;
    Ok(raw.is_some_and(|value| {
        let value = value.trim();
        value != "false" && value != "0"
    }))
}

/// Records that the welcome window has been shown.
///
/// # Errors
///
/// Returns an error when the store write fails.
pub async fn mark_welcome_shown<S: PrefsStore + ?Sized>(store: &S) -> Result<(), PersistenceError> {
    store
        .save_pref(WELCOME_SHOWN_KEY, WELCOME_SHOWN_VALUE)
        .await
        .map_err(PersistenceError::Store)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryPrefsStore, PrefsStoreFuture};
    use pretty_assertions::assert_eq;

    use super::*;

    struct FailingPrefsStore;

    impl PrefsStore for FailingPrefsStore {
        fn load_pref<'a>(
            &'a self,
            _key: &'a str,
        ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
            Box::pin(async { Err("storage disabled".to_string()) })
        }

        fn save_pref<'a>(
            &'a self,
            _key: &'a str,
            _raw_json: &'a str,
        ) -> PrefsStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Err("quota exceeded".to_string()) })
        }

        fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
            Box::pin(async { Err("storage disabled".to_string()) })
        }
    }

    fn sample_positions() -> BTreeMap<ApplicationId, IconPosition> {
        BTreeMap::from([
            (ApplicationId::trusted("readme"), IconPosition { x: 16, y: 16 }),
            (ApplicationId::trusted("settings"), IconPosition { x: 112, y: 224 }),
        ])
    }

    #[test]
    fn icon_layout_persists_as_versioned_envelope() {
        let store = MemoryPrefsStore::default();
        block_on(persist_icon_positions(&store, &sample_positions())).expect("persist");

        let raw = store.raw(ICON_LAYOUT_KEY).expect("written");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["schema_version"], ICON_LAYOUT_SCHEMA_VERSION);
        assert_eq!(value["positions"]["settings"]["x"], 112);

        let loaded = block_on(load_icon_positions(&store));
        assert_eq!(loaded, sample_positions());
    }

    #[test]
    fn first_run_store_loads_as_empty() {
        let store = MemoryPrefsStore::default();
        assert_eq!(block_on(load_icon_layout(&store)), Ok(None));
        assert!(block_on(load_icon_positions(&store)).is_empty());
        assert_eq!(block_on(load_welcome_shown(&store)), Ok(false));
    }

    #[test]
    fn malformed_blob_degrades_to_empty_layout() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref(ICON_LAYOUT_KEY, "{not json")).expect("seed");

        assert!(matches!(
            block_on(load_icon_layout(&store)),
            Err(PersistenceError::Deserialize(_))
        ));
        assert!(block_on(load_icon_positions(&store)).is_empty());
    }

    #[test]
    fn newer_schema_is_rejected() {
        let raw = r#"{"schema_version":99,"positions":{}}"#;
        assert_eq!(
            decode_icon_layout(raw),
            Err(PersistenceError::UnsupportedSchema(99))
        );
    }

    #[test]
    fn legacy_blob_is_migrated_and_rounded() {
        let raw = r#"{"state":{"positions":{"readme":{"x":15.6,"y":16.2},"Bad Id":{"x":1,"y":1}}},"version":0}"#;
        let positions = decode_icon_layout(raw).expect("legacy layout");
        assert_eq!(
            positions,
            BTreeMap::from([(ApplicationId::trusted("readme"), IconPosition { x: 16, y: 16 })])
        );
    }

    #[test]
    fn failing_store_surfaces_errors_to_callers_but_not_to_boot() {
        let store = FailingPrefsStore;
        assert_eq!(
            block_on(persist_icon_positions(&store, &sample_positions())),
            Err(PersistenceError::Store("quota exceeded".to_string()))
        );
        assert!(matches!(
            block_on(load_icon_layout(&store)),
            Err(PersistenceError::Store(_))
        ));
        assert!(block_on(load_icon_positions(&store)).is_empty());
        assert!(block_on(mark_welcome_shown(&store)).is_err());
    }

    #[test]
    fn welcome_flag_accepts_legacy_marker() {
        let store = MemoryPrefsStore::default();
        block_on(mark_welcome_shown(&store)).expect("mark");
        assert_eq!(store.raw(WELCOME_SHOWN_KEY).as_deref(), Some("1"));
        assert_eq!(block_on(load_welcome_shown(&store)), Ok(true));

        block_on(store.save_pref(WELCOME_SHOWN_KEY, "false")).expect("seed");
        assert_eq!(block_on(load_welcome_shown(&store)), Ok(false));
    }
}
