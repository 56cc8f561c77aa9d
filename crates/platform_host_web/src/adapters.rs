use crate::WebPrefsStore;

/// Returns the preference store used by the browser desktop shell.
pub fn prefs_store() -> WebPrefsStore {
    WebPrefsStore
}
