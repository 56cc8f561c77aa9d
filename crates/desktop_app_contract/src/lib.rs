//! Shared contract types between the desktop window manager runtime and hosted apps.
//!
//! The window manager only ever needs an app's id and metadata (title, default window size,
//! resizability, desktop visibility). What an app renders is opaque to it and reached through the
//! [`AppModule`] mount function resolved by id.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{Deserialize, Serialize};

/// Stable identifier for an app package/module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is a lowercase slug (`a-z`, `0-9`, `-`).
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected a lowercase slug"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time/runtime trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Window size an app declares as its preferred default.
pub struct AppWindowDefaults {
    /// Preferred width in CSS pixels.
    pub width: i32,
    /// Preferred height in CSS pixels.
    pub height: i32,
}

#[derive(Clone)]
/// Context handed to an app when the runtime mounts it into a window.
pub struct AppMountContext {
    /// App id from the runtime registry.
    pub app_id: ApplicationId,
    /// Runtime window id hosting the app.
    pub window_id: String,
    /// Window title chosen by whoever opened the window.
    pub title: String,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mountable app module referenced by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[derive(Debug, Clone)]
/// Registry entry: the capability bundle the desktop resolves by [`ApplicationId`].
pub struct AppDescriptor {
    /// Canonical app id.
    pub app_id: ApplicationId,
    /// Default display title (icon label and window title).
    pub title: &'static str,
    /// Declared default window size.
    pub default_size: AppWindowDefaults,
    /// Whether the window exposes resize handles.
    pub resizable: bool,
    /// Whether the app gets a desktop icon.
    pub show_on_desktop: bool,
    /// Render entry point.
    pub module: AppModule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_id_requires_lowercase_slug() {
        assert!(ApplicationId::new("readme").is_ok());
        assert!(ApplicationId::new("mini-games2").is_ok());
        assert!(ApplicationId::new("").is_err());
        assert!(ApplicationId::new("Readme").is_err());
        assert!(ApplicationId::new("2048").is_err());
        assert!(ApplicationId::new("browser-").is_err());
        assert!(ApplicationId::new("system.settings").is_err());
    }

    #[test]
    fn application_id_serializes_as_plain_string() {
        let id = ApplicationId::trusted("portfolio");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"portfolio\"");
        assert_eq!(id.to_string(), "portfolio");
    }
}
