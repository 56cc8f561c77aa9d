use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Runtime id of an open window (`"{app_id}-{monotonic_ms}"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-left corner of a window, relative to the desktop viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

/// Geometry a window is actually painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// One running occurrence of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInstance {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub position: WindowPosition,
    pub size: WindowSize,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_index: u32,
}

impl WindowInstance {
    /// Returns the geometry to paint with.
    ///
    /// A maximized window fills `viewport` while its stored `position`/`size` stay untouched, so
    /// un-maximizing restores them.
    pub fn rendered_rect(&self, viewport: Size) -> WindowRect {
        if self.is_maximized {
            WindowRect {
                x: 0,
                y: 0,
                w: viewport.width.max(0.0) as i32,
                h: viewport.height.max(0.0) as i32,
            }
        } else {
            WindowRect {
                x: self.position.x,
                y: self.position.y,
                w: self.size.width,
                h: self.size.height,
            }
        }
    }
}

/// Persisted integer pixel position of a desktop icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconPosition {
    pub x: i32,
    pub y: i32,
}
