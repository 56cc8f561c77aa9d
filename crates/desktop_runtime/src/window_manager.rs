//! Window store: open windows, stacking order, and focus.
//!
//! `windows` keeps creation order; paint order comes from `z_index`. The z counter only grows
//! (until [`WindowStore::close_all_windows`] resets it), so every open or focus produces a value
//! strictly above every other window's. Operations on unknown ids are silent no-ops, because UI
//! handlers may race with a close.

use desktop_app_contract::ApplicationId;
use platform_host::next_monotonic_timestamp_ms;
use serde::{Deserialize, Serialize};

use crate::{
    geometry::Size,
    model::{WindowId, WindowInstance, WindowPosition, WindowSize},
};

/// Initial value of the z-order counter.
pub const Z_INDEX_SEED: u32 = 100;
pub const DEFAULT_WINDOW_WIDTH: i32 = 900;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 600;
/// Offset of the first cascaded window on both axes.
pub const CASCADE_ORIGIN: i32 = 50;
/// Extra offset per already-open window.
pub const CASCADE_STEP: i32 = 30;
/// Viewports at most this wide open windows maximized.
pub const SMALL_SCREEN_MAX_WIDTH: f64 = 767.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStore {
    windows: Vec<WindowInstance>,
    active_window_id: Option<WindowId>,
    z_index_counter: u32,
}

impl Default for WindowStore {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            active_window_id: None,
            z_index_counter: Z_INDEX_SEED,
        }
    }
}

impl WindowStore {
    /// Open windows in creation order.
    pub fn windows(&self) -> &[WindowInstance] {
        &self.windows
    }

    pub fn active_window_id(&self) -> Option<&WindowId> {
        self.active_window_id.as_ref()
    }

    pub fn z_index_counter(&self) -> u32 {
        self.z_index_counter
    }

    pub fn window(&self, id: &WindowId) -> Option<&WindowInstance> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub fn window_for_app(&self, app_id: &ApplicationId) -> Option<&WindowInstance> {
        self.windows.iter().find(|w| &w.app_id == app_id)
    }

    /// Returns the highest-stacked window that is not minimized.
    pub fn topmost_visible(&self) -> Option<&WindowInstance> {
        self.windows
            .iter()
            .filter(|w| !w.is_minimized)
            .max_by_key(|w| w.z_index)
    }

    /// Opens `app_id`, or raises and restores its existing window.
    ///
    /// New windows cascade from [`CASCADE_ORIGIN`] by [`CASCADE_STEP`] per open window and are
    /// always [`DEFAULT_WINDOW_WIDTH`] x [`DEFAULT_WINDOW_HEIGHT`]; on a narrow `viewport` they open
    /// maximized at the origin instead.
    pub fn open_window(
        &mut self,
        app_id: &ApplicationId,
        title: impl Into<String>,
        viewport: Size,
    ) -> WindowId {
        if let Some(existing) = self.windows.iter_mut().find(|w| &w.app_id == app_id) {
            self.z_index_counter += 1;
            existing.z_index = self.z_index_counter;
            existing.is_minimized = false;
            let id = existing.id.clone();
            self.active_window_id = Some(id.clone());
            return id;
        }

        let id = WindowId(format!("{app_id}-{}", next_monotonic_timestamp_ms()));
        let small_screen = viewport.width <= SMALL_SCREEN_MAX_WIDTH;
        let position = if small_screen {
            WindowPosition { x: 0, y: 0 }
        } else {
            let offset = CASCADE_ORIGIN + self.windows.len() as i32 * CASCADE_STEP;
            WindowPosition {
                x: offset,
                y: offset,
            }
        };

        self.z_index_counter += 1;
        self.windows.push(WindowInstance {
            id: id.clone(),
            app_id: app_id.clone(),
            title: title.into(),
            position,
            size: WindowSize {
                width: DEFAULT_WINDOW_WIDTH,
                height: DEFAULT_WINDOW_HEIGHT,
            },
            is_minimized: false,
            is_maximized: small_screen,
            z_index: self.z_index_counter,
        });
        self.active_window_id = Some(id.clone());
        id
    }

    pub fn close_window(&mut self, id: &WindowId) {
        self.windows.retain(|w| &w.id != id);
        if self.active_window_id.as_ref() == Some(id) {
            self.active_window_id = None;
        }
    }

    /// Minimizes `id` and clears the active window, whichever window that was.
    pub fn minimize_window(&mut self, id: &WindowId) {
        if let Some(window) = self.find_mut(id) {
            window.is_minimized = true;
        }
        self.active_window_id = None;
    }

    /// Closes every window and resets the z-order counter to [`Z_INDEX_SEED`].
    pub fn close_all_windows(&mut self) {
        *self = Self::default();
    }

    pub fn toggle_maximize(&mut self, id: &WindowId) {
        if let Some(window) = self.find_mut(id) {
            window.is_maximized = !window.is_maximized;
        }
    }

    /// Raises `id` above every other window, restores it if minimized and makes it active.
    ///
    /// Focusing the already-active window changes nothing.
    pub fn focus_window(&mut self, id: &WindowId) {
        if self.active_window_id.as_ref() == Some(id) {
            return;
        }
        let next = self.z_index_counter + 1;
        let Some(window) = self.find_mut(id) else {
            return;
        };
        window.z_index = next;
        window.is_minimized = false;
        self.z_index_counter = next;
        self.active_window_id = Some(id.clone());
    }

    pub fn update_window_position(&mut self, id: &WindowId, position: WindowPosition) {
        if let Some(window) = self.find_mut(id) {
            window.position = position;
        }
    }

    /// Overwrites the stored size. No minimum is enforced here.
    pub fn update_window_size(&mut self, id: &WindowId, size: WindowSize) {
        if let Some(window) = self.find_mut(id) {
            window.size = size;
        }
    }

    fn find_mut(&mut self, id: &WindowId) -> Option<&mut WindowInstance> {
        self.windows.iter_mut().find(|w| &w.id == id)
    }
}
