//! Pointer capture state machines for window drag/resize and desktop icon gestures.
//!
//! Each capture is owned by exactly one pointer id. Move/up/cancel events from any other pointer
//! are ignored, so a second finger on a different element never steers the first gesture. Window
//! and icon captures are tracked independently of each other.

use std::collections::BTreeMap;

use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{clamp, snap_to_grid, Point, PointerPosition},
    icon_layout::{IconLayoutBounds, IconLayoutStore, ICON_SNAP_PX},
    model::{IconPosition, WindowId, WindowPosition, WindowSize},
    window_manager::WindowStore,
};

/// Minimum width enforced by interactive resize.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum height enforced by interactive resize.
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Icon gestures moving further than this on either axis count as drags, not clicks.
pub const CLICK_DRAG_THRESHOLD_PX: i32 = 3;

/// DOM `PointerEvent.pointerId`.
pub type PointerId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    /// Compass token (`n`, `se`, ...).
    pub const fn token(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    pub const fn has_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub const fn has_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub const fn has_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub const fn has_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub const fn css_cursor(self) -> &'static str {
        match self {
            Self::North => "n-resize",
            Self::South => "s-resize",
            Self::East => "e-resize",
            Self::West => "w-resize",
            Self::NorthEast => "ne-resize",
            Self::NorthWest => "nw-resize",
            Self::SouthEast => "se-resize",
            Self::SouthWest => "sw-resize",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::North => "edge-n",
            Self::South => "edge-s",
            Self::East => "edge-e",
            Self::West => "edge-w",
            Self::NorthEast => "edge-ne",
            Self::NorthWest => "edge-nw",
            Self::SouthEast => "edge-se",
            Self::SouthWest => "edge-sw",
        }
    }
}

/// Computes the geometry for a resize gesture that has moved `(dx, dy)` from its start.
///
/// East/south edges grow with the pointer down to the minimum. West/north edges move the left/top
/// edge with the pointer; once the minimum is hit the size pins to it and the opposite edge stays
/// where it started.
pub fn resize_geometry(
    start_position: WindowPosition,
    start_size: WindowSize,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
) -> (WindowPosition, WindowSize) {
    let mut position = start_position;
    let mut size = start_size;

    if edge.has_east() {
        size.width = (start_size.width + dx).max(MIN_WINDOW_WIDTH);
    }
    if edge.has_south() {
        size.height = (start_size.height + dy).max(MIN_WINDOW_HEIGHT);
    }
    if edge.has_west() {
        if start_size.width - dx >= MIN_WINDOW_WIDTH {
            size.width = start_size.width - dx;
            position.x = start_position.x + dx;
        } else {
            size.width = MIN_WINDOW_WIDTH;
            position.x = start_position.x + (start_size.width - MIN_WINDOW_WIDTH);
        }
    }
    if edge.has_north() {
        if start_size.height - dy >= MIN_WINDOW_HEIGHT {
            size.height = start_size.height - dy;
            position.y = start_position.y + dy;
        } else {
            size.height = MIN_WINDOW_HEIGHT;
            position.y = start_position.y + (start_size.height - MIN_WINDOW_HEIGHT);
        }
    }

    (position, size)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_id: PointerId,
    pub pointer_start: PointerPosition,
    pub position_start: WindowPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_id: PointerId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub position_start: WindowPosition,
    pub size_start: WindowSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCapture {
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl WindowCapture {
    pub fn window_id(&self) -> &WindowId {
        match self {
            Self::Dragging(session) => &session.window_id,
            Self::Resizing(session) => &session.window_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconPress {
    pub app_id: ApplicationId,
    pub pointer_id: PointerId,
    pub pointer_start: PointerPosition,
    pub position_start: IconPosition,
    /// Desktop container the icon is clamped into while dragged.
    pub container: IconLayoutBounds,
    pub moved: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum IconCapture {
    #[default]
    Idle,
    Pressed(IconPress),
}

/// Live pointer captures of the desktop shell.
///
/// Window captures are keyed by the pointer that owns them, so two fingers can drag or resize two
/// different windows at once. A window holds at most one capture.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub windows: BTreeMap<PointerId, WindowCapture>,
    pub icon: IconCapture,
}

impl InteractionState {
    pub fn has_capture(&self) -> bool {
        !self.windows.is_empty() || self.icon != IconCapture::Idle
    }

    pub fn resize_overlay_active(&self) -> bool {
        self.resize_overlay_cursor().is_some()
    }

    /// Cursor for the full-viewport overlay shown while a resize is in progress.
    pub fn resize_overlay_cursor(&self) -> Option<&'static str> {
        self.windows.values().find_map(|capture| match capture {
            WindowCapture::Resizing(session) => Some(session.edge.css_cursor()),
            WindowCapture::Dragging(_) => None,
        })
    }

    /// Drops every window capture.
    pub fn release_windows(&mut self) {
        self.windows.clear();
    }

    /// Whether `pointer_id` or `window_id` already owns a window capture.
    fn window_capture_blocked(&self, window_id: &WindowId, pointer_id: PointerId) -> bool {
        self.windows.contains_key(&pointer_id)
            || self
                .windows
                .values()
                .any(|capture| capture.window_id() == window_id)
    }

    pub fn dragging_icon(&self) -> Option<&ApplicationId> {
        match &self.icon {
            IconCapture::Pressed(press) if press.moved => Some(&press.app_id),
            _ => None,
        }
    }

    /// Title-bar press: focuses the window and, unless it is maximized, starts a drag.
    ///
    /// Returns `true` when a drag capture was installed.
    pub fn begin_window_drag(
        &mut self,
        windows: &mut WindowStore,
        window_id: &WindowId,
        pointer_id: PointerId,
        pointer: PointerPosition,
    ) -> bool {
        windows.focus_window(window_id);
        if self.window_capture_blocked(window_id, pointer_id) {
            return false;
        }
        let Some(window) = windows.window(window_id) else {
            return false;
        };
        if window.is_maximized {
            return false;
        }
        self.windows.insert(
            pointer_id,
            WindowCapture::Dragging(DragSession {
                window_id: window_id.clone(),
                pointer_id,
                pointer_start: pointer,
                position_start: window.position,
            }),
        );
        true
    }

    /// Resize-handle press. Maximized windows cannot be resized.
    pub fn begin_window_resize(
        &mut self,
        windows: &WindowStore,
        window_id: &WindowId,
        edge: ResizeEdge,
        pointer_id: PointerId,
        pointer: PointerPosition,
    ) -> bool {
        if self.window_capture_blocked(window_id, pointer_id) {
            return false;
        }
        let Some(window) = windows.window(window_id) else {
            return false;
        };
        if window.is_maximized {
            return false;
        }
        self.windows.insert(
            pointer_id,
            WindowCapture::Resizing(ResizeSession {
                window_id: window_id.clone(),
                pointer_id,
                edge,
                pointer_start: pointer,
                position_start: window.position,
                size_start: window.size,
            }),
        );
        true
    }

    /// Icon press. `position_start` is where the icon currently renders.
    pub fn begin_icon_press(
        &mut self,
        app_id: &ApplicationId,
        pointer_id: PointerId,
        pointer: PointerPosition,
        position_start: IconPosition,
        container: IconLayoutBounds,
    ) -> bool {
        if self.icon != IconCapture::Idle {
            return false;
        }
        self.icon = IconCapture::Pressed(IconPress {
            app_id: app_id.clone(),
            pointer_id,
            pointer_start: pointer,
            position_start,
            container,
            moved: false,
        });
        true
    }

    /// Routes a pointer move to whichever capture that pointer owns.
    ///
    /// Returns `true` when the icon layout changed and should be persisted.
    pub fn pointer_move(
        &mut self,
        windows: &mut WindowStore,
        icons: &mut IconLayoutStore,
        pointer_id: PointerId,
        pointer: PointerPosition,
    ) -> bool {
        self.move_window_capture(windows, pointer_id, pointer);
        self.move_icon_capture(icons, pointer_id, pointer)
    }

    /// Releases captures owned by `pointer_id`.
    ///
    /// Returns the app to activate when the released icon gesture never became a drag.
    pub fn pointer_up(&mut self, pointer_id: PointerId) -> Option<ApplicationId> {
        self.windows.remove(&pointer_id);
        match &self.icon {
            IconCapture::Pressed(press) if press.pointer_id == pointer_id => {
                let activate = (!press.moved).then(|| press.app_id.clone());
                self.icon = IconCapture::Idle;
                activate
            }
            _ => None,
        }
    }

    /// Releases captures owned by `pointer_id` without activating anything.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId) {
        self.windows.remove(&pointer_id);
        if matches!(&self.icon, IconCapture::Pressed(press) if press.pointer_id == pointer_id) {
            self.icon = IconCapture::Idle;
        }
    }

    fn move_window_capture(
        &mut self,
        windows: &mut WindowStore,
        pointer_id: PointerId,
        pointer: PointerPosition,
    ) {
        let Some(capture) = self.windows.get(&pointer_id) else {
            return;
        };
        match capture {
            WindowCapture::Dragging(session) => {
                let maximized = windows
                    .window(&session.window_id)
                    .map(|w| w.is_maximized)
                    .unwrap_or(true);
                if maximized {
                    return;
                }
                let position = WindowPosition {
                    x: session.position_start.x + pointer.x - session.pointer_start.x,
                    y: session.position_start.y + pointer.y - session.pointer_start.y,
                };
                windows.update_window_position(&session.window_id, position);
            }
            WindowCapture::Resizing(session) => {
                let maximized = windows
                    .window(&session.window_id)
                    .map(|w| w.is_maximized)
                    .unwrap_or(true);
                if maximized {
                    return;
                }
                let (position, size) = resize_geometry(
                    session.position_start,
                    session.size_start,
                    session.edge,
                    pointer.x - session.pointer_start.x,
                    pointer.y - session.pointer_start.y,
                );
                windows.update_window_size(&session.window_id, size);
                windows.update_window_position(&session.window_id, position);
            }
        }
    }

    fn move_icon_capture(
        &mut self,
        icons: &mut IconLayoutStore,
        pointer_id: PointerId,
        pointer: PointerPosition,
    ) -> bool {
        let IconCapture::Pressed(press) = &mut self.icon else {
            return false;
        };
        if press.pointer_id != pointer_id {
            return false;
        }
        let dx = pointer.x - press.pointer_start.x;
        let dy = pointer.y - press.pointer_start.y;
        if !press.moved && (dx.abs() > CLICK_DRAG_THRESHOLD_PX || dy.abs() > CLICK_DRAG_THRESHOLD_PX)
        {
            press.moved = true;
        }
        if !press.moved {
            return false;
        }

        let (max_x, max_y) = press.container.max_icon_origin();
        let raw = Point::new(
            f64::from(press.position_start.x + dx),
            f64::from(press.position_start.y + dy),
        );
        let snapped = Point::new(
            clamp(snap_to_grid(raw.x, ICON_SNAP_PX), 0.0, max_x),
            clamp(snap_to_grid(raw.y, ICON_SNAP_PX), 0.0, max_y),
        );
        icons.set_icon_position(&press.app_id, snapped);
        true
    }
}
