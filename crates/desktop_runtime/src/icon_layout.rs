//! Desktop icon layout: free placement, full reset, and the column-major "clean up" grid.
//!
//! The store itself never touches storage. Every mutating reducer path emits
//! [`crate::reducer::RuntimeEffect::PersistIconLayout`] and the host writes the map through.

use std::collections::BTreeMap;

use desktop_app_contract::ApplicationId;
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{clamp, snap_to_grid, Point},
    model::IconPosition,
};

pub const GRID_START_PX: f64 = 16.0;
pub const GRID_COLUMN_WIDTH_PX: f64 = 92.0;
pub const GRID_ROW_HEIGHT_PX: f64 = 104.0;
pub const ICON_WIDTH_PX: f64 = 84.0;
pub const ICON_HEIGHT_PX: f64 = 96.0;
pub const ICON_SNAP_PX: f64 = 8.0;

/// Area the grid is laid out in. `top_offset` is reserved space above the icons (a top bar).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IconLayoutBounds {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub top_offset: f64,
}

impl IconLayoutBounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top_offset: 0.0,
        }
    }

    pub fn usable_height(self) -> f64 {
        (self.height - self.top_offset).max(0.0)
    }

    /// Largest top-left coordinate that keeps an icon's footprint inside the bounds.
    pub fn max_icon_origin(self) -> (f64, f64) {
        (
            (self.width.max(0.0) - ICON_WIDTH_PX).max(0.0),
            (self.usable_height() - ICON_HEIGHT_PX).max(0.0),
        )
    }

    /// Number of icons stacked per column before wrapping, never below one.
    pub fn rows_per_column(self) -> usize {
        let rows = ((self.usable_height() - GRID_START_PX) / GRID_ROW_HEIGHT_PX).floor();
        if rows >= 1.0 {
            rows as usize
        } else {
            1
        }
    }
}

/// Assigns each id a grid cell, filling columns top to bottom, then left to right.
///
/// Cells are snapped to [`ICON_SNAP_PX`] and clamped so icons stay inside `bounds`. Degenerate
/// bounds collapse every cell to the origin.
pub fn grid_layout<'a, I>(app_ids: I, bounds: IconLayoutBounds) -> Vec<(ApplicationId, IconPosition)>
where
    I: IntoIterator<Item = &'a ApplicationId>,
{
    let per_col = bounds.rows_per_column();
    let (max_x, max_y) = bounds.max_icon_origin();

    app_ids
        .into_iter()
        .enumerate()
        .map(|(index, app_id)| {
            let col = (index / per_col) as f64;
            let row = (index % per_col) as f64;
            let x = GRID_START_PX + col * GRID_COLUMN_WIDTH_PX;
            let y = GRID_START_PX + row * GRID_ROW_HEIGHT_PX;
            let position = IconPosition {
                x: clamp(snap_to_grid(x, ICON_SNAP_PX), 0.0, max_x).round() as i32,
                y: clamp(snap_to_grid(y, ICON_SNAP_PX), 0.0, max_y).round() as i32,
            };
            (app_id.clone(), position)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IconLayoutStore {
    positions: BTreeMap<ApplicationId, IconPosition>,
}

impl IconLayoutStore {
    pub fn positions(&self) -> &BTreeMap<ApplicationId, IconPosition> {
        &self.positions
    }

    pub fn position(&self, app_id: &ApplicationId) -> Option<IconPosition> {
        self.positions.get(app_id).copied()
    }

    /// Stores `position` rounded to whole pixels.
    pub fn set_icon_position(&mut self, app_id: &ApplicationId, position: Point) {
        self.positions.insert(
            app_id.clone(),
            IconPosition {
                x: position.x.round() as i32,
                y: position.y.round() as i32,
            },
        );
    }

    pub fn reset_positions(&mut self) {
        self.positions.clear();
    }

    /// Re-lays out `app_ids_in_order` on the grid, overwriting their stored positions.
    ///
    /// Ids not in the list keep whatever position they had.
    pub fn clean_up_icons(&mut self, app_ids_in_order: &[ApplicationId], bounds: IconLayoutBounds) {
        self.positions
            .extend(grid_layout(app_ids_in_order, bounds));
    }

    /// Merges positions loaded from storage. Positions already in memory win.
    ///
    /// Returns `true` when an in-memory position was kept, i.e. the merged map differs from what
    /// storage holds.
    pub fn hydrate_positions(&mut self, stored: BTreeMap<ApplicationId, IconPosition>) -> bool {
        let kept_local = !self.positions.is_empty();
        for (app_id, position) in stored {
            self.positions.entry(app_id).or_insert(position);
        }
        kept_local
    }
}
