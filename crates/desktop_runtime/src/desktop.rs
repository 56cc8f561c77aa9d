//! Desktop composition: which icons are shown and where they render.
//!
//! Nothing here mutates the icon store. Default positions are recomputed from the live container
//! metrics on every measurement, so the fallback layout follows the viewport while persisted
//! positions stay put.

use std::collections::BTreeMap;

use desktop_app_contract::{AppDescriptor, ApplicationId};

use crate::{
    geometry::Size,
    icon_layout::{grid_layout, IconLayoutBounds, GRID_START_PX},
    model::IconPosition,
};

/// Height of the shell top bar, subtracted from the window height when the desktop container has
/// not been measured yet.
pub const TOP_BAR_HEIGHT_PX: f64 = 32.0;
/// Container height used when neither a measurement nor the window height is available.
pub const FALLBACK_DESKTOP_HEIGHT_PX: f64 = 600.0;
/// Container width used when neither a measurement nor the window width is available.
pub const FALLBACK_DESKTOP_WIDTH_PX: f64 = 1024.0;

/// Measured size of the desktop icon container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DesktopMetrics {
    pub width: f64,
    pub height: f64,
}

impl DesktopMetrics {
    /// Builds metrics from a container measurement.
    ///
    /// Each unmeasured axis (non-positive extent) falls back to the browser window's inner size,
    /// minus the top bar for the height, then to [`FALLBACK_DESKTOP_WIDTH_PX`] x
    /// [`FALLBACK_DESKTOP_HEIGHT_PX`].
    pub fn from_measurement(measured: Size, inner_window: Option<Size>) -> Self {
        let width = if measured.width > 0.0 {
            measured.width
        } else {
            inner_window
                .map(|window| window.width)
                .unwrap_or(FALLBACK_DESKTOP_WIDTH_PX)
        };
        let height = if measured.height > 0.0 {
            measured.height
        } else {
            inner_window
                .map(|window| window.height - TOP_BAR_HEIGHT_PX)
                .unwrap_or(FALLBACK_DESKTOP_HEIGHT_PX)
        };
        Self { width, height }
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn layout_bounds(self) -> IconLayoutBounds {
        IconLayoutBounds::new(self.width, self.height)
    }
}

/// Registry entries that get a desktop icon, in registry order.
pub fn visible_desktop_apps(registry: &[AppDescriptor]) -> Vec<&AppDescriptor> {
    registry.iter().filter(|app| app.show_on_desktop).collect()
}

/// Grid positions for `app_ids` in the container described by `metrics`.
pub fn default_icon_positions<'a, I>(
    app_ids: I,
    metrics: DesktopMetrics,
) -> BTreeMap<ApplicationId, IconPosition>
where
    I: IntoIterator<Item = &'a ApplicationId>,
{
    grid_layout(app_ids, metrics.layout_bounds())
        .into_iter()
        .collect()
}

/// Where an icon renders: its stored position, else its computed default, else the grid origin.
pub fn resolve_icon_position(
    app_id: &ApplicationId,
    stored: &BTreeMap<ApplicationId, IconPosition>,
    defaults: &BTreeMap<ApplicationId, IconPosition>,
) -> IconPosition {
    stored
        .get(app_id)
        .or_else(|| defaults.get(app_id))
        .copied()
        .unwrap_or(IconPosition {
            x: GRID_START_PX as i32,
            y: GRID_START_PX as i32,
        })
}

/// `KeyboardEvent.key` values that activate a focused desktop icon.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppModule, AppWindowDefaults};
    use leptos::{IntoView, View};
    use pretty_assertions::assert_eq;

    use super::*;

    fn blank(_: desktop_app_contract::AppMountContext) -> View {
        ().into_view()
    }

    fn descriptor(raw: &'static str, show_on_desktop: bool) -> AppDescriptor {
        AppDescriptor {
            app_id: ApplicationId::trusted(raw),
            title: raw,
            default_size: AppWindowDefaults {
                width: 900,
                height: 600,
            },
            resizable: true,
            show_on_desktop,
            module: AppModule::new(blank),
        }
    }

    #[test]
    fn unmeasured_container_falls_back_to_window_height() {
        let window = Some(Size::new(1280.0, 800.0));
        let metrics = DesktopMetrics::from_measurement(Size::new(1200.0, 0.0), window);
        assert_eq!(metrics.height, 768.0);

        let metrics = DesktopMetrics::from_measurement(Size::new(1200.0, 0.0), None);
        assert_eq!(metrics.height, FALLBACK_DESKTOP_HEIGHT_PX);

        let metrics = DesktopMetrics::from_measurement(Size::new(1200.0, 640.0), window);
        assert_eq!(metrics.height, 640.0);
    }

    #[test]
    fn unmeasured_container_keeps_default_icons_off_the_left_edge() {
        let ids = vec![ApplicationId::trusted("a"), ApplicationId::trusted("b")];

        let metrics = DesktopMetrics::from_measurement(Size::default(), Some(Size::new(1280.0, 800.0)));
        assert_eq!(metrics, DesktopMetrics { width: 1280.0, height: 768.0 });
        let defaults = default_icon_positions(&ids, metrics);
        assert_eq!(defaults[&ids[0]], IconPosition { x: 16, y: 16 });
        assert_eq!(defaults[&ids[1]], IconPosition { x: 16, y: 120 });

        let metrics = DesktopMetrics::from_measurement(Size::default(), None);
        assert_eq!(metrics.width, FALLBACK_DESKTOP_WIDTH_PX);
        assert_eq!(
            default_icon_positions(&ids, metrics)[&ids[0]],
            IconPosition { x: 16, y: 16 }
        );
    }

    #[test]
    fn hidden_apps_get_no_icon() {
        let registry = vec![
            descriptor("readme", true),
            descriptor("browser", false),
            descriptor("settings", true),
        ];
        let visible: Vec<&str> = visible_desktop_apps(&registry)
            .into_iter()
            .map(|app| app.app_id.as_str())
            .collect();
        assert_eq!(visible, vec!["readme", "settings"]);
    }

    #[test]
    fn defaults_follow_container_height() {
        let ids = vec![
            ApplicationId::trusted("a"),
            ApplicationId::trusted("b"),
            ApplicationId::trusted("c"),
        ];
        let tall = default_icon_positions(&ids, DesktopMetrics { width: 800.0, height: 800.0 });
        assert_eq!(tall[&ids[2]], IconPosition { x: 16, y: 224 });

        let short = default_icon_positions(&ids, DesktopMetrics { width: 800.0, height: 240.0 });
        assert_eq!(short[&ids[1]], IconPosition { x: 16, y: 120 });
        assert_eq!(short[&ids[2]], IconPosition { x: 112, y: 16 });
    }

    #[test]
    fn stored_positions_win_over_defaults_and_fallback() {
        let readme = ApplicationId::trusted("readme");
        let settings = ApplicationId::trusted("settings");
        let orphan = ApplicationId::trusted("orphan");

        let stored = BTreeMap::from([(readme.clone(), IconPosition { x: 300, y: 200 })]);
        let defaults = BTreeMap::from([
            (readme.clone(), IconPosition { x: 16, y: 16 }),
            (settings.clone(), IconPosition { x: 16, y: 120 }),
        ]);

        assert_eq!(
            resolve_icon_position(&readme, &stored, &defaults),
            IconPosition { x: 300, y: 200 }
        );
        assert_eq!(
            resolve_icon_position(&settings, &stored, &defaults),
            IconPosition { x: 16, y: 120 }
        );
        assert_eq!(
            resolve_icon_position(&orphan, &stored, &defaults),
            IconPosition { x: 16, y: 16 }
        );
    }

    #[test]
    fn enter_and_space_activate() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Tab"));
        assert!(!is_activation_key("a"));
    }
}
