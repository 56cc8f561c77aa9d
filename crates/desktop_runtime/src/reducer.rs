//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.
//!
//! Every UI event is expressed as a [`DesktopAction`]. [`reduce_desktop`] applies it to the window
//! and icon stores plus the pointer capture state, and returns the side effects the host must run.
//! Persistence is never performed here; icon-store mutations emit
//! [`RuntimeEffect::PersistIconLayout`] instead.

use std::collections::BTreeMap;

use desktop_app_contract::ApplicationId;

use crate::{
    apps,
    geometry::{Point, PointerPosition, Size},
    icon_layout::{IconLayoutBounds, IconLayoutStore},
    interaction::{InteractionState, PointerId, ResizeEdge},
    model::{IconPosition, WindowId, WindowPosition, WindowSize},
    window_manager::WindowStore,
};

/// Authoritative desktop state: open windows and persisted icon positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesktopState {
    pub windows: WindowStore,
    pub icons: IconLayoutStore,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`].
pub enum DesktopAction {
    /// Open `app_id`, or raise its existing window.
    OpenWindow {
        app_id: ApplicationId,
        title: String,
        /// Current desktop viewport, used for cascade vs. small-screen placement.
        viewport: Size,
    },
    CloseWindow {
        window_id: WindowId,
    },
    CloseAllWindows,
    MinimizeWindow {
        window_id: WindowId,
    },
    /// Minimize every open window.
    ShowDesktop,
    ToggleMaximize {
        window_id: WindowId,
    },
    FocusWindow {
        window_id: WindowId,
    },
    UpdateWindowPosition {
        window_id: WindowId,
        position: WindowPosition,
    },
    UpdateWindowSize {
        window_id: WindowId,
        size: WindowSize,
    },
    /// Title-bar press.
    BeginMove {
        window_id: WindowId,
        pointer_id: PointerId,
        pointer: PointerPosition,
    },
    /// Resize-handle press.
    BeginResize {
        window_id: WindowId,
        edge: ResizeEdge,
        pointer_id: PointerId,
        pointer: PointerPosition,
    },
    /// Desktop icon press.
    BeginIconPress {
        app_id: ApplicationId,
        pointer_id: PointerId,
        pointer: PointerPosition,
        /// Position the icon currently renders at.
        origin: IconPosition,
        /// Desktop container the icon is clamped into while dragged.
        container: IconLayoutBounds,
    },
    PointerMove {
        pointer_id: PointerId,
        pointer: PointerPosition,
    },
    PointerUp {
        pointer_id: PointerId,
    },
    PointerCancel {
        pointer_id: PointerId,
    },
    SetIconPosition {
        app_id: ApplicationId,
        position: Point,
    },
    ResetIconPositions,
    CleanUpIcons {
        app_ids: Vec<ApplicationId>,
        bounds: IconLayoutBounds,
    },
    /// Merge the map loaded from storage under any positions already set this session.
    HydrateIconPositions {
        positions: BTreeMap<ApplicationId, IconPosition>,
    },
    /// Icon click or keyboard activation.
    ActivateApp {
        app_id: ApplicationId,
    },
    /// Open the first-run welcome window.
    ShowWelcome {
        viewport: Size,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Write the current icon positions to the preference store.
    PersistIconLayout,
    /// Open or focus an app; the host resolves its title and the live viewport.
    ActivateApp(ApplicationId),
    /// Record that the first-run welcome window was shown.
    MarkWelcomeShown,
}

/// Applies a [`DesktopAction`] and collects the resulting side effects.
///
/// Actions referencing unknown window or app ids leave the state unchanged.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow {
            app_id,
            title,
            viewport,
        } => {
            state.windows.open_window(&app_id, title, viewport);
        }
        DesktopAction::CloseWindow { window_id } => state.windows.close_window(&window_id),
        DesktopAction::CloseAllWindows => {
            state.windows.close_all_windows();
            interaction.release_windows();
        }
        DesktopAction::MinimizeWindow { window_id } => state.windows.minimize_window(&window_id),
        DesktopAction::ShowDesktop => {
            let ids: Vec<WindowId> = state.windows.windows().iter().map(|w| w.id.clone()).collect();
            for id in &ids {
                state.windows.minimize_window(id);
            }
        }
        DesktopAction::ToggleMaximize { window_id } => state.windows.toggle_maximize(&window_id),
        DesktopAction::FocusWindow { window_id } => state.windows.focus_window(&window_id),
        DesktopAction::UpdateWindowPosition {
            window_id,
            position,
        } => state.windows.update_window_position(&window_id, position),
        DesktopAction::UpdateWindowSize { window_id, size } => {
            state.windows.update_window_size(&window_id, size)
        }
        DesktopAction::BeginMove {
            window_id,
            pointer_id,
            pointer,
        } => {
            interaction.begin_window_drag(&mut state.windows, &window_id, pointer_id, pointer);
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer_id,
            pointer,
        } => {
            interaction.begin_window_resize(&state.windows, &window_id, edge, pointer_id, pointer);
        }
        DesktopAction::BeginIconPress {
            app_id,
            pointer_id,
            pointer,
            origin,
            container,
        } => {
            interaction.begin_icon_press(&app_id, pointer_id, pointer, origin, container);
        }
        DesktopAction::PointerMove {
            pointer_id,
            pointer,
        } => {
            let icon_moved = interaction.pointer_move(
                &mut state.windows,
                &mut state.icons,
                pointer_id,
                pointer,
            );
            if icon_moved {
                effects.push(RuntimeEffect::PersistIconLayout);
            }
        }
        DesktopAction::PointerUp { pointer_id } => {
            if let Some(app_id) = interaction.pointer_up(pointer_id) {
                effects.push(RuntimeEffect::ActivateApp(app_id));
            }
        }
        DesktopAction::PointerCancel { pointer_id } => interaction.pointer_cancel(pointer_id),
        DesktopAction::SetIconPosition { app_id, position } => {
            state.icons.set_icon_position(&app_id, position);
            effects.push(RuntimeEffect::PersistIconLayout);
        }
        DesktopAction::ResetIconPositions => {
            state.icons.reset_positions();
            effects.push(RuntimeEffect::PersistIconLayout);
        }
        DesktopAction::CleanUpIcons { app_ids, bounds } => {
            state.icons.clean_up_icons(&app_ids, bounds);
            effects.push(RuntimeEffect::PersistIconLayout);
        }
        DesktopAction::HydrateIconPositions { positions } => {
            if state.icons.hydrate_positions(positions) {
                effects.push(RuntimeEffect::PersistIconLayout);
            }
        }
        DesktopAction::ActivateApp { app_id } => {
            if apps::app_descriptor(&app_id).is_some() {
                effects.push(RuntimeEffect::ActivateApp(app_id));
            }
        }
        DesktopAction::ShowWelcome { viewport } => {
            let app_id = apps::welcome_application_id();
            if let Some(title) = apps::app_title(&app_id) {
                state.windows.open_window(&app_id, title, viewport);
                effects.push(RuntimeEffect::MarkWelcomeShown);
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interaction::{IconCapture, MIN_WINDOW_WIDTH};

    const DESKTOP: Size = Size::new(1440.0, 900.0);

    fn app(raw: &str) -> ApplicationId {
        ApplicationId::trusted(raw)
    }

    fn at(x: i32, y: i32) -> PointerPosition {
        PointerPosition { x, y }
    }

    fn open(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        app_id: &str,
    ) -> WindowId {
        let effects = reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenWindow {
                app_id: app(app_id),
                title: app_id.to_string(),
                viewport: DESKTOP,
            },
        );
        assert!(effects.is_empty());
        state
            .windows
            .window_for_app(&app(app_id))
            .expect("window opened")
            .id
            .clone()
    }

    #[test]
    fn window_operations_never_persist_icons() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "browser");

        for action in [
            DesktopAction::FocusWindow {
                window_id: win.clone(),
            },
            DesktopAction::ToggleMaximize {
                window_id: win.clone(),
            },
            DesktopAction::MinimizeWindow {
                window_id: win.clone(),
            },
            DesktopAction::CloseWindow { window_id: win },
        ] {
            assert_eq!(reduce_desktop(&mut state, &mut interaction, action), vec![]);
        }
        assert!(state.windows.windows().is_empty());
    }

    #[test]
    fn icon_mutations_emit_persist_effect() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetIconPosition {
                app_id: app("readme"),
                position: Point::new(40.4, 80.6),
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PersistIconLayout]);
        assert_eq!(
            state.icons.position(&app("readme")),
            Some(IconPosition { x: 40, y: 81 })
        );

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CleanUpIcons {
                app_ids: vec![app("readme"), app("settings")],
                bounds: IconLayoutBounds::new(800.0, 600.0),
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PersistIconLayout]);
        assert_eq!(
            state.icons.position(&app("settings")),
            Some(IconPosition { x: 16, y: 120 })
        );

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ResetIconPositions,
        );
        assert_eq!(effects, vec![RuntimeEffect::PersistIconLayout]);
        assert!(state.icons.positions().is_empty());
    }

    #[test]
    fn drag_before_hydration_survives_and_is_written_back() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::SetIconPosition {
                app_id: app("readme"),
                position: Point::new(240.0, 64.0),
            },
        );

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateIconPositions {
                positions: BTreeMap::from([
                    (app("readme"), IconPosition { x: 16, y: 16 }),
                    (app("portfolio"), IconPosition { x: 16, y: 120 }),
                ]),
            },
        );

        assert_eq!(effects, vec![RuntimeEffect::PersistIconLayout]);
        assert_eq!(
            state.icons.positions(),
            &BTreeMap::from([
                (app("portfolio"), IconPosition { x: 16, y: 120 }),
                (app("readme"), IconPosition { x: 240, y: 64 }),
            ])
        );
    }

    #[test]
    fn hydration_into_fresh_state_does_not_write_back() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let positions = BTreeMap::from([(app("portfolio"), IconPosition { x: 8, y: 200 })]);

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateIconPositions {
                positions: positions.clone(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.icons.positions(), &positions);
    }

    #[test]
    fn icon_click_emits_activation_and_drag_emits_persist() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let press = |pointer_id| DesktopAction::BeginIconPress {
            app_id: app("portfolio"),
            pointer_id,
            pointer: at(100, 100),
            origin: IconPosition { x: 16, y: 16 },
            container: IconLayoutBounds::new(1200.0, 800.0),
        };

        reduce_desktop(&mut state, &mut interaction, press(1));
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::PointerUp { pointer_id: 1 });
        assert_eq!(effects, vec![RuntimeEffect::ActivateApp(app("portfolio"))]);

        reduce_desktop(&mut state, &mut interaction, press(2));
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer_id: 2,
                pointer: at(140, 100),
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::PersistIconLayout]);
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::PointerUp { pointer_id: 2 });
        assert!(effects.is_empty());
        assert_eq!(
            state.icons.position(&app("portfolio")),
            Some(IconPosition { x: 56, y: 16 })
        );
    }

    #[test]
    fn cancelled_icon_press_never_activates() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconPress {
                app_id: app("readme"),
                pointer_id: 9,
                pointer: at(0, 0),
                origin: IconPosition { x: 16, y: 16 },
                container: IconLayoutBounds::new(1200.0, 800.0),
            },
        );
        reduce_desktop(&mut state, &mut interaction, DesktopAction::PointerCancel { pointer_id: 9 });
        assert_eq!(interaction.icon, IconCapture::Idle);
        let effects = reduce_desktop(&mut state, &mut interaction, DesktopAction::PointerUp { pointer_id: 9 });
        assert!(effects.is_empty());
    }

    #[test]
    fn resize_flow_goes_through_pointer_actions() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "browser");

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: win.clone(),
                edge: ResizeEdge::East,
                pointer_id: 5,
                pointer: at(950, 300),
            },
        );
        assert!(interaction.resize_overlay_active());
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::PointerMove {
                pointer_id: 5,
                pointer: at(0, 300),
            },
        );
        reduce_desktop(&mut state, &mut interaction, DesktopAction::PointerUp { pointer_id: 5 });

        assert!(interaction.windows.is_empty());
        assert_eq!(
            state.windows.window(&win).expect("window").size.width,
            MIN_WINDOW_WIDTH
        );
    }

    #[test]
    fn show_desktop_minimizes_everything() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        open(&mut state, &mut interaction, "browser");
        open(&mut state, &mut interaction, "portfolio");

        reduce_desktop(&mut state, &mut interaction, DesktopAction::ShowDesktop);

        assert!(state.windows.windows().iter().all(|w| w.is_minimized));
        assert_eq!(state.windows.active_window_id(), None);
        assert_eq!(state.windows.topmost_visible(), None);
    }

    #[test]
    fn close_all_drops_an_in_flight_drag() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let win = open(&mut state, &mut interaction, "browser");
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: win,
                pointer_id: 1,
                pointer: at(0, 0),
            },
        );

        reduce_desktop(&mut state, &mut interaction, DesktopAction::CloseAllWindows);

        assert!(interaction.windows.is_empty());
        assert_eq!(state.windows, WindowStore::default());
    }

    #[test]
    fn activation_of_unknown_apps_is_ignored() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateApp {
                app_id: app("nope"),
            },
        );
        assert!(effects.is_empty());

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ActivateApp {
                app_id: app("settings"),
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::ActivateApp(app("settings"))]);
    }

    #[test]
    fn welcome_opens_read_me_and_marks_it_shown() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ShowWelcome { viewport: DESKTOP },
        );

        assert_eq!(effects, vec![RuntimeEffect::MarkWelcomeShown]);
        let readme = state
            .windows
            .window_for_app(&apps::welcome_application_id())
            .expect("welcome window");
        assert_eq!(readme.title, "Read Me");
        assert_eq!(state.windows.active_window_id(), Some(&readme.id));
    }
}
