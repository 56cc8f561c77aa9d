use leptos::{create_effect, logging, spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    create_effect(move |_| {
        let host = host.clone();
        spawn_local(async move {
            let prefs = host.prefs_store();

            let positions = persistence::load_icon_positions(prefs.as_ref()).await;
            if !positions.is_empty() {
                dispatch.call(DesktopAction::HydrateIconPositions { positions });
            }

            let welcome_shown = match persistence::load_welcome_shown(prefs.as_ref()).await {
                Ok(shown) => shown,
                Err(err) => {
                    logging::warn!("welcome flag load failed: {err}");
                    false
                }
            };
            if !welcome_shown {
                dispatch.call(DesktopAction::ShowWelcome {
                    viewport: host.desktop_viewport(),
                });
            }
        });
    });
}
