//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! The reducer stays pure; everything that touches storage or the browser window goes through
//! [`DesktopHostContext`], which can be built over any [`PrefsStore`] for tests or alternate hosts.

mod boot;
mod host_ui;
mod persistence_effects;

use std::rc::Rc;

use leptos::Callback;
use platform_host::PrefsStore;
use platform_host_web::prefs_store;

use crate::{
    geometry::Size,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    prefs: Rc<dyn PrefsStore>,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(Rc::new(prefs_store()))
    }
}

impl DesktopHostContext {
    pub fn new(prefs: Rc<dyn PrefsStore>) -> Self {
        Self { prefs }
    }

    /// Returns the configured preference store.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    /// Installs boot hydration: stored icon layout first, then the first-run welcome window.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistIconLayout => {
                persistence_effects::persist_icon_layout(self.clone(), runtime)
            }
            RuntimeEffect::ActivateApp(app_id) => host_ui::activate_app(runtime, app_id),
            RuntimeEffect::MarkWelcomeShown => persistence_effects::mark_welcome_shown(self.clone()),
        }
    }

    /// Returns the current browser viewport used for window placement.
    pub fn desktop_viewport(&self) -> Size {
        host_ui::desktop_viewport()
    }

    /// Returns `window.innerWidth` x `window.innerHeight` when running in a browser.
    pub fn window_inner_size(&self) -> Option<Size> {
        host_ui::window_inner_size()
    }
}
