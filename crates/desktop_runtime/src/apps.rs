//! Built-in application registry.
//!
//! The window manager only reads ids and metadata from here. Rendering goes through each entry's
//! [`AppModule`].

mod placeholders;

use std::sync::OnceLock;

use desktop_app_contract::{AppDescriptor, AppModule, AppWindowDefaults, ApplicationId};

use crate::desktop::visible_desktop_apps;

/// App opened once on first boot.
pub const WELCOME_APP_ID: &str = "readme";

fn build_registry() -> Vec<AppDescriptor> {
    vec![
        AppDescriptor {
            app_id: ApplicationId::trusted(WELCOME_APP_ID),
            title: "Read Me",
            default_size: AppWindowDefaults {
                width: 760,
                height: 560,
            },
            resizable: true,
            show_on_desktop: true,
            module: AppModule::new(placeholders::mount_readme_app),
        },
        AppDescriptor {
            app_id: ApplicationId::trusted("portfolio"),
            title: "Resume",
            default_size: AppWindowDefaults {
                width: 900,
                height: 600,
            },
            resizable: true,
            show_on_desktop: true,
            module: AppModule::new(placeholders::mount_portfolio_app),
        },
        AppDescriptor {
            app_id: ApplicationId::trusted("settings"),
            title: "Settings",
            default_size: AppWindowDefaults {
                width: 600,
                height: 400,
            },
            resizable: false,
            show_on_desktop: true,
            module: AppModule::new(placeholders::mount_settings_app),
        },
        AppDescriptor {
            app_id: ApplicationId::trusted("browser"),
            title: "Browser",
            default_size: AppWindowDefaults {
                width: 900,
                height: 600,
            },
            resizable: true,
            show_on_desktop: true,
            module: AppModule::new(placeholders::mount_browser_app),
        },
    ]
}

pub fn app_registry() -> &'static [AppDescriptor] {
    static REGISTRY: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

pub fn app_descriptor(app_id: &ApplicationId) -> Option<&'static AppDescriptor> {
    app_registry().iter().find(|entry| &entry.app_id == app_id)
}

/// Default window title for `app_id`.
pub fn app_title(app_id: &ApplicationId) -> Option<&'static str> {
    app_descriptor(app_id).map(|entry| entry.title)
}

/// Apps with a desktop icon, in registry order.
pub fn desktop_icon_apps() -> Vec<&'static AppDescriptor> {
    visible_desktop_apps(app_registry())
}

/// Apps that hide resize handles. Unknown ids are treated as resizable.
pub fn is_resizable(app_id: &ApplicationId) -> bool {
    app_descriptor(app_id).map_or(true, |entry| entry.resizable)
}

pub fn welcome_application_id() -> ApplicationId {
    ApplicationId::trusted(WELCOME_APP_ID)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registry_ids_are_unique_valid_slugs() {
        let mut seen = HashSet::new();
        for entry in app_registry() {
            assert!(ApplicationId::new(entry.app_id.as_str()).is_ok(), "{}", entry.app_id);
            assert!(seen.insert(entry.app_id.clone()), "duplicate {}", entry.app_id);
        }
    }

    #[test]
    fn titles_resolve_by_id() {
        assert_eq!(app_title(&welcome_application_id()), Some("Read Me"));
        assert_eq!(app_title(&ApplicationId::trusted("portfolio")), Some("Resume"));
        assert_eq!(app_title(&ApplicationId::trusted("missing")), None);
    }

    #[test]
    fn settings_is_the_only_fixed_size_app() {
        let fixed: Vec<&str> = app_registry()
            .iter()
            .filter(|entry| !is_resizable(&entry.app_id))
            .map(|entry| entry.app_id.as_str())
            .collect();
        assert_eq!(fixed, vec!["settings"]);
        assert!(is_resizable(&ApplicationId::trusted("missing")));
    }

    #[test]
    fn desktop_icons_follow_registry_order() {
        let ids: Vec<&str> = desktop_icon_apps()
            .into_iter()
            .map(|entry| entry.app_id.as_str())
            .collect();
        assert_eq!(ids, vec!["readme", "portfolio", "settings", "browser"]);
    }
}
