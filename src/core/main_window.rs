use crate::core::app_log;
use crate::core::layout::{self, CHROME_WEBVIEW_LABEL, MAIN_WINDOW_LABEL};
use crate::core::settings_store::{self, SettingsStore, SETTINGS_FILE_NAME};
use crate::core::window_controller::{self, PersistOutcome, StartupPlacement};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde_json::json;
use std::path::PathBuf;
use tauri::webview::WebviewBuilder;
use tauri::window::WindowBuilder;
use tauri::{AppHandle, Manager, Window, WebviewUrl};

pub const WINDOW_TITLE: &str = "Grok";

pub type SettingsState = Mutex<SettingsStore>;

/// Never fails: an unreadable settings file is logged and replaced by defaults.
pub fn load_settings_store(app: &AppHandle) -> SettingsStore {
    let path = settings_store::settings_path(app).unwrap_or_else(|e| {
        let _ = app_log::record(
            app,
            "warn",
            "settings",
            "path_unavailable",
            Some(json!({ "error": format!("{e:#}") })),
        );
        PathBuf::from(SETTINGS_FILE_NAME)
    });

    match SettingsStore::load(path.clone()) {
        Ok(store) => store,
        Err(e) => {
            let _ = app_log::record(
                app,
                "warn",
                "settings",
                "load_failed",
                Some(json!({ "error": format!("{e:#}") })),
            );
            SettingsStore::with_defaults(path)
        }
    }
}

pub fn startup_placement(app: &AppHandle, store: &SettingsStore) -> StartupPlacement {
    let screen = app
        .primary_monitor()
        .ok()
        .flatten()
        .map(|monitor| window_controller::screen_size(&monitor));
    let placement = window_controller::startup_placement(store, screen);

    let data = match placement {
        StartupPlacement::Manual(geometry) => json!({
            "mode": "manual",
            "saved": store.settings(),
            "left": geometry.left,
            "top": geometry.top,
            "width": geometry.width,
            "height": geometry.height,
        }),
        StartupPlacement::Centered { width, height } => json!({
            "mode": "centered",
            "width": width,
            "height": height,
        }),
    };
    let _ = app_log::record(app, "info", "window", "restore_geometry", Some(data));
    placement
}

/// Builds the undecorated main window and its title bar webview.
pub fn build(app: &AppHandle, placement: StartupPlacement) -> Result<Window> {
    let builder = WindowBuilder::new(app, MAIN_WINDOW_LABEL)
        .title(WINDOW_TITLE)
        .decorations(false)
        .resizable(true);

    let builder = match placement {
        StartupPlacement::Manual(geometry) => builder
            .inner_size(geometry.width, geometry.height)
            .position(geometry.left, geometry.top),
        StartupPlacement::Centered { width, height } => {
            builder.inner_size(width, height).center()
        }
    };

    let window = builder.build().context("Failed to create main window")?;

    let bounds = layout::chrome_bounds(layout::inner_logical_size(&window)?);
    window
        .add_child(
            WebviewBuilder::new(CHROME_WEBVIEW_LABEL, WebviewUrl::App("index.html".into())),
            bounds.position,
            bounds.size,
        )
        .context("Failed to attach title bar webview")?;

    Ok(window)
}

pub fn persist_on_close(window: &Window) {
    let app = window.app_handle();
    let Some(settings) = app.try_state::<SettingsState>() else {
        return;
    };

    let outcome = {
        let mut store = settings.lock();
        window_controller::persist_geometry(window, &mut *store)
    };

    let _ = match outcome {
        Ok(PersistOutcome::Saved(geometry)) => app_log::record(
            app,
            "info",
            "window",
            "geometry_saved",
            Some(json!(geometry)),
        ),
        Ok(PersistOutcome::Skipped(state)) => app_log::record(
            app,
            "info",
            "window",
            "geometry_skipped",
            Some(json!({ "state": format!("{state:?}") })),
        ),
        Err(e) => app_log::record(
            app,
            "error",
            "window",
            "geometry_save_failed",
            Some(json!({ "error": format!("{e:#}") })),
        ),
    };
}
