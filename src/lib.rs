mod commands;
mod core;
mod models;

use crate::core::content_webview::{self, ContentHost};
use crate::core::layout::MAIN_WINDOW_LABEL;
use crate::core::{app_log, layout, main_window};
use parking_lot::Mutex;
use serde_json::json;
use tauri::{Manager, WindowEvent};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(ContentHost::new())
        .setup(|app| {
            let app_handle = app.handle().clone();
            app_log::install_panic_hook(app_handle.clone());
            let _ = app_log::info(&app_handle, "app", "startup");

            let store = main_window::load_settings_store(&app_handle);
            let placement = main_window::startup_placement(&app_handle, &store);
            app.manage(Mutex::new(store));

            main_window::build(&app_handle, placement)?;

            // The window is up; provision the browser without holding the event loop.
            content_webview::spawn_provisioning(app_handle);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::window::window_start_drag,
            commands::window::window_minimize,
            commands::window::window_toggle_maximize,
            commands::window::window_close,
            commands::navigation::navigate_primary,
            commands::navigation::navigate_secondary,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            match event {
                WindowEvent::Resized(_) => {
                    if let Err(e) = layout::relayout(window) {
                        let _ = app_log::record(
                            window.app_handle(),
                            "warn",
                            "window",
                            "relayout_failed",
                            Some(json!({ "error": e.to_string() })),
                        );
                    }
                }
                WindowEvent::CloseRequested { .. } => {
                    main_window::persist_on_close(window);
                }
                _ => {}
            }
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
