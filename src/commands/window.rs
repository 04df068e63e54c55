use crate::core::layout::MAIN_WINDOW_LABEL;
use tauri::{AppHandle, Manager, Window};

fn main_window(app_handle: &AppHandle) -> Result<Window, String> {
    app_handle
        .get_window(MAIN_WINDOW_LABEL)
        .ok_or_else(|| "Main window not found".to_string())
}

/// Hands the pressed pointer to the OS so it moves the window until release.
#[tauri::command]
pub async fn window_start_drag(app_handle: AppHandle) -> Result<(), String> {
    main_window(&app_handle)?
        .start_dragging()
        .map_err(|e| format!("Failed to start dragging: {}", e))
}

#[tauri::command]
pub async fn window_minimize(app_handle: AppHandle) -> Result<(), String> {
    main_window(&app_handle)?
        .minimize()
        .map_err(|e| format!("Failed to minimize window: {}", e))
}

#[tauri::command]
pub async fn window_toggle_maximize(app_handle: AppHandle) -> Result<(), String> {
    let window = main_window(&app_handle)?;
    let maximized = window
        .is_maximized()
        .map_err(|e| format!("Failed to query window state: {}", e))?;

    if maximized {
        window
            .unmaximize()
            .map_err(|e| format!("Failed to restore window: {}", e))
    } else {
        window
            .maximize()
            .map_err(|e| format!("Failed to maximize window: {}", e))
    }
}

/// Goes through `CloseRequested`, so geometry is persisted like any other close.
#[tauri::command]
pub async fn window_close(app_handle: AppHandle) -> Result<(), String> {
    main_window(&app_handle)?
        .close()
        .map_err(|e| format!("Failed to close window: {}", e))
}
