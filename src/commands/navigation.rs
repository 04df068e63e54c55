use crate::core::app_log;
use crate::core::browser_host::NavigateOutcome;
use crate::core::content_webview::ContentHost;
use crate::models::NavigationTarget;
use serde_json::json;
use tauri::{AppHandle, State};

fn navigate(app_handle: &AppHandle, host: &ContentHost, target: NavigationTarget) -> Result<(), String> {
    let outcome = host
        .navigate(target)
        .map_err(|e| format!("Failed to navigate to {}: {e:#}", target.as_str()))?;

    let (level, message) = match outcome {
        NavigateOutcome::Navigated => ("info", "navigated"),
        NavigateOutcome::Deferred => ("info", "navigation_deferred"),
        NavigateOutcome::Ignored => ("warn", "navigation_ignored"),
    };
    let _ = app_log::record(
        app_handle,
        level,
        "browser",
        message,
        Some(json!({
            "url": target.as_str(),
            "state": format!("{:?}", host.state()),
            "current": host.current_target().map(NavigationTarget::as_str),
        })),
    );
    Ok(())
}

#[tauri::command]
pub async fn navigate_primary(
    app_handle: AppHandle,
    host: State<'_, ContentHost>,
) -> Result<(), String> {
    navigate(&app_handle, &host, NavigationTarget::Primary)
}

#[tauri::command]
pub async fn navigate_secondary(
    app_handle: AppHandle,
    host: State<'_, ContentHost>,
) -> Result<(), String> {
    navigate(&app_handle, &host, NavigationTarget::Secondary)
}
