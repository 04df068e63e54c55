use crate::core::app_log;
use crate::core::browser_host::{
    profile_dir_for, BrowserHost, BrowserView, FailureNotifier, ViewProvisioner,
};
use crate::core::layout::{self, CONTENT_WEBVIEW_LABEL, MAIN_WINDOW_LABEL};
use anyhow::{anyhow, Context, Result};
use serde_json::json;
use std::future::Future;
use std::path::PathBuf;
use tauri::webview::WebviewBuilder;
use tauri::{AppHandle, Manager, Runtime, Url, Webview, WebviewUrl};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

pub type ContentHost = BrowserHost<Webview>;

impl<R: Runtime> BrowserView for Webview<R> {
    fn navigate(&self, url: Url) -> Result<()> {
        Webview::<R>::navigate(self, url)?;
        Ok(())
    }
}

/// Attaches the `content` webview under the title bar of the main window.
pub struct ContentWebviewProvisioner<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> ContentWebviewProvisioner<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

fn attach_content_webview<R: Runtime>(app: &AppHandle<R>, profile_dir: PathBuf) -> Result<Webview<R>> {
    let window = app
        .get_window(MAIN_WINDOW_LABEL)
        .ok_or_else(|| anyhow!("Main window not found"))?;
    let bounds = layout::content_bounds(layout::inner_logical_size(&window)?);

    let blank = Url::parse("about:blank")?;
    let builder = WebviewBuilder::new(CONTENT_WEBVIEW_LABEL, WebviewUrl::External(blank))
        .data_directory(profile_dir);
    let webview = window
        .add_child(builder, bounds.position, bounds.size)
        .context("Failed to attach content webview")?;
    Ok(webview)
}

impl<R: Runtime> ViewProvisioner for ContentWebviewProvisioner<R> {
    type View = Webview<R>;

    fn provision(&self, profile_dir: PathBuf) -> impl Future<Output = Result<Webview<R>>> + Send {
        let app = self.app.clone();
        async move {
            let dir = profile_dir.clone();
            tauri::async_runtime::spawn_blocking(move || std::fs::create_dir_all(&dir))
                .await
                .context("Profile directory task failed")?
                .with_context(|| {
                    format!("Failed to create profile directory {}", profile_dir.display())
                })?;

            // Webviews can only be created on the main thread; hop there and wait for the result.
            let (tx, rx) = tokio::sync::oneshot::channel();
            let main_app = app.clone();
            app.run_on_main_thread(move || {
                let _ = tx.send(attach_content_webview(&main_app, profile_dir));
            })
            .context("Failed to schedule webview creation")?;

            rx.await
                .map_err(|_| anyhow!("Webview creation was abandoned"))?
        }
    }
}

pub struct DialogNotifier<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> DialogNotifier<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> FailureNotifier for DialogNotifier<R> {
    fn notify_blocking(&self, title: &str, message: &str) {
        let _ = self
            .app
            .dialog()
            .message(message)
            .title(title)
            .kind(MessageDialogKind::Error)
            .blocking_show();
    }
}

/// Starts provisioning off the UI thread. Window events keep flowing while it runs.
pub fn spawn_provisioning(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let profile_dir = match std::env::current_exe() {
            Ok(exe) => profile_dir_for(&exe),
            Err(e) => {
                let _ = app_log::record(
                    &app,
                    "error",
                    "browser",
                    "current_exe_failed",
                    Some(json!({ "error": e.to_string() })),
                );
                PathBuf::from(crate::core::browser_host::PROFILE_DIR_NAME)
            }
        };

        let _ = app_log::record(
            &app,
            "info",
            "browser",
            "provisioning",
            Some(json!({ "profile_dir": profile_dir.display().to_string() })),
        );

        let provisioner = ContentWebviewProvisioner::new(app.clone());
        let notifier = DialogNotifier::new(app.clone());
        let host = app.state::<ContentHost>();
        match host.initialize(&provisioner, &notifier, profile_dir).await {
            Ok(target) => {
                let _ = app_log::record(
                    &app,
                    "info",
                    "browser",
                    "ready",
                    Some(json!({ "url": target.as_str() })),
                );
            }
            Err(e) => {
                let _ = app_log::record(
                    &app,
                    "error",
                    "browser",
                    "provisioning_failed",
                    Some(json!({ "error": format!("{e:#}") })),
                );
            }
        }
    });
}
