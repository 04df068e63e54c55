pub mod app_log;
pub mod browser_host;
pub mod content_webview;
pub mod layout;
pub mod main_window;
pub mod settings_store;
pub mod window_controller;

