use tauri::{LogicalPosition, LogicalSize, Runtime, Window};

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const CHROME_WEBVIEW_LABEL: &str = "chrome";
pub const CONTENT_WEBVIEW_LABEL: &str = "content";

pub const TITLE_BAR_HEIGHT: f64 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub position: LogicalPosition<f64>,
    pub size: LogicalSize<f64>,
}

/// Title bar strip along the top edge of the window.
pub fn chrome_bounds(window: LogicalSize<f64>) -> Bounds {
    Bounds {
        position: LogicalPosition::new(0.0, 0.0),
        size: LogicalSize::new(window.width, TITLE_BAR_HEIGHT.min(window.height)),
    }
}

/// Everything below the title bar.
pub fn content_bounds(window: LogicalSize<f64>) -> Bounds {
    let top = TITLE_BAR_HEIGHT.min(window.height);
    Bounds {
        position: LogicalPosition::new(0.0, top),
        size: LogicalSize::new(window.width, (window.height - top).max(0.0)),
    }
}

pub fn inner_logical_size<R: Runtime>(window: &Window<R>) -> tauri::Result<LogicalSize<f64>> {
    let scale_factor = window.scale_factor()?;
    Ok(window.inner_size()?.to_logical(scale_factor))
}

/// Re-applies both webview bounds after the window was resized.
pub fn relayout<R: Runtime>(window: &Window<R>) -> tauri::Result<()> {
    let size = inner_logical_size(window)?;
    for webview in window.webviews() {
        let bounds = match webview.label() {
            CHROME_WEBVIEW_LABEL => chrome_bounds(size),
            CONTENT_WEBVIEW_LABEL => content_bounds(size),
            _ => continue,
        };
        webview.set_position(bounds.position)?;
        webview.set_size(bounds.size)?;
    }
    Ok(())
}
