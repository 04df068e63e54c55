use tauri::Url;

pub const PRIMARY_URL: &str = "https://grok.com";
pub const SECONDARY_URL: &str = "https://console.x.ai/";

/// The two pages the content webview can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    Primary,
    Secondary,
}

impl NavigationTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            NavigationTarget::Primary => PRIMARY_URL,
            NavigationTarget::Secondary => SECONDARY_URL,
        }
    }

    pub fn url(self) -> anyhow::Result<Url> {
        Ok(Url::parse(self.as_str())?)
    }
}
