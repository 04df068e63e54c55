use crate::models::NavigationTarget;
use anyhow::{bail, Result};
use parking_lot::Mutex;
use std::future::Future;
use std::path::{Path, PathBuf};
use tauri::Url;

/// Folder next to the executable where the webview keeps cookies and login state.
pub const PROFILE_DIR_NAME: &str = "WebViewData";

pub const PROVISIONING_ERROR_TITLE: &str = "Error";

pub fn profile_dir_for(exe_path: &Path) -> PathBuf {
    exe_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(PROFILE_DIR_NAME)
}

pub fn provisioning_error_message(error: &anyhow::Error) -> String {
    format!("Error initializing WebView: {error:#}")
}

pub trait BrowserView: Send + Sync + 'static {
    fn navigate(&self, url: Url) -> Result<()>;
}

/// Creates the browser runtime bound to a profile directory and attaches a view to it.
pub trait ViewProvisioner {
    type View: BrowserView;

    fn provision(&self, profile_dir: PathBuf) -> impl Future<Output = Result<Self::View>> + Send;
}

pub trait FailureNotifier {
    /// Shows a modal message and returns once the user dismissed it.
    fn notify_blocking(&self, title: &str, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Uninitialized,
    Provisioning,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateOutcome {
    Navigated,
    /// Remembered until provisioning finishes; the latest request wins.
    Deferred,
    Ignored,
}

struct HostInner<V> {
    state: HostState,
    view: Option<V>,
    pending: Option<NavigationTarget>,
    current: Option<NavigationTarget>,
}

pub struct BrowserHost<V> {
    inner: Mutex<HostInner<V>>,
}

impl<V: BrowserView> Default for BrowserHost<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: BrowserView> BrowserHost<V> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HostInner {
                state: HostState::Uninitialized,
                view: None,
                pending: None,
                current: None,
            }),
        }
    }

    pub fn state(&self) -> HostState {
        self.inner.lock().state
    }

    pub fn current_target(&self) -> Option<NavigationTarget> {
        self.inner.lock().current
    }

    /// Runs the one-shot provisioning sequence. On failure the notifier is shown
    /// exactly once and the host stays inert.
    pub async fn initialize<P, N>(
        &self,
        provisioner: &P,
        notifier: &N,
        profile_dir: PathBuf,
    ) -> Result<NavigationTarget>
    where
        P: ViewProvisioner<View = V>,
        N: FailureNotifier,
    {
        {
            let mut inner = self.inner.lock();
            if inner.state != HostState::Uninitialized {
                bail!("browser host already initialized ({:?})", inner.state);
            }
            inner.state = HostState::Provisioning;
        }

        let result = match provisioner.provision(profile_dir).await {
            Ok(view) => self.finish_provisioning(view),
            Err(error) => Err(error),
        };

        if let Err(error) = &result {
            self.inner.lock().state = HostState::Failed;
            notifier.notify_blocking(PROVISIONING_ERROR_TITLE, &provisioning_error_message(error));
        }
        result
    }

    fn finish_provisioning(&self, view: V) -> Result<NavigationTarget> {
        let mut inner = self.inner.lock();
        let target = inner.pending.take().unwrap_or(NavigationTarget::Primary);
        view.navigate(target.url()?)?;

        inner.view = Some(view);
        inner.current = Some(target);
        inner.state = HostState::Ready;
        Ok(target)
    }

    pub fn navigate(&self, target: NavigationTarget) -> Result<NavigateOutcome> {
        let mut inner = self.inner.lock();
        match inner.state {
            HostState::Uninitialized | HostState::Provisioning => {
                inner.pending = Some(target);
                Ok(NavigateOutcome::Deferred)
            }
            HostState::Failed => Ok(NavigateOutcome::Ignored),
            HostState::Ready => {
                let Some(view) = inner.view.as_ref() else {
                    bail!("browser host is ready without a view");
                };
                view.navigate(target.url()?)?;
                inner.current = Some(target);
                Ok(NavigateOutcome::Navigated)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::navigation::{PRIMARY_URL, SECONDARY_URL};
    use anyhow::anyhow;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct FakeView {
        visited: Arc<Mutex<Vec<String>>>,
    }

    impl FakeView {
        fn visited(&self) -> Vec<String> {
            self.visited.lock().clone()
        }
    }

    impl BrowserView for FakeView {
        fn navigate(&self, url: Url) -> Result<()> {
            self.visited.lock().push(url.to_string());
            Ok(())
        }
    }

    struct FakeProvisioner {
        view: FakeView,
        fail_with: Option<&'static str>,
        seen_profile: Mutex<Option<PathBuf>>,
    }

    impl FakeProvisioner {
        fn ok(view: FakeView) -> Self {
            Self {
                view,
                fail_with: None,
                seen_profile: Mutex::new(None),
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                view: FakeView::default(),
                fail_with: Some(message),
                seen_profile: Mutex::new(None),
            }
        }
    }

    impl ViewProvisioner for FakeProvisioner {
        type View = FakeView;

        fn provision(&self, profile_dir: PathBuf) -> impl Future<Output = Result<FakeView>> + Send {
            *self.seen_profile.lock() = Some(profile_dir);
            let view = self.view.clone();
            let fail_with = self.fail_with;
            async move {
                match fail_with {
                    Some(message) => Err(anyhow!(message)),
                    None => Ok(view),
                }
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        shown: Mutex<Vec<(String, String)>>,
    }

    impl FailureNotifier for RecordingNotifier {
        fn notify_blocking(&self, title: &str, message: &str) {
            self.shown.lock().push((title.to_string(), message.to_string()));
        }
    }

    fn profile() -> PathBuf {
        PathBuf::from("/opt/grok").join(PROFILE_DIR_NAME)
    }

    #[test]
    fn profile_dir_sits_next_to_executable() {
        let exe = Path::new("/opt/grok").join("grok-desktop");
        assert_eq!(profile_dir_for(&exe), profile());
    }

    #[test]
    fn initialize_navigates_to_primary_url() {
        let view = FakeView::default();
        let provisioner = FakeProvisioner::ok(view.clone());
        let notifier = RecordingNotifier::default();
        let host = BrowserHost::new();
        assert_eq!(host.state(), HostState::Uninitialized);

        let target = tauri::async_runtime::block_on(host.initialize(
            &provisioner,
            &notifier,
            profile(),
        ))
        .expect("initialize");

        assert_eq!(target, NavigationTarget::Primary);
        assert_eq!(host.state(), HostState::Ready);
        assert_eq!(provisioner.seen_profile.lock().clone(), Some(profile()));
        assert_eq!(view.visited(), vec![format!("{PRIMARY_URL}/")]);
        assert!(notifier.shown.lock().is_empty());
    }

    #[test]
    fn last_navigation_wins() {
        let view = FakeView::default();
        let host = BrowserHost::new();
        tauri::async_runtime::block_on(host.initialize(
            &FakeProvisioner::ok(view.clone()),
            &RecordingNotifier::default(),
            profile(),
        ))
        .expect("initialize");

        host.navigate(NavigationTarget::Primary).expect("primary");
        host.navigate(NavigationTarget::Secondary).expect("secondary");

        assert_eq!(host.current_target(), Some(NavigationTarget::Secondary));
        assert_eq!(view.visited().last().map(String::as_str), Some(SECONDARY_URL));
    }

    #[test]
    fn navigation_before_ready_is_applied_after_provisioning() {
        let view = FakeView::default();
        let host = BrowserHost::new();

        assert_eq!(
            host.navigate(NavigationTarget::Primary).expect("navigate"),
            NavigateOutcome::Deferred
        );
        assert_eq!(
            host.navigate(NavigationTarget::Secondary).expect("navigate"),
            NavigateOutcome::Deferred
        );
        assert!(view.visited().is_empty());

        let target = tauri::async_runtime::block_on(host.initialize(
            &FakeProvisioner::ok(view.clone()),
            &RecordingNotifier::default(),
            profile(),
        ))
        .expect("initialize");

        assert_eq!(target, NavigationTarget::Secondary);
        assert_eq!(view.visited(), vec![SECONDARY_URL.to_string()]);
    }

    #[test]
    fn provisioning_failure_notifies_once_and_stays_inert() {
        let host = BrowserHost::<FakeView>::new();
        let notifier = RecordingNotifier::default();

        let result = tauri::async_runtime::block_on(host.initialize(
            &FakeProvisioner::failing("profile directory is locked"),
            &notifier,
            profile(),
        ));

        assert!(result.is_err());
        assert_eq!(host.state(), HostState::Failed);
        let shown = notifier.shown.lock().clone();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, PROVISIONING_ERROR_TITLE);
        assert!(shown[0].1.contains("profile directory is locked"));

        assert_eq!(
            host.navigate(NavigationTarget::Secondary).expect("navigate"),
            NavigateOutcome::Ignored
        );
        assert_eq!(host.current_target(), None);
    }

    #[test]
    fn second_initialize_is_rejected_without_notification() {
        let host = BrowserHost::new();
        let notifier = RecordingNotifier::default();
        let view = FakeView::default();
        tauri::async_runtime::block_on(host.initialize(
            &FakeProvisioner::ok(view.clone()),
            &notifier,
            profile(),
        ))
        .expect("initialize");

        let again = tauri::async_runtime::block_on(host.initialize(
            &FakeProvisioner::ok(view.clone()),
            &notifier,
            profile(),
        ));

        assert!(again.is_err());
        assert_eq!(host.state(), HostState::Ready);
        assert!(notifier.shown.lock().is_empty());
        assert_eq!(view.visited().len(), 1);
    }
}
