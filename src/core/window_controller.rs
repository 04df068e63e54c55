use crate::core::settings_store::GeometryStore;
use crate::models::{ScreenSize, WindowDisplayState, WindowGeometry};
use anyhow::Result;
use tauri::{Monitor, Runtime, Window};

/// The parts of a top-level window the controller needs at close time.
pub trait ManagedWindow {
    fn display_state(&self) -> Result<WindowDisplayState>;
    fn geometry(&self) -> Result<WindowGeometry>;
}

impl<R: Runtime> ManagedWindow for Window<R> {
    fn display_state(&self) -> Result<WindowDisplayState> {
        if self.is_minimized()? {
            return Ok(WindowDisplayState::Minimized);
        }
        if self.is_maximized()? || self.is_fullscreen()? {
            return Ok(WindowDisplayState::Maximized);
        }
        Ok(WindowDisplayState::Normal)
    }

    fn geometry(&self) -> Result<WindowGeometry> {
        let scale_factor = self.scale_factor()?;
        let position = self.outer_position()?.to_logical::<f64>(scale_factor);
        let size = self.outer_size()?.to_logical::<f64>(scale_factor);
        Ok(WindowGeometry {
            left: position.x,
            top: position.y,
            width: size.width,
            height: size.height,
        })
    }
}

/// How the main window is placed when it is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartupPlacement {
    Manual(WindowGeometry),
    /// No screen information: keep the saved size and let the toolkit center it.
    Centered { width: f64, height: f64 },
}

pub fn screen_size(monitor: &Monitor) -> ScreenSize {
    let size = monitor.size().to_logical::<f64>(monitor.scale_factor());
    ScreenSize {
        width: size.width,
        height: size.height,
    }
}

pub fn fits_screen(geometry: &WindowGeometry, screen: ScreenSize) -> bool {
    !(geometry.left < 0.0
        || geometry.left >= screen.width
        || geometry.top < 0.0
        || geometry.top >= screen.height
        || geometry.left + geometry.width > screen.width
        || geometry.top + geometry.height > screen.height)
}

/// Saved bounds that do not fit the screen are centered; width and height are never touched.
pub fn resolve_startup_geometry(saved: WindowGeometry, screen: ScreenSize) -> WindowGeometry {
    if fits_screen(&saved, screen) {
        return saved;
    }

    WindowGeometry {
        left: (screen.width - saved.width) / 2.0,
        top: (screen.height - saved.height) / 2.0,
        ..saved
    }
}

pub fn startup_placement<S: GeometryStore>(store: &S, screen: Option<ScreenSize>) -> StartupPlacement {
    let saved = store.saved_geometry();
    match screen {
        Some(screen) => StartupPlacement::Manual(resolve_startup_geometry(saved, screen)),
        None => StartupPlacement::Centered {
            width: saved.width,
            height: saved.height,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PersistOutcome {
    Saved(WindowGeometry),
    Skipped(WindowDisplayState),
}

/// Writes the current bounds only when the window is in its normal state, so a
/// minimized or maximized close keeps the last normal geometry on disk.
pub fn persist_geometry<W, S>(window: &W, store: &mut S) -> Result<PersistOutcome>
where
    W: ManagedWindow,
    S: GeometryStore,
{
    let state = window.display_state()?;
    if !state.is_normal() {
        return Ok(PersistOutcome::Skipped(state));
    }

    let geometry = window.geometry()?;
    store.store_geometry(geometry)?;
    Ok(PersistOutcome::Saved(geometry))
}
