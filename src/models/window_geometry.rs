use serde::{Deserialize, Serialize};

/// Window bounds in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDisplayState {
    Normal,
    Minimized,
    Maximized,
}

impl WindowDisplayState {
    pub fn is_normal(self) -> bool {
        self == WindowDisplayState::Normal
    }
}
