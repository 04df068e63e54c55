use super::WindowGeometry;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_WIDTH: f64 = 1200.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 800.0;

/// Last known normal-state window bounds, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct WindowSettings {
    pub window_left: f64,
    pub window_top: f64,
    pub window_width: f64,
    pub window_height: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        // A negative origin never passes the bounds check, so a fresh profile centers.
        Self {
            window_left: -1.0,
            window_top: -1.0,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl WindowSettings {
    pub fn geometry(&self) -> WindowGeometry {
        WindowGeometry {
            left: self.window_left,
            top: self.window_top,
            width: self.window_width,
            height: self.window_height,
        }
    }

    pub fn set_geometry(&mut self, geometry: WindowGeometry) {
        self.window_left = geometry.left;
        self.window_top = geometry.top;
        self.window_width = geometry.width;
        self.window_height = geometry.height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_window_field_names() {
        let settings = WindowSettings {
            window_left: 10.0,
            window_top: 20.0,
            window_width: 640.0,
            window_height: 480.0,
        };

        let json = serde_json::to_string(&settings).expect("serialize");
        assert!(json.contains("\"WindowLeft\":10.0"));
        assert!(json.contains("\"WindowTop\":20.0"));
        assert!(json.contains("\"WindowWidth\":640.0"));
        assert!(json.contains("\"WindowHeight\":480.0"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: WindowSettings =
            serde_json::from_str(r#"{"WindowLeft":5.0}"#).expect("deserialize");
        assert_eq!(settings.window_left, 5.0);
        assert_eq!(settings.window_top, -1.0);
        assert_eq!(settings.window_width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(settings.window_height, DEFAULT_WINDOW_HEIGHT);
    }
}
