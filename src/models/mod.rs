pub mod navigation;
pub mod settings;
pub mod window_geometry;

pub use navigation::NavigationTarget;
pub use settings::WindowSettings;
pub use window_geometry::{ScreenSize, WindowDisplayState, WindowGeometry};
