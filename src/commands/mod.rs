pub mod navigation;
pub mod window;
