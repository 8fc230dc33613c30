//! UIコンポーネント

pub mod about;
pub mod navigation;
pub mod photo_grid;
pub mod toast_stack;
pub mod upload;
