//! Rendering and page-chrome helpers.

pub mod render;
pub mod topbar;
