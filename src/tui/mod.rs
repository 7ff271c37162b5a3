pub mod app;
pub mod draw;
pub mod input;
pub mod tabs;
