mod app;
pub mod components;
pub mod constants;
pub mod targets;

pub use app::run_gui;
