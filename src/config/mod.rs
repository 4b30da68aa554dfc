//! Configuration management for Orbit Dashboard

pub mod settings;

pub use settings::{AppConfig, ThemePreference};
