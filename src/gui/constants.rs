//! GUI-specific constants for layout and colors

/// Dashboard window limits
pub const WINDOW_MIN_WIDTH: f32 = 640.0;
pub const WINDOW_MIN_HEIGHT: f32 = 480.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Width of the login form column
pub const LOGIN_FORM_WIDTH: f32 = 320.0;

/// Height of the chat transcript before it scrolls
pub const CHAT_MAX_HEIGHT: f32 = 260.0;

/// Accent used for tour highlights and primary buttons
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
