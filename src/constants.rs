//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Guided tour geometry constants (logical pixels)
pub mod tour {
    /// Padding added on every side of the target to form the spotlight cutout
    pub const SPOTLIGHT_PADDING: f32 = 8.0;

    /// Tooltip width used for clamping math, independent of the rendered width
    pub const TOOLTIP_WIDTH: f32 = 320.0;

    /// Minimum distance between the tooltip and the viewport edges
    pub const VIEWPORT_MARGIN: f32 = 20.0;

    /// Gap between the target and the tooltip
    pub const TOOLTIP_GAP: f32 = 15.0;

    /// Upward shift for `right` placement so the tooltip roughly centers on the target
    pub const RIGHT_VERTICAL_OFFSET: f32 = 100.0;

    /// Width of the tooltip in centered mode
    pub const CENTERED_TOOLTIP_WIDTH: f32 = 384.0;

    /// Backdrop alpha (0-255) for the dimmed area around the spotlight
    pub const BACKDROP_ALPHA: u8 = 178;
}

/// Durable storage constants
pub mod storage {
    /// Key under which the walkthrough completion flag is stored
    pub const COMPLETION_KEY: &str = "walkthrough_completed";

    /// Key-value state file inside the data directory
    pub const STATE_FILENAME: &str = "state.json";
}

/// Config file location
pub mod config {
    /// Directory under the platform config/data dir
    pub const APP_DIR: &str = "orbit-dashboard";

    /// Config file name
    pub const FILENAME: &str = "config.json";
}

/// Config validation ranges
pub mod validation {
    pub const MIN_WINDOW_WIDTH: u16 = 640;
    pub const MAX_WINDOW_WIDTH: u16 = 7680;
    pub const MIN_WINDOW_HEIGHT: u16 = 480;
    pub const MAX_WINDOW_HEIGHT: u16 = 4320;
}

/// Mocked authentication rules
pub mod auth {
    /// Minimum accepted password length
    pub const MIN_PASSWORD_LEN: usize = 6;

    /// Display name returned by the mock account backend
    pub const MOCK_USER_NAME: &str = "Yuvanesh S";
}

/// Host timing (milliseconds)
pub mod timing {
    /// Simulated authentication round trip
    pub const AUTH_DELAY_MS: u64 = 800;

    /// Delay between a successful login and the tour starting, lets the dashboard lay out
    pub const TOUR_START_DELAY_MS: u64 = 1000;

    /// Simulated assistant "thinking" time
    pub const CHAT_REPLY_DELAY_MS: u64 = 1200;

    /// How long the "Saved" confirmation stays visible after adding a note
    pub const NOTE_SAVED_FLASH_MS: u64 = 2000;
}
