//! Guided tour engine
//!
//! - **catalog**: ordered step definitions
//! - **state**: tour state machine with persisted completion flag
//! - **geometry**: target resolution, spotlight and tooltip placement
//! - **overlay**: egui rendering and control wiring

pub mod catalog;
pub mod geometry;
pub mod overlay;
pub mod state;

pub use catalog::StepCatalog;
pub use overlay::TourOverlay;
pub use state::{TourEvent, TourStore};
