pub mod assistant;
pub mod dashboard;
pub mod login;
pub mod notes;
pub mod theme_toggle;
