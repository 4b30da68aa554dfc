//! Ordered tour step definitions
//!
//! Step order is positional identity: first/last checks and the progress
//! markers depend on the index, never on the step id.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Tooltip placement hint relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Placement {
    Top,
    #[default]
    Bottom,
    BottomLeft,
    Right,
    Center,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::BottomLeft => "bottom-left",
            Placement::Right => "right",
            Placement::Center => "center",
        }
    }

    /// Parse a placement name; anything unrecognized falls back to `Bottom`
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Placement::Top,
            "bottom" => Placement::Bottom,
            "bottom-left" | "bottom_left" => Placement::BottomLeft,
            "right" => Placement::Right,
            "center" | "centre" => Placement::Center,
            _ => Placement::Bottom,
        }
    }
}

impl From<String> for Placement {
    fn from(value: String) -> Self {
        Placement::parse_lenient(&value)
    }
}

impl From<Placement> for String {
    fn from(value: Placement) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of the guided tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourStep {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Marker of the host widget to spotlight; `None` means centered mode
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default, rename = "position")]
    pub placement: Placement,
}

impl TourStep {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        target: Option<&str>,
        placement: Placement,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            target: target.map(str::to_string),
            placement,
        }
    }

    /// True when the tooltip ignores element geometry
    pub fn is_centered(&self) -> bool {
        self.placement == Placement::Center || self.target.is_none()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("tour catalog must contain at least one step")]
    Empty,
    #[error("duplicate tour step id '{0}'")]
    DuplicateId(String),
}

/// Non-empty ordered list of steps
#[derive(Debug, Clone, PartialEq)]
pub struct StepCatalog {
    steps: Vec<TourStep>,
}

impl StepCatalog {
    pub fn new(steps: Vec<TourStep>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(CatalogError::DuplicateId(step.id.clone()));
            }
        }

        Ok(Self { steps })
    }

    /// Dashboard onboarding tour shipped with the application
    pub fn builtin() -> Self {
        Self {
            steps: vec![
                TourStep::new(
                    "welcome",
                    "Welcome to your Dashboard!",
                    "Let's take a quick tour of your new workspace. This will only take a minute.",
                    None,
                    Placement::Center,
                ),
                TourStep::new(
                    "daily-briefing",
                    "Daily Briefing",
                    "Start your day right! Click here to get your personalized overview of events, tasks, news, and suggestions.",
                    Some("daily-briefing"),
                    Placement::Bottom,
                ),
                TourStep::new(
                    "quick-notes",
                    "Quick Notes",
                    "Capture your thoughts instantly. Add notes or tasks that will be saved for later.",
                    Some("quick-notes"),
                    Placement::Bottom,
                ),
                TourStep::new(
                    "ai-assistant",
                    "AI Assistant",
                    "Ask anything you need help with. Your personal assistant is ready to help with questions and tasks.",
                    Some("ai-assistant"),
                    Placement::Top,
                ),
                TourStep::new(
                    "theme-toggle",
                    "Customize Your Experience",
                    "Switch between light, dark, or system themes to match your preference.",
                    Some("theme-toggle"),
                    Placement::Right,
                ),
                TourStep::new(
                    "complete",
                    "You're All Set!",
                    "You're ready to be productive! You can always restart this tour by clicking the help button in the header.",
                    None,
                    Placement::Center,
                ),
            ],
        }
    }

    /// Load a custom catalog from a JSON array of steps
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tour file {:?}", path))?;
        let steps: Vec<TourStep> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse tour steps from {:?}", path))?;
        let catalog = Self::new(steps).with_context(|| format!("Invalid tour file {:?}", path))?;
        info!(path = %path.display(), steps = catalog.len(), "Loaded custom tour catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&TourStep> {
        self.steps.get(index)
    }
}

impl Default for StepCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let catalog = StepCatalog::builtin();
        let ids: Vec<&str> = catalog.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["welcome", "daily-briefing", "quick-notes", "ai-assistant", "theme-toggle", "complete"]
        );
        assert_eq!(catalog.last_index(), 5);
    }

    #[test]
    fn test_builtin_first_and_last_are_centered() {
        let catalog = StepCatalog::builtin();
        assert!(catalog.get(0).unwrap().is_centered());
        assert!(catalog.get(catalog.last_index()).unwrap().is_centered());
        assert!(!catalog.get(1).unwrap().is_centered());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(StepCatalog::new(Vec::new()), Err(CatalogError::Empty));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let steps = vec![
            TourStep::new("a", "A", "", None, Placement::Center),
            TourStep::new("a", "A again", "", None, Placement::Center),
        ];
        assert_eq!(StepCatalog::new(steps), Err(CatalogError::DuplicateId("a".into())));
    }

    #[test]
    fn test_unknown_placement_defaults_to_bottom() {
        assert_eq!(Placement::parse_lenient("diagonal"), Placement::Bottom);
        assert_eq!(Placement::parse_lenient("Bottom-Left"), Placement::BottomLeft);
    }

    #[test]
    fn test_step_json_uses_position_key() {
        let json = r#"[
            {"id": "intro", "title": "Hi", "description": "Start", "target": null, "position": "center"},
            {"id": "notes", "title": "Notes", "description": "Here", "target": "quick-notes", "position": "sideways"},
            {"id": "bare", "title": "Bare", "description": "No extras"}
        ]"#;
        let steps: Vec<TourStep> = serde_json::from_str(json).unwrap();

        assert_eq!(steps[0].placement, Placement::Center);
        assert_eq!(steps[1].target.as_deref(), Some("quick-notes"));
        assert_eq!(steps[1].placement, Placement::Bottom);
        assert!(steps[2].is_centered());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tour.json");
        fs::write(
            &path,
            r#"[{"id": "only", "title": "Only", "description": "One step", "position": "top", "target": "ai-assistant"}]"#,
        )
        .unwrap();

        let catalog = StepCatalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().placement, Placement::Top);
    }

    #[test]
    fn test_from_json_file_empty_array_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tour.json");
        fs::write(&path, "[]").unwrap();

        assert!(StepCatalog::from_json_file(&path).is_err());
    }
}
