//! Registry of widgets that can be spotlighted by the tour
//!
//! Host widgets call [`TargetRegistry::mark`] every frame they are drawn. The
//! registry is cleared at the start of each frame, so a marker whose screen is
//! not mounted simply fails to resolve.

use std::collections::HashMap;

use tracing::debug;

use crate::tour::geometry::{Rect, TargetLocator};

#[derive(Debug, Default)]
pub struct TargetRegistry {
    rects: HashMap<String, egui::Rect>,
    pending_scroll: Option<String>,
    /// Last marker scrolled to; scrolling happens once per step, not every frame
    scrolled: Option<String>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's rects
    pub fn begin_frame(&mut self) {
        self.rects.clear();
    }

    /// Forget which marker was scrolled to, so the next tour run scrolls again
    pub fn reset_scroll(&mut self) {
        self.pending_scroll = None;
        self.scrolled = None;
    }

    /// Register `response` as the widget for `marker`
    pub fn mark(&mut self, marker: &str, response: &egui::Response) {
        self.rects.insert(marker.to_string(), response.rect);

        if self.pending_scroll.as_deref() == Some(marker) {
            response.scroll_to_me(Some(egui::Align::Center));
            self.pending_scroll = None;
            debug!(marker, "Scrolled tour target into view");
        }
    }
}

impl TargetLocator for TargetRegistry {
    fn locate(&self, target: &str) -> Option<Rect> {
        self.rects.get(target).copied().map(Rect::from)
    }

    fn scroll_into_view(&mut self, target: &str) {
        if self.scrolled.as_deref() == Some(target) {
            return;
        }
        self.scrolled = Some(target.to_string());
        self.pending_scroll = Some(target.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmarked_target_not_found() {
        let registry = TargetRegistry::new();
        assert_eq!(registry.locate("quick-notes"), None);
    }

    #[test]
    fn test_begin_frame_clears_rects() {
        let mut registry = TargetRegistry::new();
        registry
            .rects
            .insert("quick-notes".into(), egui::Rect::from_min_size(egui::pos2(1.0, 2.0), egui::vec2(3.0, 4.0)));
        assert_eq!(registry.locate("quick-notes"), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));

        registry.begin_frame();
        assert_eq!(registry.locate("quick-notes"), None);
    }

    #[test]
    fn test_per_frame_resolution_scrolls_once_until_reset() {
        use crate::tour::catalog::{Placement, TourStep};
        use crate::tour::geometry::{Viewport, resolve_geometry};

        let step = TourStep::new("notes", "Notes", "", Some("quick-notes"), Placement::Bottom);
        let viewport = Viewport::new(1000.0, 800.0);
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(100.0, 50.0));
        let mut registry = TargetRegistry::new();

        for frame in 0..3 {
            registry.begin_frame();
            registry.rects.insert("quick-notes".into(), rect);
            resolve_geometry(&step, &mut registry, &viewport);
            if frame == 0 {
                assert_eq!(registry.pending_scroll.as_deref(), Some("quick-notes"));
                // widget picked the request up while drawing
                registry.pending_scroll = None;
            } else {
                assert_eq!(registry.pending_scroll, None);
            }
        }

        registry.reset_scroll();
        resolve_geometry(&step, &mut registry, &viewport);
        assert_eq!(registry.pending_scroll.as_deref(), Some("quick-notes"));
    }

    #[test]
    fn test_scroll_requested_once_per_target() {
        let mut registry = TargetRegistry::new();
        registry.scroll_into_view("ai-assistant");
        assert_eq!(registry.pending_scroll.as_deref(), Some("ai-assistant"));

        registry.pending_scroll = None;
        registry.scroll_into_view("ai-assistant");
        assert_eq!(registry.pending_scroll, None);

        registry.scroll_into_view("quick-notes");
        assert_eq!(registry.pending_scroll.as_deref(), Some("quick-notes"));

        registry.reset_scroll();
        registry.scroll_into_view("quick-notes");
        assert_eq!(registry.pending_scroll.as_deref(), Some("quick-notes"));
    }
}
