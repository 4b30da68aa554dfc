//! Tour overlay: dimmed backdrop with spotlight cutout, tooltip and controls
//!
//! [`OverlayModel`] holds everything the tooltip shows and is derived purely
//! from the store, so labels and progress rules are testable without egui.
//! [`TourOverlay::show`] paints it and feeds user input back as
//! [`OverlayAction`]s.

use tracing::debug;

use crate::constants::tour::{BACKDROP_ALPHA, CENTERED_TOOLTIP_WIDTH, TOOLTIP_WIDTH};
use crate::gui::constants::{ACCENT, ITEM_SPACING};
use crate::tour::catalog::Placement;
use crate::tour::geometry::{
    backdrop_regions, resolve_geometry, Rect, ResolvedGeometry, TargetLocator, TooltipPlacement,
    Viewport,
};
use crate::tour::state::{TourEvent, TourStore};

impl From<egui::Rect> for Rect {
    fn from(rect: egui::Rect) -> Self {
        Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
    }
}

impl From<Rect> for egui::Rect {
    fn from(rect: Rect) -> Self {
        egui::Rect::from_min_size(
            egui::pos2(rect.left, rect.top),
            egui::vec2(rect.width, rect.height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Next,
    Back,
    Skip,
}

/// Route a control action to the matching store operation
pub fn apply_action(store: &mut TourStore, action: OverlayAction) -> Option<TourEvent> {
    debug!(?action, "Tour overlay action");
    match action {
        OverlayAction::Next => store.next(),
        OverlayAction::Back => store.previous(),
        OverlayAction::Skip => store.skip(),
    }
}

/// Display state of the tooltip for the active step
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayModel<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub placement: Placement,
    /// One marker per step; `true` up to and including the current step
    pub markers: Vec<bool>,
    pub progress_label: String,
    pub primary_label: &'static str,
    pub show_back: bool,
}

impl<'a> OverlayModel<'a> {
    /// `None` when the tour is inactive
    pub fn from_store(store: &'a TourStore) -> Option<Self> {
        let step = store.current_step()?;
        let index = store.current_step_index();
        let count = store.catalog().len();

        Some(Self {
            title: &step.title,
            description: &step.description,
            placement: step.placement,
            markers: (0..count).map(|i| i <= index).collect(),
            progress_label: format!("{} of {}", index + 1, count),
            primary_label: if store.is_last_step() { "Finish" } else { "Next" },
            show_back: !store.is_first_step(),
        })
    }

    pub fn is_last(&self) -> bool {
        self.primary_label == "Finish"
    }
}

/// Keyboard shortcuts while the overlay is visible
fn keyboard_action(ctx: &egui::Context) -> Option<OverlayAction> {
    ctx.input(|i| {
        if i.key_pressed(egui::Key::Escape) {
            Some(OverlayAction::Skip)
        } else if i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::ArrowRight) {
            Some(OverlayAction::Next)
        } else if i.key_pressed(egui::Key::ArrowLeft) {
            Some(OverlayAction::Back)
        } else {
            None
        }
    })
}

#[derive(Default)]
pub struct TourOverlay {
    last_geometry: Option<ResolvedGeometry>,
}

impl TourOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint the overlay for the active step and apply any control input
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        store: &mut TourStore,
        locator: &mut dyn TargetLocator,
    ) -> Option<TourEvent> {
        let Some(step) = store.current_step() else {
            self.last_geometry = None;
            return None;
        };

        let screen = ctx.content_rect();
        let viewport = Viewport::new(screen.width(), screen.height());
        let geometry = resolve_geometry(step, locator, &viewport);
        if self.last_geometry.as_ref() != Some(&geometry) {
            debug!(step = %step.id, centered = geometry.is_centered(), "Tour geometry changed");
        }
        self.last_geometry = Some(geometry);

        paint_backdrop(ctx, &geometry, &viewport);

        let model = OverlayModel::from_store(store)?;
        let action = paint_tooltip(ctx, &model, &geometry, screen).or_else(|| keyboard_action(ctx));

        let event = action.and_then(|action| apply_action(store, action));
        if event.is_some() {
            ctx.request_repaint();
        }
        event
    }
}

fn paint_backdrop(ctx: &egui::Context, geometry: &ResolvedGeometry, viewport: &Viewport) {
    let dim = egui::Color32::from_black_alpha(BACKDROP_ALPHA);

    egui::Area::new(egui::Id::new("tour_backdrop"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::Pos2::ZERO)
        .interactable(true)
        .show(ctx, |ui| {
            let full: egui::Rect = viewport.bounds().into();
            // Swallow clicks so the dashboard underneath stays inert during the tour
            ui.allocate_rect(full, egui::Sense::click());

            let painter = ui.painter();
            for region in backdrop_regions(geometry.spotlight.as_ref(), viewport) {
                painter.rect_filled(egui::Rect::from(region), 0.0, dim);
            }

            if let Some(spotlight) = geometry.spotlight {
                painter.rect_stroke(
                    spotlight.into(),
                    6.0,
                    egui::Stroke::new(2.0, ACCENT),
                    egui::StrokeKind::Outside,
                );
            }
        });
}

fn paint_tooltip(
    ctx: &egui::Context,
    model: &OverlayModel<'_>,
    geometry: &ResolvedGeometry,
    screen: egui::Rect,
) -> Option<OverlayAction> {
    let mut action = None;

    let (area, width) = match geometry.tooltip {
        TooltipPlacement::Centered => (
            egui::Area::new(egui::Id::new("tour_tooltip"))
                .pivot(egui::Align2::CENTER_CENTER)
                .fixed_pos(screen.center()),
            CENTERED_TOOLTIP_WIDTH,
        ),
        TooltipPlacement::Anchored(anchor) => {
            // `top` anchors the tooltip's bottom edge above the target
            let pivot = if model.placement == Placement::Top {
                egui::Align2::LEFT_BOTTOM
            } else {
                egui::Align2::LEFT_TOP
            };
            (
                egui::Area::new(egui::Id::new("tour_tooltip"))
                    .pivot(pivot)
                    .fixed_pos(egui::pos2(anchor.left, anchor.top)),
                TOOLTIP_WIDTH,
            )
        }
    };

    area.order(egui::Order::Tooltip)
        .constrain(true)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(width - 32.0);

                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("\u{25CF}").color(ACCENT));
                        ui.label(egui::RichText::new(model.title).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("✕").on_hover_text("Skip tour").clicked() {
                                action = Some(OverlayAction::Skip);
                            }
                        });
                    });

                    ui.add_space(ITEM_SPACING);
                    ui.label(egui::RichText::new(model.description).weak());
                    ui.add_space(ITEM_SPACING * 2.0);

                    ui.horizontal(|ui| {
                        for &reached in &model.markers {
                            let (rect, _) =
                                ui.allocate_exact_size(egui::vec2(18.0, 5.0), egui::Sense::hover());
                            let color = if reached {
                                ACCENT
                            } else {
                                ui.visuals().widgets.inactive.bg_fill
                            };
                            ui.painter().rect_filled(rect, 2.5, color);
                        }
                        ui.add_space(ITEM_SPACING);
                        ui.label(egui::RichText::new(&model.progress_label).small().weak());
                    });

                    ui.add_space(ITEM_SPACING * 2.0);

                    ui.horizontal(|ui| {
                        if model.show_back && ui.button("← Back").clicked() {
                            action = Some(OverlayAction::Back);
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let primary = if model.is_last() {
                                model.primary_label.to_string()
                            } else {
                                format!("{} →", model.primary_label)
                            };
                            let button = egui::Button::new(
                                egui::RichText::new(primary).color(egui::Color32::WHITE),
                            )
                            .fill(ACCENT);
                            if ui.add(button).clicked() {
                                action = Some(OverlayAction::Next);
                            }
                            if ui.button("Skip tour").clicked() {
                                action = Some(OverlayAction::Skip);
                            }
                        });
                    });
                });
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::tour::catalog::StepCatalog;
    use crate::tour::state::TourStatus;

    fn active_store() -> TourStore {
        let mut store = TourStore::new(StepCatalog::builtin(), Box::new(MemoryStore::new()));
        store.start();
        store
    }

    #[test]
    fn test_model_none_when_inactive() {
        let store = TourStore::new(StepCatalog::builtin(), Box::new(MemoryStore::new()));
        assert!(OverlayModel::from_store(&store).is_none());
    }

    #[test]
    fn test_first_step_hides_back() {
        let store = active_store();
        let model = OverlayModel::from_store(&store).unwrap();

        assert!(!model.show_back);
        assert_eq!(model.primary_label, "Next");
        assert_eq!(model.progress_label, "1 of 6");
        assert_eq!(model.markers, vec![true, false, false, false, false, false]);
        assert_eq!(model.title, "Welcome to your Dashboard!");
    }

    #[test]
    fn test_middle_step_markers() {
        let mut store = active_store();
        store.next();
        store.next();
        let model = OverlayModel::from_store(&store).unwrap();

        assert!(model.show_back);
        assert_eq!(model.primary_label, "Next");
        assert_eq!(model.markers, vec![true, true, true, false, false, false]);
        assert_eq!(model.placement, Placement::Bottom);
    }

    #[test]
    fn test_last_step_shows_finish() {
        let mut store = active_store();
        for _ in 0..5 {
            store.next();
        }
        let model = OverlayModel::from_store(&store).unwrap();

        assert_eq!(model.primary_label, "Finish");
        assert!(model.is_last());
        assert!(model.markers.iter().all(|&m| m));
        assert_eq!(model.progress_label, "6 of 6");
    }

    #[test]
    fn test_apply_action_routes_to_store() {
        let mut store = active_store();

        apply_action(&mut store, OverlayAction::Next);
        assert_eq!(store.status(), TourStatus::Active(1));

        apply_action(&mut store, OverlayAction::Back);
        assert_eq!(store.status(), TourStatus::Active(0));

        apply_action(&mut store, OverlayAction::Skip);
        assert_eq!(store.status(), TourStatus::Inactive);
        assert!(store.has_completed_walkthrough());
    }

    #[test]
    fn test_rect_conversion_round_trip() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let egui_rect: egui::Rect = rect.into();
        assert_eq!(egui_rect.min, egui::pos2(10.0, 20.0));
        assert_eq!(egui_rect.max, egui::pos2(40.0, 60.0));
        assert_eq!(Rect::from(egui_rect), rect);
    }

    struct FixedLocator(Rect);

    impl TargetLocator for FixedLocator {
        fn locate(&self, _target: &str) -> Option<Rect> {
            Some(self.0)
        }

        fn scroll_into_view(&mut self, _target: &str) {}
    }

    #[test]
    fn test_show_clamps_to_window_content_rect() {
        use crate::tour::geometry::{TooltipAnchor, TooltipPlacement};

        let mut store = active_store();
        store.next();
        let mut overlay = TourOverlay::new();
        let mut locator = FixedLocator(Rect::new(950.0, 100.0, 40.0, 20.0));

        let ctx = egui::Context::default();
        let raw = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1000.0, 800.0))),
            ..Default::default()
        };
        let _ = ctx.run(raw, |ctx| {
            overlay.show(ctx, &mut store, &mut locator);
        });

        let geometry = overlay.last_geometry.expect("tour visible");
        assert_eq!(
            geometry.tooltip,
            TooltipPlacement::Anchored(TooltipAnchor { top: 135.0, left: 660.0 })
        );
        assert_eq!(store.status(), TourStatus::Active(1));
    }
}
