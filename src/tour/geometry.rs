//! Target resolution and overlay geometry
//!
//! Everything here is a pure function of `(element rect, placement, viewport,
//! scroll offset)`. The only side channel is the scroll-into-view request sent
//! to the injected [`TargetLocator`], which is fire-and-forget.

use tracing::debug;

use crate::constants::tour::*;
use crate::tour::catalog::{Placement, TourStep};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Grow by `pad` on every side
    pub fn expand(&self, pad: f32) -> Self {
        Self::new(
            self.left - pad,
            self.top - pad,
            self.width + pad * 2.0,
            self.height + pad * 2.0,
        )
    }

    /// Overlap with `other`, empty (zero-sized) when disjoint
    pub fn intersect(&self, other: &Rect) -> Self {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll: ScrollOffset,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, scroll: ScrollOffset::default() }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipAnchor {
    pub top: f32,
    pub left: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipPlacement {
    /// Fixed, viewport-centered; no element geometry involved
    Centered,
    Anchored(TooltipAnchor),
}

/// Overlay geometry for the active step, rebuilt on every transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGeometry {
    pub element_rect: Option<Rect>,
    pub spotlight: Option<Rect>,
    pub tooltip: TooltipPlacement,
}

impl ResolvedGeometry {
    pub fn centered() -> Self {
        Self {
            element_rect: None,
            spotlight: None,
            tooltip: TooltipPlacement::Centered,
        }
    }

    pub fn is_centered(&self) -> bool {
        self.tooltip == TooltipPlacement::Centered
    }
}

/// Host capability: find the on-screen rect of a marked widget
pub trait TargetLocator {
    /// Rect of the widget registered under `target` in viewport coordinates
    fn locate(&self, target: &str) -> Option<Rect>;

    /// Ask the host to bring `target` to the viewport center; must not block.
    ///
    /// [`resolve_geometry`] calls this on every resolution, which for an egui
    /// host means every frame. Implementations must collapse repeated requests
    /// for the same target into a single scroll and forget that latch when the
    /// tour closes, otherwise the user can never scroll away from the target.
    fn scroll_into_view(&mut self, target: &str);
}

/// Resolve the geometry for `step`, falling back to centered mode whenever
/// the step has no usable target
pub fn resolve_geometry(
    step: &TourStep,
    locator: &mut dyn TargetLocator,
    viewport: &Viewport,
) -> ResolvedGeometry {
    let target = match step.target.as_deref() {
        Some(target) if !step.is_centered() => target,
        _ => return ResolvedGeometry::centered(),
    };

    let Some(rect) = locator.locate(target) else {
        debug!(step = %step.id, marker = target, "Tour target not mounted, using centered tooltip");
        return ResolvedGeometry::centered();
    };

    locator.scroll_into_view(target);

    ResolvedGeometry {
        element_rect: Some(rect),
        spotlight: Some(spotlight_cutout(&rect)),
        tooltip: TooltipPlacement::Anchored(tooltip_anchor(
            &rect,
            step.placement,
            viewport.width,
            viewport.scroll,
        )),
    }
}

pub fn spotlight_cutout(rect: &Rect) -> Rect {
    rect.expand(SPOTLIGHT_PADDING)
}

/// Tooltip top-left for an anchored step
///
/// `Center` never reaches here through `resolve_geometry`; when called
/// directly it uses the `Bottom` rule like any other unknown hint.
pub fn tooltip_anchor(
    rect: &Rect,
    placement: Placement,
    viewport_width: f32,
    scroll: ScrollOffset,
) -> TooltipAnchor {
    let max_left = viewport_width - TOOLTIP_WIDTH - VIEWPORT_MARGIN;
    let centered_left =
        || VIEWPORT_MARGIN.max(max_left.min(rect.center_x() + scroll.x - TOOLTIP_WIDTH / 2.0));

    match placement {
        Placement::Top => TooltipAnchor {
            top: rect.top + scroll.y - TOOLTIP_GAP,
            left: centered_left(),
        },
        Placement::BottomLeft => TooltipAnchor {
            top: rect.bottom() + scroll.y + TOOLTIP_GAP,
            left: VIEWPORT_MARGIN.max(rect.right() + scroll.x - TOOLTIP_WIDTH),
        },
        Placement::Right => TooltipAnchor {
            top: VIEWPORT_MARGIN
                .max(rect.top + scroll.y + rect.height / 2.0 - RIGHT_VERTICAL_OFFSET),
            left: max_left.min(rect.right() + scroll.x + TOOLTIP_GAP),
        },
        Placement::Bottom | Placement::Center => TooltipAnchor {
            top: rect.bottom() + scroll.y + TOOLTIP_GAP,
            left: centered_left(),
        },
    }
}

/// Rectangles covering the viewport minus the spotlight cutout
///
/// Returns the full viewport when there is no spotlight or the cutout lies
/// entirely off screen.
pub fn backdrop_regions(spotlight: Option<&Rect>, viewport: &Viewport) -> Vec<Rect> {
    let bounds = viewport.bounds();
    let Some(cut) = spotlight.map(|s| s.intersect(&bounds)).filter(|c| !c.is_empty()) else {
        return vec![bounds];
    };

    [
        Rect::new(0.0, 0.0, bounds.width, cut.top),
        Rect::new(0.0, cut.bottom(), bounds.width, bounds.height - cut.bottom()),
        Rect::new(0.0, cut.top, cut.left, cut.height),
        Rect::new(cut.right(), cut.top, bounds.width - cut.right(), cut.height),
    ]
    .into_iter()
    .filter(|r| !r.is_empty())
    .collect()
}
