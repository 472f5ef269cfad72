//! Viewport-aware anchoring of a floating panel to a trigger.
//!
//! The panel opens below the trigger, aligned to its left edge. It is pulled
//! back from the right edge when it would overflow horizontally, and flipped
//! above the trigger when it would overflow the bottom and there is room
//! above. When neither direction fits the panel keeps its downward position
//! and overflows; there is no second clamp.
//!
//! Geometry is unit-agnostic `f64` so the same rules serve pixel hosts (the
//! [`Default`] config) and terminal cells ([`PlacementConfig::TERMINAL`]).
//! Results are rounded to whole units.

use ratatui::layout::Rect;

/// Bounding box of the trigger in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Bounds {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Measure a laid-out terminal area. `None` when the area is empty,
    /// which is how an unrendered trigger looks.
    pub fn measure(area: Rect) -> Option<Self> {
        if area.is_empty() {
            return None;
        }
        Some(Self::new(
            f64::from(area.top()),
            f64::from(area.left()),
            f64::from(area.bottom()),
            f64::from(area.right()),
        ))
    }
}

/// Size of the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<Rect> for ViewportSize {
    fn from(area: Rect) -> Self {
        Self::new(f64::from(area.width), f64::from(area.height))
    }
}

/// Panel dimensions used by [`place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Fixed panel width.
    pub width: f64,
    /// Height assumed for overflow checks. The real panel may be shorter.
    pub estimated_height: f64,
    /// Gap kept between the panel and the trigger and viewport edges.
    pub margin: f64,
}

impl PlacementConfig {
    /// Cell-sized values for terminal hosts.
    pub const TERMINAL: Self = Self {
        width: 16.0,
        estimated_height: 12.0,
        margin: 1.0,
    };
}

impl Default for PlacementConfig {
    /// 200 wide, 320 estimated tall, 8 margin.
    fn default() -> Self {
        Self {
            width: 200.0,
            estimated_height: 320.0,
            margin: 8.0,
        }
    }
}

/// Which side of the trigger the panel ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Below,
    Above,
}

/// Computed panel position, rounded to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub side: Side,
}

impl Placement {
    /// Terminal rectangle for this placement with the given height, clipped
    /// to `screen`. Negative coordinates are cut off.
    pub fn to_rect(&self, height: u16, screen: Rect) -> Rect {
        let left = i64::from(self.left);
        let top = i64::from(self.top);
        let right = left + i64::from(self.width.max(0));
        let bottom = top + i64::from(height);

        let x0 = left.clamp(i64::from(screen.left()), i64::from(screen.right()));
        let y0 = top.clamp(i64::from(screen.top()), i64::from(screen.bottom()));
        let x1 = right.clamp(x0, i64::from(screen.right()));
        let y1 = bottom.clamp(y0, i64::from(screen.bottom()));

        // All four values lie inside `screen`, so they fit in u16.
        Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
    }
}

/// Position a panel relative to `trigger` inside `viewport`.
pub fn place(trigger: Bounds, viewport: ViewportSize, config: &PlacementConfig) -> Placement {
    let PlacementConfig {
        width,
        estimated_height,
        margin,
    } = *config;

    let mut left = trigger.left;
    if left + width > viewport.width - margin {
        left = margin.max(viewport.width - width - margin);
    }

    let mut top = trigger.bottom + margin;
    let mut side = Side::Below;
    if top + estimated_height > viewport.height - margin {
        let above = trigger.top - estimated_height - margin;
        if above >= margin {
            top = above;
            side = Side::Above;
        }
    }

    Placement {
        top: top.round() as i32,
        left: left.round() as i32,
        width: width.round() as i32,
        side,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportSize = ViewportSize {
        width: 1024.0,
        height: 768.0,
    };

    fn trigger(top: f64, left: f64) -> Bounds {
        Bounds::new(top, left, top + 32.0, left + 160.0)
    }

    #[test]
    fn opens_below_when_there_is_room() {
        let p = place(trigger(100.0, 50.0), VIEWPORT, &PlacementConfig::default());
        assert_eq!(p.top, 132 + 8);
        assert_eq!(p.left, 50);
        assert_eq!(p.width, 200);
        assert_eq!(p.side, Side::Below);
    }

    #[test]
    fn clamps_away_from_the_right_edge() {
        let p = place(
            trigger(100.0, VIEWPORT.width - 50.0),
            VIEWPORT,
            &PlacementConfig::default(),
        );
        assert_eq!(p.left, 1024 - 200 - 8);
    }

    #[test]
    fn exactly_fitting_width_is_not_clamped() {
        // 816 + 200 == 1024 - 8
        let p = place(trigger(100.0, 816.0), VIEWPORT, &PlacementConfig::default());
        assert_eq!(p.left, 816);
    }

    #[test]
    fn narrow_viewport_clamps_to_margin() {
        let viewport = ViewportSize::new(150.0, 768.0);
        let p = place(trigger(100.0, 40.0), viewport, &PlacementConfig::default());
        assert_eq!(p.left, 8);
    }

    #[test]
    fn flips_above_near_the_bottom() {
        let t = trigger(700.0, 50.0);
        let p = place(t, VIEWPORT, &PlacementConfig::default());
        assert_eq!(p.top, 700 - 320 - 8);
        assert_eq!(p.side, Side::Above);
    }

    #[test]
    fn exact_fit_below_does_not_flip() {
        // bottom 432 + 8 + 320 == 768 - 8
        let t = Bounds::new(400.0, 50.0, 432.0, 210.0);
        let p = place(t, VIEWPORT, &PlacementConfig::default());
        assert_eq!(p.top, 440);
        assert_eq!(p.side, Side::Below);
    }

    #[test]
    fn keeps_overflowing_downward_when_neither_side_fits() {
        let viewport = ViewportSize::new(1024.0, 300.0);
        let t = trigger(100.0, 50.0);
        let p = place(t, viewport, &PlacementConfig::default());
        assert_eq!(p.top, 140);
        assert_eq!(p.side, Side::Below);
    }

    #[test]
    fn flip_requires_the_margin_above() {
        // candidate = 335 - 320 - 8 = 7 < 8
        let viewport = ViewportSize::new(1024.0, 500.0);
        let p = place(trigger(335.0, 0.0), viewport, &PlacementConfig::default());
        assert_eq!(p.side, Side::Below);

        // candidate = 336 - 328 = 8, accepted
        let p = place(trigger(336.0, 0.0), viewport, &PlacementConfig::default());
        assert_eq!(p.side, Side::Above);
        assert_eq!(p.top, 8);
    }

    #[test]
    fn coordinates_are_rounded() {
        let t = Bounds::new(10.0, 10.4, 20.6, 100.0);
        let p = place(t, VIEWPORT, &PlacementConfig::default());
        assert_eq!(p.left, 10);
        assert_eq!(p.top, 29);
    }

    #[test]
    fn empty_area_cannot_be_measured() {
        assert_eq!(Bounds::measure(Rect::new(3, 4, 0, 1)), None);
        assert_eq!(
            Bounds::measure(Rect::new(3, 4, 10, 1)),
            Some(Bounds::new(4.0, 3.0, 5.0, 13.0))
        );
    }

    #[test]
    fn terminal_cells() {
        let screen = Rect::new(0, 0, 80, 24);
        let t = Bounds::measure(Rect::new(2, 2, 20, 3)).expect("non-empty");
        let p = place(t, screen.into(), &PlacementConfig::TERMINAL);
        assert_eq!((p.top, p.left, p.width), (6, 2, 16));

        let t = Bounds::measure(Rect::new(70, 18, 10, 3)).expect("non-empty");
        let p = place(t, screen.into(), &PlacementConfig::TERMINAL);
        assert_eq!(p.left, 80 - 16 - 1);
        assert_eq!(p.top, 18 - 12 - 1);
        assert_eq!(p.side, Side::Above);
    }

    #[test]
    fn to_rect_clips_to_screen() {
        let screen = Rect::new(0, 0, 40, 10);
        let p = Placement {
            top: 6,
            left: 30,
            width: 16,
            side: Side::Below,
        };
        assert_eq!(p.to_rect(12, screen), Rect::new(30, 6, 10, 4));

        let off = Placement {
            top: -3,
            left: -2,
            width: 5,
            side: Side::Above,
        };
        assert_eq!(off.to_rect(4, screen), Rect::new(0, 0, 3, 1));
    }
}
