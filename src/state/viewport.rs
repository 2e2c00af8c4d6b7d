// Pan/zoom controller for the diagram's view region.
//
// Owns the visible rectangle and the in-flight gesture, and turns raw
// pointer/touch geometry into region mutations. Every operation is a pure
// in-memory transformation; degenerate input (zero-area surface, zero
// two-finger distance, non-finite coordinates) skips the update so the
// region always holds the last valid value.

use super::gesture::{Gesture, ScreenPoint};
use super::region::{BASE_HEIGHT, BASE_WIDTH, ViewRegion};

/// Hard floor for every zoom path (25x magnification).
pub const MIN_SCALE: f64 = 0.04;
/// Pinch ceiling: the region never grows past the base extent.
pub const MAX_PINCH_SCALE: f64 = 1.0;
/// Wheel and fixed-step ceiling.
pub const MAX_SCALE: f64 = 2.0;

/// Vertical pan compensation for the taller-than-wide diagram.
pub const PAN_Y_BOOST: f64 = 1.5;
/// Same compensation applied to midpoint drift during a pinch.
pub const PINCH_PAN_Y_BOOST: f64 = 2.5;

/// Fixed-step factors for the zoom buttons.
pub const STEP_IN_FACTOR: f64 = 0.8;
pub const STEP_OUT_FACTOR: f64 = 1.2;

const WHEEL_OUT_FACTOR: f64 = 1.1;
const WHEEL_IN_FACTOR: f64 = 0.9;
/// Two-finger distances below this many pixels are treated as degenerate.
const MIN_TOUCH_DIST: f64 = 1.0;

/// Pixel dimensions of the rendering surface at event time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_usable(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Viewport {
    region: ViewRegion,
    gesture: Gesture,
}

impl Viewport {
    pub fn new(region: ViewRegion) -> Self {
        Self { region, gesture: Gesture::Idle }
    }

    pub fn region(&self) -> ViewRegion {
        self.region
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_gesturing(&self) -> bool {
        self.gesture.is_active()
    }

    /// Starts a single-pointer drag, replacing any active gesture.
    pub fn begin_pan(&mut self, anchor: ScreenPoint) {
        self.gesture = Gesture::Panning { anchor, base: self.region };
    }

    /// Starts a two-finger pinch, replacing any active gesture. The start
    /// distance is floored at one pixel so a degenerate begin stays inert.
    pub fn begin_pinch(&mut self, p0: ScreenPoint, p1: ScreenPoint) {
        let mid = p0.midpoint(p1);
        self.gesture = Gesture::Pinching {
            start_dist: p0.distance(p1).max(MIN_TOUCH_DIST),
            start_scale: self.region.scale(),
            start_mid: mid,
            last_mid: mid,
            base: self.region,
        };
    }

    /// Ends whatever gesture is active. A finger left on the surface after
    /// a pinch does not resume panning until a fresh begin.
    pub fn end(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Drags the region by the pointer movement since the last applied
    /// move. Returns true when the region changed.
    pub fn pan_move(&mut self, point: ScreenPoint, surface: Surface) -> bool {
        let Gesture::Panning { anchor, base } = self.gesture else {
            return false;
        };
        if !surface.is_usable() || !point.is_finite() {
            return false;
        }
        // Deltas scale against the live region, not the gesture snapshot:
        // a wheel or button zoom can land mid-drag and resize it.
        let dx = (point.x - anchor.x) * self.region.width / surface.width;
        let dy = (point.y - anchor.y) * self.region.height / surface.height * PAN_Y_BOOST;
        let next = ViewRegion::new(
            self.region.x - dx,
            self.region.y - dy,
            self.region.width,
            self.region.height,
        );
        if !next.is_finite() {
            return false;
        }
        self.region = next;
        self.gesture = Gesture::Panning { anchor: point, base };
        true
    }

    /// Rescales around the initial pinch midpoint and pans by the current
    /// midpoint's increment. Returns true when the region changed.
    pub fn pinch_move(&mut self, p0: ScreenPoint, p1: ScreenPoint, surface: Surface) -> bool {
        let Gesture::Pinching { start_dist, start_scale, start_mid, last_mid, base } =
            self.gesture
        else {
            return false;
        };
        if !surface.is_usable() || !p0.is_finite() || !p1.is_finite() {
            return false;
        }
        let dist = p0.distance(p1);
        if !dist.is_finite() || dist < MIN_TOUCH_DIST {
            return false;
        }

        // Fingers apart -> factor below one -> smaller region -> zoom in.
        let scale = (start_scale * (start_dist / dist)).clamp(MIN_SCALE, MAX_PINCH_SCALE);
        let width = BASE_WIDTH * scale;
        let height = BASE_HEIGHT * scale;

        // The plane point that sat under the initial midpoint stays fixed
        // as the scale changes; accumulated midpoint pan rides along in
        // the region itself.
        let anchor_x = self.region.x + start_mid.x / surface.width * self.region.width;
        let anchor_y = self.region.y + start_mid.y / surface.height * self.region.height;
        let mut x = anchor_x - start_mid.x / surface.width * width;
        let mut y = anchor_y - start_mid.y / surface.height * height;

        // Both fingers drifting together pans by the midpoint increment.
        let mid = p0.midpoint(p1);
        x -= (mid.x - last_mid.x) * width / surface.width;
        y -= (mid.y - last_mid.y) * height / surface.height * PINCH_PAN_Y_BOOST;

        let next = ViewRegion::new(x, y, width, height);
        if !next.is_finite() {
            return false;
        }
        self.region = next;
        self.gesture = Gesture::Pinching {
            start_dist,
            start_scale,
            start_mid,
            last_mid: mid,
            base,
        };
        true
    }

    /// Discrete wheel zoom anchored at the cursor. Stateless between
    /// calls: it reads the current region, never a gesture snapshot.
    pub fn wheel_zoom(&mut self, cursor: ScreenPoint, delta_y: f64, surface: Surface) -> bool {
        if !delta_y.is_finite() {
            return false;
        }
        // Scroll down zooms out.
        let factor = if delta_y > 0.0 { WHEEL_OUT_FACTOR } else { WHEEL_IN_FACTOR };
        self.zoom_about(cursor, factor, surface)
    }

    /// Fixed-step zoom about the region's own center, for the button
    /// controls.
    pub fn zoom_step(&mut self, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let (width, height) = self.scaled_dimensions(factor);
        let (cx, cy) = self.region.center();
        let next = ViewRegion::new(cx - width / 2.0, cy - height / 2.0, width, height);
        if !next.is_finite() {
            return false;
        }
        self.region = next;
        true
    }

    /// Puts the whole diagram back in view.
    pub fn reset(&mut self) {
        self.region = ViewRegion::base();
        self.gesture = Gesture::Idle;
    }

    fn zoom_about(&mut self, cursor: ScreenPoint, factor: f64, surface: Surface) -> bool {
        if !surface.is_usable() || !cursor.is_finite() {
            return false;
        }
        let region = self.region;
        let plane_x = region.x + cursor.x / surface.width * region.width;
        let plane_y = region.y + cursor.y / surface.height * region.height;
        let (width, height) = self.scaled_dimensions(factor);
        let next = ViewRegion::new(
            plane_x - (plane_x - region.x) / region.width * width,
            plane_y - (plane_y - region.y) / region.height * height,
            width,
            height,
        );
        if !next.is_finite() {
            return false;
        }
        self.region = next;
        true
    }

    /// Applies `factor` to both dimensions, clamped on scale, preserving
    /// the region's own aspect ratio (it may differ from the base extent's
    /// after the portrait preset).
    fn scaled_dimensions(&self, factor: f64) -> (f64, f64) {
        let region = self.region;
        let scale = (region.scale() * factor).clamp(MIN_SCALE, MAX_SCALE);
        let width = BASE_WIDTH * scale;
        let height = region.height * (width / region.width);
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1900x1500 plane over 950x750 px = exactly 2 plane units per pixel.
    const SURFACE: Surface = Surface::new(950.0, 750.0);

    fn base_viewport() -> Viewport {
        Viewport::new(ViewRegion::base())
    }

    #[test]
    fn pan_subtracts_the_cumulative_plane_delta() {
        let mut vp = base_viewport();
        vp.begin_pan(ScreenPoint::new(100.0, 100.0));

        assert!(vp.pan_move(ScreenPoint::new(130.0, 100.0), SURFACE));
        assert!((vp.region().x - -60.0).abs() < 1e-9);
        assert!((vp.region().y - 0.0).abs() < 1e-9);

        assert!(vp.pan_move(ScreenPoint::new(130.0, 80.0), SURFACE));
        assert!((vp.region().x - -60.0).abs() < 1e-9);
        // dy of -20 px doubles into the plane and takes the 1.5x boost.
        assert!((vp.region().y - 60.0).abs() < 1e-9);

        // Dimensions are untouched by panning.
        assert_eq!(vp.region().width, 1900.0);
        assert_eq!(vp.region().height, 1500.0);
    }

    #[test]
    fn pan_anchor_advances_with_each_move() {
        let mut vp = base_viewport();
        vp.begin_pan(ScreenPoint::new(50.0, 50.0));
        assert!(vp.pan_move(ScreenPoint::new(60.0, 50.0), SURFACE));
        let after_first = vp.region();
        // Re-delivering the same position is a zero delta, not a re-applied one.
        assert!(vp.pan_move(ScreenPoint::new(60.0, 50.0), SURFACE));
        assert_eq!(vp.region(), after_first);
    }

    #[test]
    fn wheel_zoom_mid_drag_rescales_later_pan_deltas() {
        let mut vp = base_viewport();
        let surface = Surface::new(1000.0, 800.0);
        vp.begin_pan(ScreenPoint::new(500.0, 400.0));

        // The wheel is still live while the button is held.
        assert!(vp.wheel_zoom(ScreenPoint::new(500.0, 400.0), 100.0, surface));
        let zoomed = vp.region();
        assert!((zoomed.width - 2090.0).abs() < 1e-9);
        assert!(vp.is_gesturing());

        // A 10 px move now covers 20.9 plane units, not the 19 the
        // pre-zoom dimensions would give.
        assert!(vp.pan_move(ScreenPoint::new(510.0, 410.0), surface));
        let r = vp.region();
        assert!((r.x - (zoomed.x - 10.0 * 2090.0 / 1000.0)).abs() < 1e-9);
        assert!((r.y - (zoomed.y - 10.0 * 1650.0 / 800.0 * 1.5)).abs() < 1e-9);
        assert_eq!(r.width, zoomed.width);
        assert_eq!(r.height, zoomed.height);
    }

    #[test]
    fn moves_without_a_gesture_are_ignored() {
        let mut vp = base_viewport();
        assert!(!vp.pan_move(ScreenPoint::new(10.0, 10.0), SURFACE));
        assert!(!vp.pinch_move(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(100.0, 0.0),
            SURFACE
        ));
        assert_eq!(vp.region(), ViewRegion::base());
    }

    #[test]
    fn moves_after_end_are_ignored() {
        let mut vp = base_viewport();
        vp.begin_pan(ScreenPoint::new(0.0, 0.0));
        vp.end();
        assert!(!vp.is_gesturing());
        assert!(!vp.pan_move(ScreenPoint::new(40.0, 40.0), SURFACE));
        assert_eq!(vp.region(), ViewRegion::base());
    }

    #[test]
    fn pan_skips_zero_area_surfaces() {
        let mut vp = base_viewport();
        vp.begin_pan(ScreenPoint::new(0.0, 0.0));
        assert!(!vp.pan_move(ScreenPoint::new(10.0, 10.0), Surface::new(0.0, 0.0)));
        assert_eq!(vp.region(), ViewRegion::base());
    }

    #[test]
    fn spreading_fingers_zooms_in() {
        let mut vp = base_viewport();
        let surface = Surface::new(1000.0, 800.0);
        vp.begin_pinch(ScreenPoint::new(450.0, 400.0), ScreenPoint::new(550.0, 400.0));
        // 100 px grows to 200 px: the scale factor halves.
        assert!(vp.pinch_move(
            ScreenPoint::new(400.0, 400.0),
            ScreenPoint::new(600.0, 400.0),
            surface
        ));
        assert!((vp.region().scale() - 0.5).abs() < 1e-9);
        assert!((vp.region().width - 950.0).abs() < 1e-9);
        assert!((vp.region().height - 750.0).abs() < 1e-9);
    }

    #[test]
    fn pinch_scale_stays_clamped_after_every_move() {
        let mut vp = base_viewport();
        let surface = Surface::new(1000.0, 800.0);
        vp.begin_pinch(ScreenPoint::new(450.0, 400.0), ScreenPoint::new(550.0, 400.0));

        // Fingers closing would push the scale to 2.0; the pinch ceiling holds.
        assert!(vp.pinch_move(
            ScreenPoint::new(475.0, 400.0),
            ScreenPoint::new(525.0, 400.0),
            surface
        ));
        assert!((vp.region().scale() - 1.0).abs() < 1e-9);

        // A huge spread would drop below the floor; the floor holds.
        assert!(vp.pinch_move(
            ScreenPoint::new(0.0, 400.0),
            ScreenPoint::new(5000.0, 400.0),
            surface
        ));
        assert!((vp.region().scale() - MIN_SCALE).abs() < 1e-9);
        assert!(vp.region().scale() >= MIN_SCALE - 1e-12);
        assert!(vp.region().scale() <= MAX_PINCH_SCALE + 1e-12);
    }

    #[test]
    fn pinch_keeps_the_initial_midpoint_fixed_in_the_plane() {
        let mut vp = base_viewport();
        let surface = Surface::new(1000.0, 600.0);
        let mid = ScreenPoint::new(500.0, 300.0);
        vp.begin_pinch(ScreenPoint::new(400.0, 300.0), ScreenPoint::new(600.0, 300.0));

        let plane_before = (
            vp.region().x + mid.x / surface.width * vp.region().width,
            vp.region().y + mid.y / surface.height * vp.region().height,
        );
        // Two symmetric spreads: the midpoint never moves.
        assert!(vp.pinch_move(
            ScreenPoint::new(350.0, 300.0),
            ScreenPoint::new(650.0, 300.0),
            surface
        ));
        assert!(vp.pinch_move(
            ScreenPoint::new(300.0, 300.0),
            ScreenPoint::new(700.0, 300.0),
            surface
        ));
        let plane_after = (
            vp.region().x + mid.x / surface.width * vp.region().width,
            vp.region().y + mid.y / surface.height * vp.region().height,
        );
        assert!((plane_after.0 - plane_before.0).abs() < 1e-9);
        assert!((plane_after.1 - plane_before.1).abs() < 1e-9);
    }

    #[test]
    fn pinch_midpoint_drift_pans_the_region() {
        let mut vp = base_viewport();
        let surface = Surface::new(1000.0, 800.0);
        vp.begin_pinch(ScreenPoint::new(450.0, 400.0), ScreenPoint::new(550.0, 400.0));
        let before = vp.region();
        // Same 100 px spacing, both fingers shifted 40 px right: pure pan.
        assert!(vp.pinch_move(
            ScreenPoint::new(490.0, 400.0),
            ScreenPoint::new(590.0, 400.0),
            surface
        ));
        let after = vp.region();
        assert_eq!(after.width, before.width);
        // 40 px at 1900 plane units per 1000 px.
        assert!((after.x - (before.x - 40.0 * 1900.0 / 1000.0)).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn degenerate_pinch_distance_keeps_the_last_valid_region() {
        let mut vp = base_viewport();
        let surface = Surface::new(1000.0, 800.0);
        vp.begin_pinch(ScreenPoint::new(450.0, 400.0), ScreenPoint::new(550.0, 400.0));
        assert!(vp.pinch_move(
            ScreenPoint::new(400.0, 400.0),
            ScreenPoint::new(600.0, 400.0),
            surface
        ));
        let valid = vp.region();

        // Fingers collapsing onto one point must not divide by zero.
        let p = ScreenPoint::new(500.0, 400.0);
        assert!(!vp.pinch_move(p, p, surface));
        assert_eq!(vp.region(), valid);
        assert!(vp.region().is_finite());
    }

    #[test]
    fn second_touch_interrupts_a_pan() {
        let mut vp = base_viewport();
        vp.begin_pan(ScreenPoint::new(100.0, 100.0));
        assert!(vp.pan_move(ScreenPoint::new(150.0, 100.0), SURFACE));
        let at_interrupt = vp.region();

        vp.begin_pinch(ScreenPoint::new(100.0, 100.0), ScreenPoint::new(200.0, 100.0));
        match vp.gesture() {
            Gesture::Pinching { start_scale, base, .. } => {
                assert_eq!(base, at_interrupt);
                assert!((start_scale - at_interrupt.scale()).abs() < 1e-12);
            }
            other => panic!("expected a pinch, got {other:?}"),
        }
    }

    #[test]
    fn wheel_zoom_out_keeps_the_cursor_point_fixed() {
        let mut vp = base_viewport();
        let surface = Surface::new(1000.0, 800.0);
        let cursor = ScreenPoint::new(500.0, 400.0);

        assert!(vp.wheel_zoom(cursor, 100.0, surface));
        let r = vp.region();
        assert!((r.width - 2090.0).abs() < 1e-9);
        assert!((r.height - 1650.0).abs() < 1e-9);
        assert!((r.x - -95.0).abs() < 1e-9);
        assert!((r.y - -75.0).abs() < 1e-9);
        // The plane point that was under the cursor is still under it.
        assert!((r.x + cursor.x / surface.width * r.width - 950.0).abs() < 1e-9);
        assert!((r.y + cursor.y / surface.height * r.height - 750.0).abs() < 1e-9);
    }

    #[test]
    fn wheel_zoom_respects_both_scale_bounds() {
        let surface = Surface::new(1000.0, 800.0);
        let cursor = ScreenPoint::new(250.0, 200.0);

        let mut vp = base_viewport();
        for _ in 0..40 {
            vp.wheel_zoom(cursor, 100.0, surface);
            assert!(vp.region().scale() <= MAX_SCALE + 1e-12);
        }
        assert!((vp.region().scale() - MAX_SCALE).abs() < 1e-9);

        let mut vp = base_viewport();
        for _ in 0..80 {
            vp.wheel_zoom(cursor, -100.0, surface);
            assert!(vp.region().scale() >= MIN_SCALE - 1e-12);
        }
        assert!((vp.region().scale() - MIN_SCALE).abs() < 1e-9);
    }

    #[test]
    fn wheel_zoom_preserves_the_preset_aspect_ratio() {
        let mut vp = Viewport::new(ViewRegion::portrait_preset());
        let surface = Surface::new(390.0, 700.0);
        assert!(vp.wheel_zoom(ScreenPoint::new(195.0, 350.0), -100.0, surface));
        let r = vp.region();
        assert!((r.width - 630.0).abs() < 1e-9);
        assert!((r.height - 810.0).abs() < 1e-9);
        assert!((r.width / r.height - 700.0 / 900.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_step_zoom_round_trips() {
        let mut vp = base_viewport();
        assert!(vp.zoom_step(0.8));
        assert!(vp.zoom_step(1.25));
        let r = vp.region();
        assert!((r.x - 0.0).abs() < 1e-9);
        assert!((r.y - 0.0).abs() < 1e-9);
        assert!((r.width - 1900.0).abs() < 1e-9);
        assert!((r.height - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_step_zoom_keeps_the_center() {
        let mut vp = Viewport::new(ViewRegion::new(200.0, 100.0, 950.0, 750.0));
        let before = vp.region().center();
        assert!(vp.zoom_step(STEP_IN_FACTOR));
        let after = vp.region().center();
        assert!((after.0 - before.0).abs() < 1e-9);
        assert!((after.1 - before.1).abs() < 1e-9);
        assert!((vp.region().width - 760.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_the_base_extent_from_any_state() {
        let mut vp = Viewport::new(ViewRegion::portrait_preset());
        let surface = Surface::new(1000.0, 800.0);
        vp.begin_pan(ScreenPoint::new(10.0, 10.0));
        vp.pan_move(ScreenPoint::new(90.0, 70.0), surface);
        vp.begin_pinch(ScreenPoint::new(450.0, 400.0), ScreenPoint::new(550.0, 400.0));
        vp.pinch_move(ScreenPoint::new(400.0, 400.0), ScreenPoint::new(600.0, 400.0), surface);
        vp.wheel_zoom(ScreenPoint::new(10.0, 10.0), 100.0, surface);

        vp.reset();
        assert_eq!(vp.region(), ViewRegion::new(0.0, 0.0, 1900.0, 1500.0));
        assert!(!vp.is_gesturing());
    }
}
