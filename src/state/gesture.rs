// Gesture snapshots driving the viewport controller.
use super::region::ViewRegion;

/// Surface-relative pointer position in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(self, other: Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// At most one gesture is live at a time; beginning a new one replaces
/// whatever was active.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Single-pointer drag. `anchor` advances to the latest pointer
    /// position after every applied move.
    Panning { anchor: ScreenPoint, base: ViewRegion },
    /// Two-finger pinch. Distance, scale and midpoint are snapshotted at
    /// gesture start; `last_mid` trails the midpoint so each move pans by
    /// its increment only.
    Pinching {
        start_dist: f64,
        start_scale: f64,
        start_mid: ScreenPoint,
        last_mid: ScreenPoint,
        base: ViewRegion,
    },
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_the_mean_of_both_points() {
        let m = ScreenPoint::new(100.0, 200.0).midpoint(ScreenPoint::new(300.0, 400.0));
        assert!((m.x - 200.0).abs() < 1e-9);
        assert!((m.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn distance_is_euclidean() {
        let d = ScreenPoint::new(0.0, 0.0).distance(ScreenPoint::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn distance_of_coincident_points_is_zero() {
        let p = ScreenPoint::new(42.0, 17.0);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn idle_is_the_default_and_inactive() {
        let g = Gesture::default();
        assert_eq!(g, Gesture::Idle);
        assert!(!g.is_active());
        let panning = Gesture::Panning {
            anchor: ScreenPoint::default(),
            base: ViewRegion::base(),
        };
        assert!(panning.is_active());
    }
}
