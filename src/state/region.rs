// Plane-space rectangle written to the diagram's viewBox.

/// Width of the diagram's intrinsic coordinate space.
pub const BASE_WIDTH: f64 = 1900.0;
/// Height of the diagram's intrinsic coordinate space.
pub const BASE_HEIGHT: f64 = 1500.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ViewRegion {
    fn default() -> Self {
        Self::base()
    }
}

impl ViewRegion {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The full diagram extent.
    pub const fn base() -> Self {
        Self::new(0.0, 0.0, BASE_WIDTH, BASE_HEIGHT)
    }

    /// Tighter initial window for narrow portrait screens.
    pub const fn portrait_preset() -> Self {
        Self::new(600.0, 300.0, 700.0, 900.0)
    }

    /// Zoom level relative to the base extent (1.0 = whole diagram wide).
    pub fn scale(&self) -> f64 {
        self.width / BASE_WIDTH
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Formats as an SVG viewBox attribute value.
    pub fn to_attribute(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.width, self.height)
    }

    /// Parses a viewBox attribute. Anything but four finite numbers with
    /// positive dimensions yields `None`.
    pub fn parse_attribute(attr: &str) -> Option<Self> {
        let mut parts = attr.split_whitespace();
        let x = parts.next()?.parse::<f64>().ok()?;
        let y = parts.next()?.parse::<f64>().ok()?;
        let width = parts.next()?.parse::<f64>().ok()?;
        let height = parts.next()?.parse::<f64>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        let region = Self::new(x, y, width, height);
        (region.is_finite() && width > 0.0 && height > 0.0).then_some(region)
    }
}
