//! Polar geometry of the color wheel: a hue ring around an inscribed
//! saturation/value square.
//!
//! Hue 0° points up and increases clockwise in screen space (y grows
//! downward). The square's left edge is saturation 0, its top edge value 1.

use floem::kurbo::{Point, Size, Vec2};

use crate::constants;
use crate::error::ConfigError;
use crate::math;

/// Ring sizing, scaled by display density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelConfig {
    ring_width: f64,
    padding: f64,
    density: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            ring_width: constants::RING_WIDTH,
            padding: constants::WHEEL_PADDING,
            density: 1.0,
        }
    }
}

impl WheelConfig {
    /// A config with the given ring width in logical pixels.
    pub fn new(ring_width: f64) -> Result<Self, ConfigError> {
        Self::default().with_ring_width(ring_width)
    }

    pub fn with_ring_width(mut self, ring_width: f64) -> Result<Self, ConfigError> {
        if !ring_width.is_finite() || ring_width < 0.0 {
            return Err(ConfigError::RingWidth(ring_width));
        }
        self.ring_width = ring_width;
        Ok(self)
    }

    pub fn with_padding(mut self, padding: f64) -> Result<Self, ConfigError> {
        if !padding.is_finite() || padding < 0.0 {
            return Err(ConfigError::Padding(padding));
        }
        self.padding = padding;
        Ok(self)
    }

    pub fn with_density(mut self, density: f64) -> Result<Self, ConfigError> {
        if !density.is_finite() || density <= 0.0 {
            return Err(ConfigError::Density(density));
        }
        self.density = density;
        Ok(self)
    }

    pub fn ring_width(&self) -> f64 {
        self.ring_width
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn density(&self) -> f64 {
        self.density
    }
}

/// Which interactive part of the wheel a point falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ring,
    Square,
    None,
}

/// Geometry derived from the widget bounds. Cheap to rebuild; rebuild it
/// whenever the bounds change rather than patching it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
    half_square: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self::new(Size::ZERO, &WheelConfig::default())
    }
}

impl WheelGeometry {
    pub fn new(size: Size, config: &WheelConfig) -> Self {
        let side = size.width.min(size.height).max(0.0);
        let outer_radius = side / 2.0 - config.padding;
        let inner_radius = (outer_radius - config.ring_width * config.density).max(0.0);
        Self {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            outer_radius,
            inner_radius,
            half_square: inner_radius * constants::SQUARE_RATIO / 2.0,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Half the side of the saturation/value square.
    pub fn half_square(&self) -> f64 {
        self.half_square
    }

    pub fn square_side(&self) -> f64 {
        self.half_square * 2.0
    }

    /// Bounds too small to hold a ring.
    pub fn is_degenerate(&self) -> bool {
        self.outer_radius <= 0.0
    }

    /// Classify a point. The annulus is closed on both radii and tested
    /// first, so the inner circle itself belongs to the ring.
    pub fn region_at(&self, p: Point) -> Region {
        if self.is_degenerate() {
            return Region::None;
        }
        let d = p.distance(self.center);
        if d >= self.inner_radius && d <= self.outer_radius {
            return Region::Ring;
        }
        let off = p - self.center;
        if off.x.abs() <= self.half_square && off.y.abs() <= self.half_square {
            return Region::Square;
        }
        Region::None
    }

    /// Hue in degrees under `p`. Any point is accepted; the center itself has
    /// no direction and maps to 90.
    pub fn hue_at(&self, p: Point) -> f64 {
        let off = p - self.center;
        let degrees = off.y.atan2(off.x).to_degrees() + 90.0;
        math::normalize_hue(degrees)
    }

    /// Saturation and value under `p`, clamped to the square's edges.
    pub fn saturation_value_at(&self, p: Point) -> (f64, f64) {
        let side = self.square_side().max(f64::EPSILON);
        let left = self.center.x - self.half_square;
        let top = self.center.y - self.half_square;
        let s = math::clamp_unit((p.x - left) / side);
        let v = math::clamp_unit(1.0 - (p.y - top) / side);
        (s, v)
    }

    /// Where the hue marker sits: on the ring's mid radius.
    pub fn hue_indicator(&self, hue: f64) -> Point {
        let angle = (hue - 90.0).to_radians();
        let r = (self.inner_radius + self.outer_radius.max(0.0)) / 2.0;
        self.center + Vec2::new(angle.cos(), angle.sin()) * r
    }

    /// Where the saturation/value marker sits inside the square.
    pub fn sv_indicator(&self, saturation: f64, value: f64) -> Point {
        let side = self.square_side();
        Point::new(
            self.center.x - self.half_square + saturation * side,
            self.center.y - self.half_square + (1.0 - value) * side,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel_200() -> WheelGeometry {
        let config = WheelConfig::new(20.0).unwrap();
        WheelGeometry::new(Size::new(200.0, 200.0), &config)
    }

    #[test]
    fn test_dimensions() {
        let g = wheel_200();
        assert_eq!(g.center(), Point::new(100.0, 100.0));
        assert!((g.outer_radius() - 98.0).abs() < 1e-9);
        assert!((g.inner_radius() - 78.0).abs() < 1e-9);
        assert!((g.square_side() - 78.0 * 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_density_scales_ring() {
        let config = WheelConfig::new(20.0).unwrap().with_density(2.0).unwrap();
        let g = WheelGeometry::new(Size::new(200.0, 200.0), &config);
        assert!((g.inner_radius() - 58.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_square_bounds_use_short_side() {
        let g = WheelGeometry::new(Size::new(300.0, 100.0), &WheelConfig::default());
        assert_eq!(g.center(), Point::new(150.0, 50.0));
        assert!((g.outer_radius() - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_regions() {
        let g = wheel_200();
        assert_eq!(g.region_at(Point::new(100.0, 2.0)), Region::Ring);
        assert_eq!(g.region_at(Point::new(198.0, 100.0)), Region::Ring);
        assert_eq!(g.region_at(Point::new(100.0, 100.0)), Region::Square);
        assert_eq!(g.region_at(Point::new(0.0, 0.0)), Region::None);
        assert_eq!(g.region_at(Point::new(199.5, 100.0)), Region::None);
    }

    #[test]
    fn test_inner_radius_boundary_is_ring() {
        let g = wheel_200();
        assert_eq!(g.region_at(Point::new(100.0 + 78.0, 100.0)), Region::Ring);
        assert_eq!(g.region_at(Point::new(100.0, 100.0 - 78.0)), Region::Ring);
    }

    #[test]
    fn test_regions_are_exclusive() {
        // The square's corners sit inside the inner circle, so a sweep over
        // the whole widget never finds a point that would satisfy both tests.
        let g = wheel_200();
        for yi in 0..=100 {
            for xi in 0..=100 {
                let p = Point::new(xi as f64 * 2.0, yi as f64 * 2.0);
                let d = p.distance(g.center());
                let in_ring = d >= g.inner_radius() && d <= g.outer_radius();
                let off = p - g.center();
                let in_square =
                    off.x.abs() <= g.half_square() && off.y.abs() <= g.half_square();
                assert!(!(in_ring && in_square), "{p:?} is in both regions");
            }
        }
    }

    #[test]
    fn test_hue_orientation() {
        let g = wheel_200();
        assert!(g.hue_at(Point::new(100.0, 2.0)).abs() < 1e-9);
        assert!((g.hue_at(Point::new(198.0, 100.0)) - 90.0).abs() < 1e-9);
        assert!((g.hue_at(Point::new(100.0, 198.0)) - 180.0).abs() < 1e-9);
        assert!((g.hue_at(Point::new(2.0, 100.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_hue_outside_bounds() {
        let g = wheel_200();
        assert!((g.hue_at(Point::new(500.0, 100.0)) - 90.0).abs() < 1e-9);
        let h = g.hue_at(Point::new(-50.0, -50.0));
        assert!((h - 315.0).abs() < 1e-9);
    }

    #[test]
    fn test_hue_at_center() {
        let g = wheel_200();
        assert!((g.hue_at(g.center()) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_saturation_value_mapping() {
        let g = wheel_200();
        let half = g.half_square();
        let (s, v) = g.saturation_value_at(Point::new(100.0 - half, 100.0 - half));
        assert!(s.abs() < 1e-9 && (v - 1.0).abs() < 1e-9);
        let (s, v) = g.saturation_value_at(Point::new(100.0 + half, 100.0 + half));
        assert!((s - 1.0).abs() < 1e-9 && v.abs() < 1e-9);
        let (s, v) = g.saturation_value_at(Point::new(100.0, 100.0));
        assert!((s - 0.5).abs() < 1e-9 && (v - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_saturation_value_clamps() {
        let g = wheel_200();
        assert_eq!(g.saturation_value_at(Point::new(-400.0, -400.0)), (0.0, 1.0));
        assert_eq!(g.saturation_value_at(Point::new(900.0, 900.0)), (1.0, 0.0));
    }

    #[test]
    fn test_indicators_invert_mapping() {
        let g = wheel_200();
        let p = g.sv_indicator(0.3, 0.8);
        let (s, v) = g.saturation_value_at(p);
        assert!((s - 0.3).abs() < 1e-9 && (v - 0.8).abs() < 1e-9);
        let marker = g.hue_indicator(135.0);
        assert!((g.hue_at(marker) - 135.0).abs() < 1e-9);
        assert_eq!(g.region_at(marker), Region::Ring);
    }

    #[test]
    fn test_degenerate_geometry() {
        let g = WheelGeometry::new(Size::new(3.0, 3.0), &WheelConfig::default());
        assert!(g.is_degenerate());
        assert_eq!(g.region_at(Point::new(1.5, 1.5)), Region::None);
        let (s, v) = g.saturation_value_at(Point::new(10.0, -10.0));
        assert!((0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&v));
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(WheelConfig::new(-1.0), Err(ConfigError::RingWidth(-1.0)));
        assert!(WheelConfig::default().with_density(0.0).is_err());
        assert!(WheelConfig::default().with_padding(f64::INFINITY).is_err());
    }
}
