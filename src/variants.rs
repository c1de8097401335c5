//! Color variants: twelve one-axis nudges around a primary color.
//!
//! Hue steps wrap around the circle while saturation, value and the RGB
//! channels clamp at their ends. Clicking a cell adopts that cell's color as
//! the new primary; the grid is rebuilt once from the new primary, never
//! from a cell that was itself derived.

use std::f64::consts::TAU;

use floem::kurbo::{Circle, Point, Rect, Shape, Size, Vec2};

use crate::color::{Hsv, SolidColor};
use crate::constants;
use crate::wheel::ColorChange;

/// Number of cells, primary included.
pub const VARIANT_COUNT: usize = 13;

/// Cell identity. The discriminant is the cell's index in a [`VariantSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Primary = 0,
    HueUp = 1,
    SaturationUp = 2,
    ValueUp = 3,
    RedUp = 4,
    GreenUp = 5,
    BlueUp = 6,
    ValueDown = 7,
    SaturationDown = 8,
    HueDown = 9,
    BlueDown = 10,
    GreenDown = 11,
    RedDown = 12,
}

impl Variant {
    pub const ALL: [Variant; VARIANT_COUNT] = [
        Variant::Primary,
        Variant::HueUp,
        Variant::SaturationUp,
        Variant::ValueUp,
        Variant::RedUp,
        Variant::GreenUp,
        Variant::BlueUp,
        Variant::ValueDown,
        Variant::SaturationDown,
        Variant::HueDown,
        Variant::BlueDown,
        Variant::GreenDown,
        Variant::RedDown,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Apply this variant's nudge to `primary`.
    pub fn apply(self, primary: SolidColor) -> SolidColor {
        let hsv = primary.to_hsv();
        let a = primary.a();
        let step = constants::CHANNEL_STEP;
        let nudge_hsv = |h: f64, s: f64, v: f64| Hsv::new(h, s, v).to_color(a);
        match self {
            Variant::Primary => primary,
            Variant::HueUp => nudge_hsv(hsv.hue + constants::HUE_STEP, hsv.saturation, hsv.value),
            Variant::HueDown => nudge_hsv(hsv.hue - constants::HUE_STEP, hsv.saturation, hsv.value),
            Variant::SaturationUp => nudge_hsv(hsv.hue, hsv.saturation + step, hsv.value),
            Variant::SaturationDown => nudge_hsv(hsv.hue, hsv.saturation - step, hsv.value),
            Variant::ValueUp => nudge_hsv(hsv.hue, hsv.saturation, hsv.value + step),
            Variant::ValueDown => nudge_hsv(hsv.hue, hsv.saturation, hsv.value - step),
            Variant::RedUp => primary.with_red(primary.r() + step),
            Variant::RedDown => primary.with_red(primary.r() - step),
            Variant::GreenUp => primary.with_green(primary.g() + step),
            Variant::GreenDown => primary.with_green(primary.g() - step),
            Variant::BlueUp => primary.with_blue(primary.b() + step),
            Variant::BlueDown => primary.with_blue(primary.b() - step),
        }
    }
}

/// The primary color and its twelve nudges, indexed by [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantSet([SolidColor; VARIANT_COUNT]);

impl VariantSet {
    pub fn primary(&self) -> SolidColor {
        self.0[0]
    }

    pub fn get(&self, variant: Variant) -> SolidColor {
        self.0[variant.index()]
    }

    pub fn as_slice(&self) -> &[SolidColor] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variant, SolidColor)> + '_ {
        Variant::ALL.iter().copied().zip(self.0.iter().copied())
    }
}

impl std::ops::Index<usize> for VariantSet {
    type Output = SolidColor;

    fn index(&self, index: usize) -> &SolidColor {
        &self.0[index]
    }
}

/// Build all thirteen cells from `primary`.
pub fn compute_variants(primary: SolidColor) -> VariantSet {
    VariantSet(Variant::ALL.map(|v| v.apply(primary)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantShape {
    /// Primary in the middle of a 4×4 grid, nudges around the edge.
    #[default]
    Rectangular,
    /// Primary disc in the middle, nudges on a circle around it.
    Circular,
}

/// Hit area of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellShape {
    Rect(Rect),
    Circle(Circle),
}

impl CellShape {
    pub fn contains(&self, p: Point) -> bool {
        match self {
            CellShape::Rect(r) => r.contains(p),
            CellShape::Circle(c) => c.contains(p),
        }
    }

    pub fn bounding_box(&self) -> Rect {
        match self {
            CellShape::Rect(r) => *r,
            CellShape::Circle(c) => c.bounding_box(),
        }
    }
}

/// Perimeter of a 4×4 grid, clockwise from the top-left corner. Cell `i`
/// of this table holds variant index `i + 1`.
const GRID_PERIMETER: [(usize, usize); VARIANT_COUNT - 1] = [
    (0, 0),
    (1, 0),
    (2, 0),
    (3, 0),
    (3, 1),
    (3, 2),
    (3, 3),
    (2, 3),
    (1, 3),
    (0, 3),
    (0, 2),
    (0, 1),
];

/// Variant grid state: cached set, cell layout and hover.
#[derive(Debug, Clone)]
pub struct VariantGrid {
    variants: VariantSet,
    shape: VariantShape,
    density: f64,
    size: Size,
    cells: Vec<CellShape>,
    hovered: Option<Variant>,
}

impl Default for VariantGrid {
    fn default() -> Self {
        Self::new(SolidColor::default())
    }
}

impl VariantGrid {
    pub fn new(primary: SolidColor) -> Self {
        Self {
            variants: compute_variants(primary),
            shape: VariantShape::default(),
            density: 1.0,
            size: Size::ZERO,
            cells: Vec::new(),
            hovered: None,
        }
    }

    pub fn with_shape(mut self, shape: VariantShape) -> Self {
        self.shape = shape;
        self.relayout();
        self
    }

    pub fn primary(&self) -> SolidColor {
        self.variants.primary()
    }

    pub fn variants(&self) -> &VariantSet {
        &self.variants
    }

    pub fn shape(&self) -> VariantShape {
        self.shape
    }

    pub fn hovered(&self) -> Option<Variant> {
        self.hovered
    }

    /// Cell hit areas in variant order. Empty until bounds are known.
    pub fn cells(&self) -> &[CellShape] {
        &self.cells
    }

    /// Set the primary from outside. Returns false when nothing changed.
    pub fn set_primary(&mut self, primary: SolidColor) -> bool {
        if primary == self.variants.primary() {
            return false;
        }
        self.variants = compute_variants(primary);
        true
    }

    pub fn set_shape(&mut self, shape: VariantShape) {
        self.shape = shape;
        self.relayout();
    }

    pub fn set_density(&mut self, density: f64) {
        if density.is_finite() && density > 0.0 {
            self.density = density;
            self.relayout();
        }
    }

    pub fn set_bounds(&mut self, size: Size) {
        self.size = size;
        self.relayout();
    }

    pub fn cell_at(&self, p: Point) -> Option<Variant> {
        self.cells
            .iter()
            .position(|cell| cell.contains(p))
            .and_then(Variant::from_index)
    }

    /// Track the hovered cell. Returns whether it changed.
    pub fn hover(&mut self, p: Point) -> bool {
        let hovered = self.cell_at(p);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    pub fn leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    /// Adopt the clicked cell's color. The cell color comes from the set
    /// built for the current primary.
    pub fn click(&mut self, p: Point) -> Option<ColorChange> {
        let variant = self.cell_at(p)?;
        let chosen = self.variants.get(variant);
        log::debug!("variant {:?} clicked: {}", variant, chosen.to_hex());
        self.set_primary(chosen);
        Some(ColorChange::internal(chosen))
    }

    fn relayout(&mut self) {
        self.cells = match self.shape {
            VariantShape::Rectangular => self.grid_cells(),
            VariantShape::Circular => self.circle_cells(),
        };
    }

    fn grid_cells(&self) -> Vec<CellShape> {
        let (w, h) = (self.size.width, self.size.height);
        if w <= 0.0 || h <= 0.0 {
            return Vec::new();
        }
        let gap = constants::VARIANT_GAP * self.density;
        let cell_w = ((w - 3.0 * gap) / 4.0).max(0.0);
        let cell_h = ((h - 3.0 * gap) / 4.0).max(0.0);
        let at = |col: usize, row: usize, span: f64| {
            let x = col as f64 * (cell_w + gap);
            let y = row as f64 * (cell_h + gap);
            Rect::new(
                x,
                y,
                x + cell_w * span + gap * (span - 1.0),
                y + cell_h * span + gap * (span - 1.0),
            )
        };
        let mut cells = Vec::with_capacity(VARIANT_COUNT);
        cells.push(CellShape::Rect(at(1, 1, 2.0)));
        cells.extend(
            GRID_PERIMETER
                .iter()
                .map(|&(col, row)| CellShape::Rect(at(col, row, 1.0))),
        );
        cells
    }

    fn circle_cells(&self) -> Vec<CellShape> {
        let (w, h) = (self.size.width, self.size.height);
        if w <= 0.0 || h <= 0.0 {
            return Vec::new();
        }
        let center = Point::new(w / 2.0, h / 2.0);
        let cell_r = constants::VARIANT_BOX_SIZE * self.density / 2.0;
        let orbit = (w.min(h) / 2.0 - cell_r).max(0.0);
        let primary_r = (orbit - cell_r - constants::VARIANT_GAP * self.density).max(cell_r);
        let mut cells = Vec::with_capacity(VARIANT_COUNT);
        cells.push(CellShape::Circle(Circle::new(center, primary_r)));
        for i in 0..VARIANT_COUNT - 1 {
            // Start at 12 o'clock and go clockwise.
            let angle = TAU * i as f64 / (VARIANT_COUNT - 1) as f64 - TAU / 4.0;
            let pos = center + Vec2::new(angle.cos(), angle.sin()) * orbit;
            cells.push(CellShape::Circle(Circle::new(pos, cell_r)));
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample() -> SolidColor {
        // hue 200, saturation 0.5, value 0.6
        Hsv::new(200.0, 0.5, 0.6).to_color(1.0)
    }

    fn hue_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_primary_is_first() {
        for c in [sample(), SolidColor::BLACK, SolidColor::WHITE, SolidColor::RED] {
            assert_eq!(compute_variants(c)[0], c);
        }
    }

    #[test]
    fn test_hsv_nudges_move_one_axis() {
        let p = sample();
        let base = p.to_hsv();
        let set = compute_variants(p);

        let up = set.get(Variant::HueUp).to_hsv();
        assert!(hue_distance(up.hue, base.hue + 30.0) < 1e-6);
        assert!((up.saturation - base.saturation).abs() < 1e-6);
        assert!((up.value - base.value).abs() < 1e-6);

        let down = set.get(Variant::HueDown).to_hsv();
        assert!(hue_distance(down.hue, base.hue - 30.0) < 1e-6);

        let sat = set.get(Variant::SaturationUp).to_hsv();
        assert!((sat.saturation - 0.7).abs() < 1e-6);
        assert!(hue_distance(sat.hue, base.hue) < 1e-6);
        assert!((sat.value - base.value).abs() < 1e-6);

        assert!((set.get(Variant::SaturationDown).to_hsv().saturation - 0.3).abs() < 1e-6);
        assert!((set.get(Variant::ValueUp).to_hsv().value - 0.8).abs() < 1e-6);
        assert!((set.get(Variant::ValueDown).to_hsv().value - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_rgb_nudges_move_one_channel() {
        let p = SolidColor::from_rgba(0.5, 0.5, 0.5, 1.0);
        let set = compute_variants(p);
        let check = |v: Variant, r: f64, g: f64, b: f64| {
            let c = set.get(v);
            assert!(
                c.approx_eq(&SolidColor::from_rgba(r, g, b, 1.0), EPS),
                "{v:?} gave {c:?}"
            );
        };
        check(Variant::RedUp, 0.7, 0.5, 0.5);
        check(Variant::RedDown, 0.3, 0.5, 0.5);
        check(Variant::GreenUp, 0.5, 0.7, 0.5);
        check(Variant::GreenDown, 0.5, 0.3, 0.5);
        check(Variant::BlueUp, 0.5, 0.5, 0.7);
        check(Variant::BlueDown, 0.5, 0.5, 0.3);
    }

    #[test]
    fn test_hue_wraps_but_channels_clamp() {
        let p = Hsv::new(10.0, 0.9, 0.95).to_color(1.0);
        let set = compute_variants(p);
        assert!(hue_distance(set.get(Variant::HueDown).to_hsv().hue, 340.0) < 1e-6);
        assert!((set.get(Variant::SaturationUp).to_hsv().saturation - 1.0).abs() < 1e-9);
        assert!((set.get(Variant::ValueUp).to_hsv().value - 1.0).abs() < 1e-9);
        assert_eq!(set.get(Variant::RedUp).r(), 1.0);
        let black = compute_variants(SolidColor::BLACK);
        assert_eq!(black.get(Variant::ValueDown), SolidColor::BLACK);
        assert_eq!(black.get(Variant::BlueDown), SolidColor::BLACK);
    }

    #[test]
    fn test_alpha_is_kept() {
        let p = SolidColor::from_rgba(0.2, 0.4, 0.6, 0.5);
        for (_, c) in compute_variants(p).iter() {
            assert!((c.a() - 0.5).abs() < EPS);
        }
    }

    fn grid() -> VariantGrid {
        let mut grid = VariantGrid::new(sample());
        grid.set_bounds(Size::new(74.0, 74.0));
        grid
    }

    fn center_of(grid: &VariantGrid, v: Variant) -> Point {
        grid.cells()[v.index()].bounding_box().center()
    }

    #[test]
    fn test_grid_layout_covers_all_cells() {
        let grid = grid();
        assert_eq!(grid.cells().len(), VARIANT_COUNT);
        for v in Variant::ALL {
            assert_eq!(grid.cell_at(center_of(&grid, v)), Some(v));
        }
        // The gap between cells belongs to nobody.
        assert_eq!(grid.cell_at(Point::new(17.0, 5.0)), None);
    }

    #[test]
    fn test_circular_layout_covers_all_cells() {
        let mut grid = grid();
        grid.set_shape(VariantShape::Circular);
        assert_eq!(grid.cells().len(), VARIANT_COUNT);
        for v in Variant::ALL {
            assert_eq!(grid.cell_at(center_of(&grid, v)), Some(v));
        }
        assert_eq!(grid.cell_at(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_no_layout_before_bounds() {
        let grid = VariantGrid::new(sample());
        assert!(grid.cells().is_empty());
        assert_eq!(grid.cell_at(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_click_hue_up_moves_exactly_one_step() {
        let original = sample();
        let mut grid = grid();
        let target = center_of(&grid, Variant::HueUp);

        // Re-render and re-layout as much as a host would between clicks.
        grid.set_bounds(Size::new(74.0, 74.0));
        grid.set_primary(original);
        let _ = grid.variants();

        let change = grid.click(target).unwrap();
        assert!(change.is_internal());
        let new_hue = grid.primary().to_hsv().hue;
        assert!(hue_distance(new_hue, original.to_hsv().hue + 30.0) < 1e-6);

        let second = grid.click(target).unwrap();
        assert!(hue_distance(second.color.to_hsv().hue, original.to_hsv().hue + 60.0) < 1e-6);
    }

    #[test]
    fn test_click_regenerates_from_new_primary() {
        let mut grid = grid();
        let target = center_of(&grid, Variant::ValueDown);
        grid.click(target).unwrap();
        let primary = grid.primary();
        assert_eq!(grid.variants(), &compute_variants(primary));
    }

    #[test]
    fn test_click_primary_keeps_color() {
        let mut grid = grid();
        let before = grid.primary();
        let change = grid.click(center_of(&grid, Variant::Primary)).unwrap();
        assert_eq!(change.color, before);
        assert_eq!(grid.primary(), before);
    }

    #[test]
    fn test_hover_tracking() {
        let mut grid = grid();
        let p = center_of(&grid, Variant::RedUp);
        assert!(grid.hover(p));
        assert_eq!(grid.hovered(), Some(Variant::RedUp));
        assert!(!grid.hover(p));
        assert!(grid.leave());
        assert_eq!(grid.hovered(), None);
        assert!(!grid.leave());
    }

    #[test]
    fn test_tiny_external_change_rebuilds() {
        let mut grid = grid();
        let nudged = sample().with_red(sample().r() + 1e-4);
        assert!(grid.set_primary(nudged));
        assert_eq!(grid.primary(), nudged);
        let change = grid.click(center_of(&grid, Variant::RedUp)).unwrap();
        assert!((change.color.r() - (nudged.r() + 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_set_primary_reports_change() {
        let mut grid = grid();
        assert!(!grid.set_primary(sample()));
        assert!(grid.set_primary(SolidColor::WHITE));
        assert_eq!(grid.variants()[0], SolidColor::WHITE);
    }
}
