//! Drag-to-value controller for the color wheel.
//!
//! A press on the ring drags hue, a press on the square drags saturation and
//! value. Once a drag has started every move is mapped from the raw pointer
//! position, even far outside the region it started in.

use std::collections::VecDeque;

use floem::kurbo::{Point, Size};

use crate::color::{Hsv, SolidColor};
use crate::geometry::{Region, WheelConfig, WheelGeometry};
use crate::interaction::Redraw;

/// Below this, saturation or value is treated as zero when deciding
/// whether an external color carries a usable hue or saturation.
const ACHROMATIC_EPSILON: f64 = 1e-6;

/// Emitted colors remembered while waiting for the host to echo them back.
const MAX_PENDING_ECHOES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingRing,
    DraggingSquare,
}

/// Who caused a color change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// The user interacted with the widget.
    Internal,
    /// The color was assigned programmatically.
    External,
}

/// Outbound notification for a new color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorChange {
    pub color: SolidColor,
    pub source: ChangeSource,
}

impl ColorChange {
    pub fn internal(color: SolidColor) -> Self {
        Self {
            color,
            source: ChangeSource::Internal,
        }
    }

    pub fn external(color: SolidColor) -> Self {
        Self {
            color,
            source: ChangeSource::External,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.source == ChangeSource::Internal
    }
}

/// State of one color wheel: the cached HSV triple, the drag in progress and
/// the geometry for the current bounds.
#[derive(Debug, Clone)]
pub struct WheelController {
    config: WheelConfig,
    geometry: WheelGeometry,
    hsv: Hsv,
    color: SolidColor,
    drag: DragState,
    redraw: Redraw,
    pending_echoes: VecDeque<SolidColor>,
}

impl Default for WheelController {
    fn default() -> Self {
        Self::new(WheelConfig::default())
    }
}

impl WheelController {
    pub fn new(config: WheelConfig) -> Self {
        let color = SolidColor::default();
        Self {
            config,
            geometry: WheelGeometry::new(Size::ZERO, &config),
            hsv: color.to_hsv(),
            color,
            drag: DragState::Idle,
            redraw: Redraw::default(),
            pending_echoes: VecDeque::new(),
        }
    }

    pub fn with_color(mut self, color: SolidColor) -> Self {
        self.set_color(color);
        self.redraw = Redraw::default();
        self
    }

    pub fn color(&self) -> SolidColor {
        self.color
    }

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Consume a pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    pub fn set_config(&mut self, config: WheelConfig) {
        let size = self.size();
        self.config = config;
        self.set_bounds(size);
    }

    pub fn set_bounds(&mut self, size: Size) {
        let geometry = WheelGeometry::new(size, &self.config);
        if geometry != self.geometry {
            self.geometry = geometry;
            self.redraw.request();
        }
    }

    fn size(&self) -> Size {
        let c = self.geometry.center();
        Size::new(c.x * 2.0, c.y * 2.0)
    }

    /// Assign a color from outside. The hue survives an achromatic color and
    /// the saturation survives black, so the markers do not jump.
    pub fn set_color(&mut self, color: SolidColor) -> ColorChange {
        let derived = color.to_hsv();
        if derived.saturation > ACHROMATIC_EPSILON {
            self.hsv.hue = derived.hue;
        }
        if derived.value > ACHROMATIC_EPSILON {
            self.hsv.saturation = derived.saturation;
        }
        self.hsv.value = derived.value;
        self.color = color;
        self.redraw.request();
        ColorChange::external(color)
    }

    /// Adopt a color coming back from the host. Colors this wheel emitted are
    /// recognized exactly and ignored, so the cached hue and saturation
    /// survive; anything else is an external assignment, however close.
    pub fn sync_external(&mut self, color: SolidColor) -> Option<ColorChange> {
        if let Some(i) = self.pending_echoes.iter().position(|c| *c == color) {
            self.pending_echoes.drain(..=i);
            return None;
        }
        self.pending_echoes.clear();
        Some(self.set_color(color))
    }

    /// Start a drag if `pos` hits the ring or the square.
    pub fn pointer_down(&mut self, pos: Point) -> Option<ColorChange> {
        self.drag = match self.geometry.region_at(pos) {
            Region::Ring => DragState::DraggingRing,
            Region::Square => DragState::DraggingSquare,
            Region::None => return None,
        };
        log::debug!("wheel drag started: {:?} at {:?}", self.drag, pos);
        self.apply(pos)
    }

    /// Continue a drag. Ignored when idle.
    pub fn pointer_move(&mut self, pos: Point) -> Option<ColorChange> {
        self.apply(pos)
    }

    pub fn pointer_up(&mut self) {
        if self.drag != DragState::Idle {
            log::debug!("wheel drag ended: {:?}", self.drag);
        }
        self.drag = DragState::Idle;
    }

    /// Abandon a drag without a release (pointer left, focus lost).
    pub fn cancel(&mut self) {
        self.pointer_up();
    }

    fn apply(&mut self, pos: Point) -> Option<ColorChange> {
        match self.drag {
            DragState::Idle => return None,
            DragState::DraggingRing => {
                self.hsv.hue = self.geometry.hue_at(pos);
            }
            DragState::DraggingSquare => {
                let (s, v) = self.geometry.saturation_value_at(pos);
                self.hsv.saturation = s;
                self.hsv.value = v;
            }
        }
        log::trace!("wheel hsv now {:?}", self.hsv);
        self.color = self.hsv.to_color(self.color.a());
        self.redraw.request();
        self.pending_echoes.push_back(self.color);
        if self.pending_echoes.len() > MAX_PENDING_ECHOES {
            self.pending_echoes.pop_front();
        }
        Some(ColorChange::internal(self.color))
    }
}
