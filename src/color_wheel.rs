//! Hue ring + saturation/value square as a Floem view.
//!
//! The ring and the square are rasterized to RGBA8 buffers and scaled to the
//! widget by the renderer. The ring only depends on the inner/outer radius
//! ratio; the square is redrawn when the hue changes.

use std::rc::Rc;
use std::sync::Arc;

use floem::kurbo::{Circle, Point, Rect, Size, Stroke};
use floem::peniko::{self, Blob, Color};
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::SolidColor;
use crate::constants;
use crate::geometry::{WheelConfig, WheelGeometry};
use crate::interaction::InteractionState;
use crate::math;
use crate::theme::{DefaultTheme, Theme, ThemeRole};
use crate::wheel::{ColorChange, DragState, WheelController};

/// Feather width in raster pixels for anti-aliasing the ring edges.
const FEATHER: f64 = 1.5;

/// Side of the saturation/value raster.
const SQUARE_RASTER_SIZE: u32 = 64;

/// Rasterize the hue ring into a `size`×`size` RGBA8 buffer. The ring's
/// outer edge touches the buffer edge; `inner_ratio` is inner / outer radius.
fn rasterize_ring(size: u32, inner_ratio: f64) -> Vec<u8> {
    let c = size as f64 / 2.0;
    let outer = c;
    let inner = outer * inner_ratio.clamp(0.0, 1.0);
    let mut buf = vec![0u8; (size * size * 4) as usize];

    for py in 0..size {
        let dy = py as f64 + 0.5 - c;
        let row_offset = (py * size * 4) as usize;
        for px in 0..size {
            let dx = px as f64 + 0.5 - c;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > outer || dist < inner - FEATHER {
                continue;
            }
            let alpha = ((outer - dist) / FEATHER)
                .min((dist - inner + FEATHER) / FEATHER)
                .clamp(0.0, 1.0);
            let hue = math::normalize_hue(dy.atan2(dx).to_degrees() + 90.0);
            let (r, g, b) = math::hsv_to_rgb(hue, 1.0, 1.0);
            let offset = row_offset + (px * 4) as usize;
            buf[offset] = (r * 255.0 + 0.5) as u8;
            buf[offset + 1] = (g * 255.0 + 0.5) as u8;
            buf[offset + 2] = (b * 255.0 + 0.5) as u8;
            buf[offset + 3] = (alpha * 255.0 + 0.5) as u8;
        }
    }
    buf
}

/// Rasterize the saturation/value square for `hue`: saturation grows to the
/// right, value grows upward.
fn rasterize_square(size: u32, hue: f64) -> Vec<u8> {
    let n = size as f64;
    let mut buf = Vec::with_capacity((size * size * 4) as usize);
    for py in 0..size {
        let v = 1.0 - (py as f64 + 0.5) / n;
        for px in 0..size {
            let s = (px as f64 + 0.5) / n;
            let (r, g, b) = math::hsv_to_rgb(hue, s, v);
            buf.extend_from_slice(&[
                (r * 255.0 + 0.5) as u8,
                (g * 255.0 + 0.5) as u8,
                (b * 255.0 + 0.5) as u8,
                255,
            ]);
        }
    }
    buf
}

/// A raster plus the key it was built for.
struct CachedImage {
    key: u32,
    img: peniko::Image,
    hash: Vec<u8>,
}

impl CachedImage {
    fn build(key: u32, tag: &str, size: u32, pixels: Vec<u8>) -> Self {
        Self {
            key,
            img: peniko::Image::new(Blob::new(Arc::new(pixels)), peniko::Format::Rgba8, size, size),
            hash: format!("{tag}-{key}").into_bytes(),
        }
    }

    fn draw(&self, cx: &mut PaintCx, rect: Rect) {
        cx.draw_img(
            floem_renderer::Img {
                img: self.img.clone(),
                hash: &self.hash,
            },
            rect,
        );
    }
}

enum WheelUpdate {
    Color(SolidColor),
}

pub struct ColorWheel {
    id: ViewId,
    controller: WheelController,
    interaction: InteractionState,
    theme: Rc<dyn Theme>,
    on_change: Option<Box<dyn Fn(ColorChange)>>,
    ring: Option<CachedImage>,
    square: Option<CachedImage>,
}

/// Creates a color wheel bound to `color`.
///
/// Dragging on the ring sets the hue, dragging in the square sets saturation
/// and value. External writes to `color` move the markers; a gray or black
/// color keeps the previous hue (and saturation) so the markers stay put.
pub fn color_wheel(color: RwSignal<SolidColor>) -> ColorWheel {
    let id = ViewId::new();

    create_effect(move |_| {
        let c = color.get();
        id.update_state(WheelUpdate::Color(c));
    });

    ColorWheel {
        id,
        controller: WheelController::default().with_color(color.get_untracked()),
        interaction: InteractionState::new(),
        theme: Rc::new(DefaultTheme),
        on_change: Some(Box::new(move |change: ColorChange| {
            if change.is_internal() {
                color.set(change.color);
            }
        })),
        ring: None,
        square: None,
    }
    .keyboard_navigable()
    .style(|s| {
        s.flex_grow(1.0)
            .aspect_ratio(1.0)
            .min_height(100.0)
            .cursor(floem::style::CursorStyle::Default)
    })
}

impl ColorWheel {
    /// Replace the ring sizing. An invalid ring width keeps the old config.
    pub fn ring_width(mut self, width: f64) -> Self {
        match self.controller.config().with_ring_width(width) {
            Ok(config) => self.controller.set_config(config),
            Err(e) => log::warn!("color wheel: {e}"),
        }
        self
    }

    pub fn density(mut self, density: f64) -> Self {
        match self.controller.config().with_density(density) {
            Ok(config) => self.controller.set_config(config),
            Err(e) => log::warn!("color wheel: {e}"),
        }
        self
    }

    pub fn config(mut self, config: WheelConfig) -> Self {
        self.controller.set_config(config);
        self
    }

    pub fn theme(mut self, theme: impl Theme + 'static) -> Self {
        self.theme = Rc::new(theme);
        self
    }

    fn local_bounds(&self) -> Rect {
        let size = self.id.get_layout().unwrap_or_default().size;
        Rect::new(0.0, 0.0, size.width as f64, size.height as f64)
    }

    fn emit(&mut self, change: Option<ColorChange>) {
        if let (Some(change), Some(cb)) = (change, &self.on_change) {
            cb(change);
        }
        if self.controller.take_redraw() {
            self.id.request_paint();
        }
    }

    fn ensure_ring(&mut self, geometry: &WheelGeometry) {
        let ratio = if geometry.outer_radius() > 0.0 {
            geometry.inner_radius() / geometry.outer_radius()
        } else {
            0.0
        };
        let key = (ratio * 1000.0).round() as u32;
        if self.ring.as_ref().is_some_and(|r| r.key == key) {
            return;
        }
        let size = constants::WHEEL_RASTER_SIZE;
        self.ring = Some(CachedImage::build(
            key,
            "ring",
            size,
            rasterize_ring(size, key as f64 / 1000.0),
        ));
    }

    fn ensure_square(&mut self, hue: f64) {
        let key = (hue * 10.0).round() as u32;
        if self.square.as_ref().is_some_and(|s| s.key == key) {
            return;
        }
        self.square = Some(CachedImage::build(
            key,
            "sv",
            SQUARE_RASTER_SIZE,
            rasterize_square(SQUARE_RASTER_SIZE, key as f64 / 10.0),
        ));
    }
}

fn paint_marker(cx: &mut PaintCx, at: Point) {
    let r = constants::INDICATOR_RADIUS;
    let shadow = Color::rgba8(0, 0, 0, 110);
    cx.stroke(&Circle::new(at, r + 1.0), shadow, &Stroke::new(1.0));
    cx.stroke(&Circle::new(at, r), Color::WHITE, &Stroke::new(2.0));
    cx.stroke(&Circle::new(at, r - 1.5), shadow, &Stroke::new(1.0));
}

impl View for ColorWheel {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<WheelUpdate>() {
            let WheelUpdate::Color(c) = *update;
            // Our own writes come back through the signal; re-deriving HSV
            // from them would lose the hue of grays.
            self.controller.sync_external(c);
            if self.controller.take_redraw() {
                self.id.request_paint();
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                self.interaction.pointer_down(e.pos);
                let change = self.controller.pointer_down(e.pos);
                if change.is_none() {
                    return EventPropagation::Continue;
                }
                cx.update_active(self.id());
                self.emit(change);
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                self.interaction.pointer_move(e.pos, self.local_bounds());
                if self.controller.drag_state() == DragState::Idle {
                    return EventPropagation::Continue;
                }
                let change = self.controller.pointer_move(e.pos);
                self.emit(change);
                EventPropagation::Stop
            }
            Event::PointerUp(e) => {
                self.interaction.pointer_up(e.pos);
                self.controller.pointer_up();
                EventPropagation::Continue
            }
            Event::PointerLeave => {
                // The active view still receives moves and the release, so a
                // drag survives leaving the widget.
                if self.controller.drag_state() == DragState::Idle {
                    self.interaction.pointer_leave();
                }
                EventPropagation::Continue
            }
            Event::FocusGained => {
                if self.interaction.focus_gained() {
                    self.id.request_paint();
                }
                EventPropagation::Continue
            }
            Event::FocusLost => {
                self.interaction.focus_lost();
                self.controller.cancel();
                self.id.request_paint();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.controller.set_bounds(Size::new(
            layout.size.width as f64,
            layout.size.height as f64,
        ));
        self.controller.take_redraw();
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let geometry = *self.controller.geometry();
        if geometry.is_degenerate() {
            return;
        }
        let hsv = self.controller.hsv();
        let center = geometry.center();
        let outer = geometry.outer_radius();

        self.ensure_ring(&geometry);
        if let Some(ring) = &self.ring {
            ring.draw(
                cx,
                Rect::new(center.x - outer, center.y - outer, center.x + outer, center.y + outer),
            );
        }

        let half = geometry.half_square();
        if half > 0.0 {
            self.ensure_square(hsv.hue);
            if let Some(square) = &self.square {
                square.draw(
                    cx,
                    Rect::new(center.x - half, center.y - half, center.x + half, center.y + half),
                );
            }
        }

        paint_marker(cx, geometry.hue_indicator(hsv.hue));
        paint_marker(cx, geometry.sv_indicator(hsv.saturation, hsv.value));

        if self.interaction.show_focus_indicator() {
            let state = self.interaction.visual_state(true);
            let ring_color: Color = self.theme.color(ThemeRole::FocusRing, state).into();
            cx.stroke(&Circle::new(center, outer + 1.0), ring_color, &Stroke::new(1.0));
        }
    }
}
