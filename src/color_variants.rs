//! Color-variant grid as a Floem view.

use std::rc::Rc;

use floem::kurbo::{Rect, Size, Stroke};
use floem::peniko::Color;
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
use crate::interaction::{Gesture, InteractionState, VisualState};
use crate::theme::{DefaultTheme, Theme, ThemeRole};
use crate::variants::{CellShape, Variant, VariantGrid, VariantShape};
use crate::wheel::ColorChange;

enum VariantsUpdate {
    Primary(SolidColor),
}

pub struct ColorVariants {
    id: ViewId,
    grid: VariantGrid,
    interaction: InteractionState,
    theme: Rc<dyn Theme>,
    on_change: Option<Box<dyn Fn(ColorChange)>>,
}

/// Creates a grid of thirteen swatches around the color in `color`.
/// Clicking a swatch writes its color back to `color`.
pub fn color_variants(color: RwSignal<SolidColor>) -> ColorVariants {
    let id = ViewId::new();

    create_effect(move |_| {
        let c = color.get();
        id.update_state(VariantsUpdate::Primary(c));
    });

    let side = constants::VARIANT_BOX_SIZE * 4.0 + constants::VARIANT_GAP * 3.0;
    ColorVariants {
        id,
        grid: VariantGrid::new(color.get_untracked()),
        interaction: InteractionState::new(),
        theme: Rc::new(DefaultTheme),
        on_change: Some(Box::new(move |change: ColorChange| color.set(change.color))),
    }
    .keyboard_navigable()
    .style(move |s| {
        s.min_width(side)
            .min_height(side)
            .aspect_ratio(1.0)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl ColorVariants {
    pub fn shape(mut self, shape: VariantShape) -> Self {
        self.grid.set_shape(shape);
        self
    }

    pub fn density(mut self, density: f64) -> Self {
        self.grid.set_density(density);
        self
    }

    pub fn theme(mut self, theme: impl Theme + 'static) -> Self {
        self.theme = Rc::new(theme);
        self
    }

    fn paint_cell(
        &self,
        cx: &mut PaintCx,
        cell: &CellShape,
        fill: Color,
        border: Color,
        width: f64,
    ) {
        match cell {
            CellShape::Rect(r) => {
                cx.fill(r, fill, 0.0);
                cx.stroke(r, border, &Stroke::new(width));
            }
            CellShape::Circle(c) => {
                cx.fill(c, fill, 0.0);
                cx.stroke(c, border, &Stroke::new(width));
            }
        }
    }
}

impl View for ColorVariants {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<VariantsUpdate>() {
            let VariantsUpdate::Primary(c) = *update;
            if self.grid.set_primary(c) {
                self.id.request_paint();
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                if self.grid.cell_at(e.pos).is_none() {
                    return EventPropagation::Continue;
                }
                cx.update_active(self.id());
                self.interaction.pointer_down(e.pos);
                self.id.request_paint();
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                let size = self.id.get_layout().unwrap_or_default().size;
                let bounds = Rect::new(0.0, 0.0, size.width as f64, size.height as f64);
                let moved = self.interaction.pointer_move(e.pos, bounds);
                if self.grid.hover(e.pos) || moved {
                    self.id.request_paint();
                }
                EventPropagation::Continue
            }
            Event::PointerUp(e) => {
                if let Some(Gesture::Click(pos)) = self.interaction.pointer_up(e.pos) {
                    let change = self.grid.click(pos);
                    if let (Some(change), Some(cb)) = (change, &self.on_change) {
                        cb(change);
                    }
                }
                self.id.request_paint();
                EventPropagation::Continue
            }
            Event::PointerLeave => {
                if self.interaction.pointer_leave() | self.grid.leave() {
                    self.id.request_paint();
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
                self.grid.leave();
                self.id.request_paint();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.grid.set_bounds(Size::new(
            layout.size.width as f64,
            layout.size.height as f64,
        ));
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let normal = self.theme.color(ThemeRole::Border, VisualState::Normal).into();
        let hovered = self.grid.hovered();
        let hover_state = if self.interaction.is_pressed() {
            VisualState::Pressed
        } else {
            VisualState::Hovered
        };
        let highlight: Color = self.theme.color(ThemeRole::Border, hover_state).into();

        for (i, cell) in self.grid.cells().iter().enumerate() {
            let Some(variant) = Variant::from_index(i) else {
                continue;
            };
            let fill: Color = self.grid.variants().get(variant).into();
            if hovered == Some(variant) {
                self.paint_cell(cx, cell, fill, highlight, 2.0);
            } else {
                self.paint_cell(cx, cell, fill, normal, 1.0);
            }
        }

        if self.interaction.show_focus_indicator() {
            let layout = self.id.get_layout().unwrap_or_default();
            let bounds = Rect::new(0.0, 0.0, layout.size.width as f64, layout.size.height as f64);
            let ring: Color = self
                .theme
                .color(ThemeRole::FocusRing, VisualState::Normal)
                .into();
            cx.stroke(&bounds.inset(-1.0), ring, &Stroke::new(1.0));
        }
    }
}
