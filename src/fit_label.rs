//! Caption views backed by the text-fit engine: a shrink-to-fit label and a
//! hyperlink.

use std::rc::Rc;

use floem::kurbo::{Line, Point, Rect, Size, Stroke};
use floem::peniko::Color;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::text::{Attrs, AttrsList, TextLayout};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::constants;
use crate::interaction::{Gesture, InteractionState, VisualState};
use crate::text_fit::{CaptionLayout, LabelLayout, TextExtent, TextFitConfig, TextFitResult};
use crate::theme::{DefaultTheme, Theme, ThemeRole};

/// Share of a line box above the baseline. The shaper reports line boxes
/// only, so ascent and descent are split from the box height.
const ASCENT_SHARE: f64 = 0.8;

/// Measure `text` with the platform shaper.
pub fn floem_measure(text: &str, font_size: f64) -> TextExtent {
    let mut layout = TextLayout::new();
    layout.set_text(text, AttrsList::new(Attrs::new().font_size(font_size as f32)));
    let size = layout.size();
    TextExtent {
        width: size.width,
        ascent: size.height * ASCENT_SHARE,
        descent: size.height * (1.0 - ASCENT_SHARE),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionAlign {
    #[default]
    Left,
    Center,
    Right,
}

enum LabelUpdate {
    Caption(String),
}

pub struct FitLabel {
    id: ViewId,
    caption: String,
    font_size: f64,
    align: CaptionAlign,
    fit: CaptionLayout,
    bounds: Size,
    interaction: InteractionState,
    theme: Rc<dyn Theme>,
    on_click: Option<Box<dyn Fn()>>,
    requested: RwSignal<Option<Size>>,
    text_layouts: Vec<TextLayout>,
    painted_state: Option<VisualState>,
}

/// Creates a label that fits `caption` into its bounds at `font_size` or
/// smaller, as `layout` directs.
pub fn fit_label(
    caption: impl Fn() -> String + 'static,
    font_size: f64,
    layout: LabelLayout,
) -> FitLabel {
    build(caption, font_size, layout, TextFitConfig::label(), None)
}

/// Creates a fit-to-width link. The caption is underlined while hovered or
/// focused; a click (a press released without dragging) calls `on_click`.
pub fn hyperlink(
    caption: impl Fn() -> String + 'static,
    on_click: impl Fn() + 'static,
) -> FitLabel {
    build(
        caption,
        constants::CAPTION_FONT,
        LabelLayout::AutoFitCaption,
        TextFitConfig::label(),
        Some(Box::new(on_click)),
    )
    .keyboard_navigable()
    .style(|s| s.cursor(floem::style::CursorStyle::Pointer))
}

fn build(
    caption: impl Fn() -> String + 'static,
    font_size: f64,
    layout: LabelLayout,
    config: TextFitConfig,
    on_click: Option<Box<dyn Fn()>>,
) -> FitLabel {
    let id = ViewId::new();

    create_effect(move |_| {
        let text = caption();
        id.update_state(LabelUpdate::Caption(text));
    });

    let requested = RwSignal::new(None::<Size>);
    FitLabel {
        id,
        caption: String::new(),
        font_size,
        align: CaptionAlign::default(),
        fit: CaptionLayout::new(layout, config),
        bounds: Size::ZERO,
        interaction: InteractionState::new(),
        theme: Rc::new(DefaultTheme),
        on_click,
        requested,
        text_layouts: Vec::new(),
        painted_state: None,
    }
    .style(move |s| {
        let s = s.min_height(font_size * constants::LINE_SPACING);
        match requested.get() {
            Some(size) => s.width(size.width).height(size.height),
            None => s,
        }
    })
}

impl FitLabel {
    pub fn align(mut self, align: CaptionAlign) -> Self {
        self.align = align;
        self
    }

    /// Use the checkbox/radio floor instead of the label floor.
    pub fn toggle_caption(mut self) -> Self {
        self.fit.set_config(TextFitConfig::toggle());
        self
    }

    pub fn fit_config(mut self, config: TextFitConfig) -> Self {
        self.fit.set_config(config);
        self
    }

    pub fn theme(mut self, theme: impl Theme + 'static) -> Self {
        self.theme = Rc::new(theme);
        self
    }

    /// Current fit result; empty until the first layout pass.
    pub fn fit_result(&self) -> &TextFitResult {
        self.fit.result()
    }

    fn refit(&mut self) {
        let result = self
            .fit
            .update(&self.caption, self.font_size, self.bounds, &floem_measure);
        if result.requested_size != self.requested.get_untracked() {
            self.requested.set(result.requested_size);
        }
        self.painted_state = None;
    }

    fn visual_state(&self) -> VisualState {
        self.interaction.visual_state(true)
    }

    fn text_color(&self, state: VisualState) -> Color {
        let role = if self.on_click.is_some() {
            ThemeRole::Accent
        } else {
            ThemeRole::Text
        };
        self.theme.color(role, state).into()
    }

    fn underlined(&self) -> bool {
        self.on_click.is_some() && (self.interaction.is_hovered() || self.interaction.has_focus())
    }

    fn ensure_text_layouts(&mut self, state: VisualState) {
        if self.painted_state == Some(state) {
            return;
        }
        let color = self.text_color(state);
        let result = self.fit.result();
        let attrs = Attrs::new().font_size(result.font_size as f32).color(color);
        self.text_layouts = result
            .lines
            .iter()
            .map(|line| {
                let mut layout = TextLayout::new();
                layout.set_text(line, AttrsList::new(attrs));
                layout
            })
            .collect();
        self.painted_state = Some(state);
    }

    fn line_x(&self, width: f64) -> f64 {
        match self.align {
            CaptionAlign::Left => constants::CAPTION_INSET.min(self.bounds.width - width).max(0.0),
            CaptionAlign::Center => ((self.bounds.width - width) / 2.0).max(0.0),
            CaptionAlign::Right => (self.bounds.width - width - constants::CAPTION_INSET).max(0.0),
        }
    }

    fn request_repaint(&mut self, changed: bool) {
        if changed {
            self.painted_state = None;
            self.id.request_paint();
        }
    }
}

impl View for FitLabel {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<LabelUpdate>() {
            let LabelUpdate::Caption(text) = *update;
            if text != self.caption {
                self.caption = text;
                self.id.request_layout();
            }
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        if self.on_click.is_none() {
            return EventPropagation::Continue;
        }
        match event {
            Event::PointerDown(e) => {
                cx.update_active(self.id());
                self.interaction.pointer_down(e.pos);
                self.request_repaint(true);
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                let bounds = Rect::from_origin_size(Point::ZERO, self.bounds);
                let changed = self.interaction.pointer_move(e.pos, bounds);
                self.request_repaint(changed);
                EventPropagation::Continue
            }
            Event::PointerUp(e) => {
                let gesture = self.interaction.pointer_up(e.pos);
                self.request_repaint(true);
                match (gesture, &self.on_click) {
                    (Some(Gesture::Click(_)), Some(cb)) => {
                        log::debug!("hyperlink {:?} clicked", self.caption);
                        cb();
                        EventPropagation::Stop
                    }
                    _ => EventPropagation::Continue,
                }
            }
            Event::PointerLeave => {
                let changed = self.interaction.pointer_leave();
                self.request_repaint(changed);
                EventPropagation::Continue
            }
            Event::FocusGained => {
                let changed = self.interaction.focus_gained();
                self.request_repaint(changed);
                EventPropagation::Continue
            }
            Event::FocusLost => {
                let changed = self.interaction.focus_lost();
                self.request_repaint(changed);
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.bounds = Size::new(layout.size.width as f64, layout.size.height as f64);
        self.refit();
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let state = self.visual_state();
        self.ensure_text_layouts(state);

        let extent = self.fit.line_extent();
        let line_height = extent.height() * constants::LINE_SPACING;
        let block = line_height * self.text_layouts.len() as f64;
        let mut y = ((self.bounds.height - block) / 2.0).max(0.0);
        let underline = self.underlined();
        let color = self.text_color(state);

        for layout in &self.text_layouts {
            let width = layout.size().width;
            let x = self.line_x(width);
            cx.draw_text(layout, Point::new(x, y));
            if underline {
                let base = y + extent.ascent + 1.0;
                cx.stroke(
                    &Line::new(Point::new(x, base), Point::new(x + width, base)),
                    color,
                    &Stroke::new(1.0),
                );
            }
            y += line_height;
        }

        if self.interaction.show_focus_indicator() {
            let ring: Color = self.theme.color(ThemeRole::FocusRing, state).into();
            let rect = Rect::from_origin_size(Point::ZERO, self.bounds).inset(-1.0);
            cx.stroke(&rect, ring, &Stroke::new(1.0));
        }
    }
}
