//! Pointer and focus state shared by every widget.
//!
//! The pointer dimension moves Idle → Hovered → Pressed and back; focus is
//! tracked on its own. Hosts do not guarantee a release after the pointer
//! leaves the hit area, so a leave always drops press and drag.

use floem::kurbo::{Point, Rect};

use crate::constants;

/// Where a widget is in the pointer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Idle,
    Hovered,
    Pressed,
}

/// What a completed press turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Click(Point),
    DragEnd(Point),
}

/// A cursor the host may show; applying it is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Pointer,
}

/// Rendering state a theme picks colors for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    Disabled,
    Normal,
    Hovered,
    Pressed,
}

/// Per-widget interaction flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    hovered: bool,
    pressed: bool,
    dragging: bool,
    focused: bool,
    press_origin: Option<Point>,
    last_pointer: Option<Point>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Last pointer position seen during a press.
    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    pub fn phase(&self) -> PointerPhase {
        if self.pressed {
            PointerPhase::Pressed
        } else if self.hovered {
            PointerPhase::Hovered
        } else {
            PointerPhase::Idle
        }
    }

    pub fn pointer_enter(&mut self) -> bool {
        let changed = !self.hovered;
        self.hovered = true;
        changed
    }

    /// The pointer left the widget. Drops every pointer flag; returns
    /// whether anything changed.
    pub fn pointer_leave(&mut self) -> bool {
        let changed = self.hovered || self.pressed || self.dragging;
        if self.pressed {
            log::debug!("pointer left while pressed; dropping press");
        }
        self.hovered = false;
        self.reset_press();
        changed
    }

    pub fn pointer_down(&mut self, pos: Point) {
        self.hovered = true;
        self.pressed = true;
        self.dragging = false;
        self.press_origin = Some(pos);
        self.last_pointer = Some(pos);
    }

    /// Track a move in local coordinates. A widget holding a press keeps
    /// receiving moves outside itself, so hover follows `bounds` rather than
    /// the fact that a move arrived. Returns whether the visible state changed.
    pub fn pointer_move(&mut self, pos: Point, bounds: Rect) -> bool {
        let inside = bounds.contains(pos);
        let mut changed = inside != self.hovered;
        self.hovered = inside;
        if self.pressed {
            self.last_pointer = Some(pos);
            if !self.dragging {
                let origin = self.press_origin.unwrap_or(pos);
                if origin.distance(pos) > constants::DRAG_THRESHOLD {
                    self.dragging = true;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Release. Reports a click for a press that never turned into a drag.
    pub fn pointer_up(&mut self, pos: Point) -> Option<Gesture> {
        if !self.pressed {
            return None;
        }
        let gesture = if self.dragging {
            Gesture::DragEnd(pos)
        } else {
            Gesture::Click(pos)
        };
        self.reset_press();
        Some(gesture)
    }

    pub fn focus_gained(&mut self) -> bool {
        let changed = !self.focused;
        self.focused = true;
        changed
    }

    /// Losing focus clears the pointer flags along with focus.
    pub fn focus_lost(&mut self) -> bool {
        let changed = self.focused || self.hovered || self.pressed || self.dragging;
        *self = Self::default();
        changed
    }

    /// Focus ring is hidden while pressed.
    pub fn show_focus_indicator(&self) -> bool {
        self.focused && !self.pressed
    }

    pub fn cursor_hint(&self) -> CursorHint {
        if self.hovered {
            CursorHint::Pointer
        } else {
            CursorHint::Default
        }
    }

    pub fn visual_state(&self, enabled: bool) -> VisualState {
        if !enabled {
            return VisualState::Disabled;
        }
        match self.phase() {
            PointerPhase::Pressed => VisualState::Pressed,
            PointerPhase::Hovered => VisualState::Hovered,
            PointerPhase::Idle => VisualState::Normal,
        }
    }

    fn reset_press(&mut self) {
        self.pressed = false;
        self.dragging = false;
        self.press_origin = None;
        self.last_pointer = None;
    }
}

/// Collapsing redraw request. Any number of `request`s before the next
/// `take` produce one repaint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    dirty: bool,
}

impl Redraw {
    pub fn request(&mut self) {
        self.dirty = true;
    }

    pub fn is_requested(&self) -> bool {
        self.dirty
    }

    /// Consume the pending request.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
