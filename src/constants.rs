//! Sizing, stepping, and styling constants for the widgets.

/// Gap between the widget edge and the hue ring's outer edge
pub const WHEEL_PADDING: f64 = 2.0;

/// Default hue ring width, in logical pixels
pub const RING_WIDTH: f64 = 15.0;

/// Side of the saturation/value square relative to the ring's inner radius.
/// The square's diagonal then fits the inner circle.
pub const SQUARE_RATIO: f64 = 1.4;

/// Selection indicator radius on the wheel
pub const INDICATOR_RADIUS: f64 = 4.0;

/// Side length of the raster the wheel is drawn into before scaling
pub const WHEEL_RASTER_SIZE: u32 = 256;

/// Hue nudge for color variants, in degrees
pub const HUE_STEP: f64 = 30.0;

/// Saturation / value / RGB channel nudge for color variants
pub const CHANNEL_STEP: f64 = 0.2;

/// Variant cell size, in logical pixels
pub const VARIANT_BOX_SIZE: f64 = 16.0;

/// Gap between variant cells
pub const VARIANT_GAP: f64 = 2.0;

/// Font size decrement used while shrinking a caption
pub const FONT_STEP: f64 = 0.5;

/// Smallest font size a label or hyperlink shrinks to
pub const LABEL_MIN_FONT: f64 = 6.0;

/// Smallest font size a checkbox or radio caption shrinks to
pub const TOGGLE_MIN_FONT: f64 = 7.0;

/// Default caption font size
pub const CAPTION_FONT: f64 = 14.0;

/// Line advance relative to a line's ascent + descent
pub const LINE_SPACING: f64 = 1.2;

/// Padding added around measured text by auto-sizing layouts
pub const AUTOSIZE_PADDING: f64 = 8.0;

/// Horizontal inset of left/right aligned captions
pub const CAPTION_INSET: f64 = 4.0;

/// Glyph appended to truncated captions
pub const ELLIPSIS: &str = "\u{2026}";

/// Distance the pointer must travel while pressed before a press becomes a drag
pub const DRAG_THRESHOLD: f64 = 3.0;
