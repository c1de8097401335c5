//! # floem-paintkit
//!
//! Color and caption widgets for [Floem](https://github.com/lapce/floem).
//!
//! The crate has two layers. The core is plain Rust and can be driven by any
//! host: RGB/HSV conversion, wheel geometry and its drag controller, the
//! thirteen-cell color-variant grid, the text-fit engine and the pointer
//! state machine. On top of it sit Floem views for the color wheel, the
//! variant grid, a fit-to-width label and a hyperlink.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_paintkit::{color_variants, color_wheel, SolidColor};
//!
//! let color = RwSignal::new(SolidColor::from_hex("3B82F6").unwrap());
//! // Use `color_wheel(color)` and `color_variants(color)` in your view tree;
//! // both read and write the same signal.
//! ```

mod color;
mod color_variants;
mod color_wheel;
mod constants;
mod error;
mod fit_label;
mod geometry;
mod interaction;
mod math;
mod radio_group;
mod text_fit;
mod theme;
mod variants;
mod wheel;

pub use color::{hsv_to_rgb, rgb_to_hsv, Hsv, SolidColor};
pub use color_variants::{color_variants, ColorVariants};
pub use color_wheel::{color_wheel, ColorWheel};
pub use error::{ColorParseError, ConfigError};
pub use fit_label::{fit_label, floem_measure, hyperlink, CaptionAlign, FitLabel};
pub use geometry::{Region, WheelConfig, WheelGeometry};
pub use interaction::{CursorHint, Gesture, InteractionState, PointerPhase, Redraw, VisualState};
pub use radio_group::{RadioGroup, RadioId};
pub use text_fit::{
    fit_text, shrink_to_fit, truncate_with_ellipsis, wrap_words, CaptionLayout, LabelLayout,
    TextExtent, TextFitConfig, TextFitResult, TextMeasure,
};
pub use theme::{DefaultTheme, Theme, ThemeRole};
pub use variants::{
    compute_variants, CellShape, Variant, VariantGrid, VariantSet, VariantShape, VARIANT_COUNT,
};
pub use wheel::{ChangeSource, ColorChange, DragState, WheelController};
