//! Colors the widgets paint with, keyed by role and interaction state.

use crate::color::SolidColor;
use crate::interaction::VisualState;

/// What a painted color is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeRole {
    Background,
    Text,
    /// Hyperlink text and selection highlights.
    Accent,
    Border,
    FocusRing,
}

pub trait Theme {
    fn color(&self, role: ThemeRole, state: VisualState) -> SolidColor;
}

/// Light theme with a blue accent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTheme;

impl Theme for DefaultTheme {
    fn color(&self, role: ThemeRole, state: VisualState) -> SolidColor {
        use ThemeRole::*;
        use VisualState::*;
        match (role, state) {
            (_, Disabled) if role != Background => SolidColor::from_rgb8(160, 160, 160),
            (Background, Pressed) => SolidColor::from_rgb8(204, 228, 247),
            (Background, Hovered) => SolidColor::from_rgb8(229, 241, 251),
            (Background, _) => SolidColor::WHITE,
            (Text, _) => SolidColor::from_rgb8(32, 32, 32),
            (Accent, Pressed) => SolidColor::from_rgb8(0, 84, 153),
            (Accent, Hovered) => SolidColor::from_rgb8(0, 102, 204),
            (Accent, _) => SolidColor::from_rgb8(0, 120, 215),
            (Border, Hovered | Pressed) => SolidColor::from_rgb8(0, 120, 215),
            (Border, _) => SolidColor::from_rgb8(122, 122, 122),
            (FocusRing, _) => SolidColor::from_rgb8(0, 120, 215),
        }
    }
}
