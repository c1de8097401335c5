//! `SolidColor` and `Hsv` — the public color representations.
//!
//! `SolidColor` stores RGBA as f64 values clamped into 0.0–1.0 on every
//! construction, so anything holding one can rely on the range. `Hsv` keeps
//! hue in degrees, wrapped into `[0, 360)`.

use floem::peniko;

use crate::error::ColorParseError;
use crate::math;

/// RGBA color with components in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl SolidColor {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Red component (0.0–1.0).
    pub fn r(&self) -> f64 {
        self.r
    }
    /// Green component (0.0–1.0).
    pub fn g(&self) -> f64 {
        self.g
    }
    /// Blue component (0.0–1.0).
    pub fn b(&self) -> f64 {
        self.b
    }
    /// Alpha component (0.0–1.0).
    pub fn a(&self) -> f64 {
        self.a
    }
}

impl Default for SolidColor {
    fn default() -> Self {
        Self::RED
    }
}

impl SolidColor {
    /// Create from f64 RGBA. Each channel is clamped into 0.0–1.0.
    pub fn from_rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: math::clamp_unit(r),
            g: math::clamp_unit(g),
            b: math::clamp_unit(b),
            a: math::clamp_unit(a),
        }
    }

    /// Create from 0–255 RGB values with full opacity.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create from 0–255 RGBA values.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Convert to a 0–255 RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    pub fn with_red(self, r: f64) -> Self {
        Self::from_rgba(r, self.g, self.b, self.a)
    }

    pub fn with_green(self, g: f64) -> Self {
        Self::from_rgba(self.r, g, self.b, self.a)
    }

    pub fn with_blue(self, b: f64) -> Self {
        Self::from_rgba(self.r, self.g, b, self.a)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self::from_rgba(self.r, self.g, self.b, a)
    }

    /// Convert to HSV. Alpha is dropped.
    pub fn to_hsv(&self) -> Hsv {
        rgb_to_hsv(*self)
    }

    /// True when every channel, alpha included, is within `eps` of `other`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.r - other.r).abs() <= eps
            && (self.g - other.g).abs() <= eps
            && (self.b - other.b).abs() <= eps
            && (self.a - other.a).abs() <= eps
    }

    /// Parse a hex string (with or without `#`, 3, 6, or 8 digits).
    ///
    /// 8-digit hex is read as RRGGBBAA. 3 and 6-digit hex are fully opaque.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(hex.to_string()));
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let parsed = match digits.len() {
            3 => {
                let mut nibbles = [0u8; 3];
                for (slot, i) in nibbles.iter_mut().zip(0..3) {
                    *slot = u8::from_str_radix(&digits[i..i + 1], 16)? * 17;
                }
                Self::from_rgb8(nibbles[0], nibbles[1], nibbles[2])
            }
            6 => Self::from_rgb8(byte(0)?, byte(2)?, byte(4)?),
            8 => Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?),
            n => return Err(ColorParseError::Length(n)),
        };
        Ok(parsed)
    }

    /// Format as uppercase hex without `#`: RRGGBB when opaque, RRGGBBAA otherwise.
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            format!("{r:02X}{g:02X}{b:02X}")
        } else {
            format!("{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl From<std::num::ParseIntError> for ColorParseError {
    fn from(err: std::num::ParseIntError) -> Self {
        ColorParseError::InvalidDigit(err.to_string())
    }
}

impl From<SolidColor> for peniko::Color {
    fn from(c: SolidColor) -> Self {
        peniko::Color::rgba(c.r, c.g, c.b, c.a)
    }
}

/// Hue (degrees, 0–360 exclusive), saturation and value (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    /// Wraps `hue` into `[0, 360)` and clamps saturation and value.
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue: math::normalize_hue(hue),
            saturation: math::clamp_unit(saturation),
            value: math::clamp_unit(value),
        }
    }

    /// Convert to RGB with the given alpha.
    pub fn to_color(&self, alpha: f64) -> SolidColor {
        hsv_to_rgb(*self).with_alpha(alpha)
    }
}

impl Default for Hsv {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            value: 1.0,
        }
    }
}

/// RGB → HSV. Gray colors report hue 0.
pub fn rgb_to_hsv(color: SolidColor) -> Hsv {
    let (h, s, v) = math::rgb_to_hsv(color.r, color.g, color.b);
    Hsv::new(h, s, v)
}

/// HSV → RGB, fully opaque.
pub fn hsv_to_rgb(hsv: Hsv) -> SolidColor {
    let (r, g, b) = math::hsv_to_rgb(hsv.hue, hsv.saturation, hsv.value);
    SolidColor::from_rgba(r, g, b, 1.0)
}
