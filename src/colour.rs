use pdf_writer::Content;
use serde::Deserialize;
use thiserror::Error;

/// A colour, expressed in RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid hex colour {0:?}, expected #RRGGBB")]
pub struct ColourParseError(pub String);

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub const fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string
    pub fn from_hex(hex: &str) -> Result<Colour, ColourParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColourParseError(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColourParseError(hex.to_string()))
        };
        Ok(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Set this colour as the fill colour of a content stream
    pub fn set_fill(&self, content: &mut Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_fill_rgb(r, g, b),
            Colour::Grey { g } => content.set_fill_gray(g),
        };
    }

    /// Set this colour as the stroke colour of a content stream
    pub fn set_stroke(&self, content: &mut Content) {
        match *self {
            Colour::RGB { r, g, b } => content.set_stroke_rgb(r, g, b),
            Colour::Grey { g } => content.set_stroke_gray(g),
        };
    }
}

impl TryFrom<String> for Colour {
    type Error = ColourParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Colour::from_hex(&value)
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// Pre-defined colour constants, including the certificate palette
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };

    /// Banner fill and wordmark, `#2C3E50`
    pub const SLATE: Colour = Colour::new_rgb_bytes(0x2C, 0x3E, 0x50);
    /// Body text, `#333333`
    pub const CHARCOAL: Colour = Colour::new_rgb_bytes(0x33, 0x33, 0x33);
    /// Section underline accent, `#FFA500`
    pub const ORANGE: Colour = Colour::new_rgb_bytes(0xFF, 0xA5, 0x00);
    /// Section separator, `#CCCCCC`
    pub const SILVER: Colour = Colour::new_rgb_bytes(0xCC, 0xCC, 0xCC);
    /// Background hexagons, `#E8E8E8`
    pub const MIST: Colour = Colour::new_rgb_bytes(0xE8, 0xE8, 0xE8);
}
