//! Fill and stroke appearances.
//!
//! An item carries an ordered list of appearances. Opacity is clamped to
//! [0, 1] and stroke widths to non-negative at construction and again when
//! loading documents, so malformed records can never smuggle invalid values
//! into the model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Formats as `#rrggbb` or `#rrggbbaa` when alpha is not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim_start_matches('#');
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
        };
        match hex.len() {
            6 => Ok(Color::rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?)),
            8 => Ok(Color::rgba(
                parse(0..2)?,
                parse(2..4)?,
                parse(4..6)?,
                parse(6..8)?,
            )),
            _ => Err(format!("Invalid color literal: {}", s)),
        }
    }
}

/// Stroke cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke alignment relative to the geometry edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeAlign {
    #[default]
    Center,
    Inner,
    Outer,
}

/// Whether the stroke paints above or below the fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeOrder {
    #[default]
    Above,
    Below,
}

/// Solid fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
    pub opacity: f64,
    pub visible: bool,
}

impl Fill {
    pub fn new(color: Color, opacity: f64) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
            visible: true,
        }
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::new(Color::rgb(128, 128, 128), 1.0)
    }
}

/// Stroke along the geometry outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
    pub visible: bool,
    #[serde(default)]
    pub cap: StrokeCap,
    #[serde(default)]
    pub align: StrokeAlign,
    #[serde(default)]
    pub order: StrokeOrder,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width: width.max(0.0),
            opacity: 1.0,
            visible: true,
            cap: StrokeCap::default(),
            align: StrokeAlign::default(),
            order: StrokeOrder::default(),
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

/// One entry of an item's appearance list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Appearance {
    Fill(Fill),
    Stroke(Stroke),
}

impl Appearance {
    /// Re-applies the clamping rules; used when loading records.
    pub fn clamped(self) -> Self {
        match self {
            Appearance::Fill(mut f) => {
                f.opacity = f.opacity.clamp(0.0, 1.0);
                Appearance::Fill(f)
            }
            Appearance::Stroke(mut s) => {
                s.opacity = s.opacity.clamp(0.0, 1.0);
                s.width = s.width.max(0.0);
                Appearance::Stroke(s)
            }
        }
    }
}
